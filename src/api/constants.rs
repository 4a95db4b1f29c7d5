//! API 模块常量定义

/// Session cookie 名称
pub const SESSION_COOKIE_NAME: &str = "shorturl_session";

/// Prefix of the admin JSON API
pub const API_PREFIX: &str = "/api";

/// API paths reachable without a session
pub const PUBLIC_API_PATHS: &[&str] = &["/api/login", "/api/logout"];

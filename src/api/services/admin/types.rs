//! Admin API 请求/响应类型

use serde::{Deserialize, Serialize};

use super::error_code::ErrorCode;

/// 通用 JSON 响应包装
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub username: String,
}

/// Body of `POST /api/links`
#[derive(Debug, Serialize, Deserialize)]
pub struct PostNewLink {
    #[serde(default)]
    pub code: Option<String>,
    pub target_url: String,
}

/// Body of `PUT /api/links/{id}`
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateLinkBody {
    pub target_url: String,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListLinksQuery {
    pub limit: Option<u64>,
}

//! Application configuration
//!
//! The configuration is loaded once at startup into an [`AppConfig`] value
//! and handed to every component that needs it. Nothing reads settings from
//! a global.

mod structs;

pub use structs::*;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment prefix, e.g. `SHORTURL__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "SHORTURL";

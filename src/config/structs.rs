use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DEFAULT_CONFIG_PATH, ENV_PREFIX};
use crate::errors::{Result, ShortUrlError};
use crate::utils::shortcode::{AUTO_MAX_LEN, AUTO_MIN_LEN};

/// Plain environment names accepted on top of the prefixed ones.
/// Each entry maps an env var to a config key.
const PLAIN_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("HOST", "server.host"),
    ("PORT", "server.port"),
    ("DB_PATH", "database.path"),
    ("ADMIN_USERNAME", "auth.admin_username"),
    ("ADMIN_PASSWORD", "auth.admin_password"),
    ("SESSION_SECRET", "auth.session_secret"),
    ("COOKIE_SECURE", "auth.cookie_secure"),
];

/// 应用配置（启动时加载一次，之后只读）
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：plain ENV > SHORTURL__ ENV > config file > 默认值
    pub fn load(path: Option<&str>) -> Result<Self> {
        Self::load_from(path.unwrap_or(DEFAULT_CONFIG_PATH), true)
    }

    /// Load from `path`, optionally layering environment variables on top.
    pub fn load_from(path: &str, with_env: bool) -> Result<Self> {
        Self::load_with_lookup(path, with_env, |var| std::env::var(var).ok())
    }

    /// `lookup` resolves the plain (unprefixed) variable names.
    fn load_with_lookup<F>(path: &str, with_env: bool, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        use config::{Config, Environment, File};

        let mut builder = Config::builder().add_source(File::with_name(path).required(false));

        if with_env {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );
            for (var, key) in PLAIN_ENV_OVERRIDES {
                // 空值视为未设置
                let value = lookup(var).filter(|v| !v.is_empty());
                builder = builder.set_override_option(*key, value)?;
            }
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ShortUrlError::config("server.port must not be 0"));
        }
        if !(AUTO_MIN_LEN..=AUTO_MAX_LEN).contains(&self.links.code_length) {
            return Err(ShortUrlError::config(format!(
                "links.code_length must be between {} and {}",
                AUTO_MIN_LEN, AUTO_MAX_LEN
            )));
        }
        if self.links.list_limit == 0 {
            return Err(ShortUrlError::config("links.list_limit must be positive"));
        }
        if self.auth.session_ttl_days == 0 {
            return Err(ShortUrlError::config(
                "auth.session_ttl_days must be positive",
            ));
        }
        if self.auth.admin_username.trim().is_empty() {
            return Err(ShortUrlError::config("auth.admin_username must not be empty"));
        }
        if self.database.path.trim().is_empty() {
            return Err(ShortUrlError::config("database.path must not be empty"));
        }
        Ok(())
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("# Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ShortUrlError::config(format!("cannot serialise config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path, or a full `sqlite:` URL
    #[serde(default = "default_database_path")]
    pub path: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

impl DatabaseConfig {
    /// Connection URL for the configured path.
    pub fn sqlite_url(&self) -> String {
        if self.path.starts_with("sqlite:") {
            self.path.clone()
        } else {
            format!("sqlite://{}?mode=rwc", self.path)
        }
    }
}

/// 认证与会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Only used to create the first account when the users table is empty
    #[serde(default)]
    pub admin_password: Option<String>,
    /// HMAC key for session tokens; a random one is used when unset
    #[serde(default)]
    pub session_secret: Option<String>,
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: u64,
    #[serde(default)]
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// Configured bootstrap password, treating blank as unset.
    ///
    /// The password is returned exactly as configured; surrounding spaces
    /// are part of it.
    pub fn bootstrap_password(&self) -> Option<&str> {
        self.admin_password
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }

    pub fn configured_session_secret(&self) -> Option<&str> {
        self.session_secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn session_ttl_secs(&self) -> u64 {
        self.session_ttl_days.saturating_mul(24 * 60 * 60)
    }
}

/// 短链接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Length of generated codes
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    /// Upper bound on the list endpoint
    #[serde(default = "default_list_limit")]
    pub list_limit: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_path() -> String {
    "./data/shorturl.db".to_string()
}

fn default_database_pool_size() -> u32 {
    5
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_session_ttl_days() -> u64 {
    14
}

fn default_code_length() -> usize {
    6
}

fn default_list_limit() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            pool_size: default_database_pool_size(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: None,
            session_secret: None,
            session_ttl_days: default_session_ttl_days(),
            cookie_secure: false,
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            list_limit: default_list_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortUrlError {
    /// Malformed user input (URL, code, request body)
    Validation(String),
    /// The code is already taken
    Duplicate(String),
    NotFound(String),
    /// No free code found within the attempt budget
    GenerationExhausted(String),
    /// I/O or database failure
    Storage(String),
    Config(String),
}

impl ShortUrlError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortUrlError::Validation(_) => "E001",
            ShortUrlError::Duplicate(_) => "E002",
            ShortUrlError::NotFound(_) => "E003",
            ShortUrlError::GenerationExhausted(_) => "E004",
            ShortUrlError::Storage(_) => "E005",
            ShortUrlError::Config(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortUrlError::Validation(_) => "Validation Error",
            ShortUrlError::Duplicate(_) => "Duplicate Code",
            ShortUrlError::NotFound(_) => "Resource Not Found",
            ShortUrlError::GenerationExhausted(_) => "Code Generation Exhausted",
            ShortUrlError::Storage(_) => "Storage Error",
            ShortUrlError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortUrlError::Validation(msg)
            | ShortUrlError::Duplicate(msg)
            | ShortUrlError::NotFound(msg)
            | ShortUrlError::GenerationExhausted(msg)
            | ShortUrlError::Storage(msg)
            | ShortUrlError::Config(msg) => msg,
        }
    }

    /// HTTP status used when the error reaches the admin API
    pub fn http_status(&self) -> StatusCode {
        match self {
            ShortUrlError::Validation(_) => StatusCode::BAD_REQUEST,
            ShortUrlError::Duplicate(_) => StatusCode::CONFLICT,
            ShortUrlError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortUrlError::GenerationExhausted(_)
            | ShortUrlError::Storage(_)
            | ShortUrlError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A duplicate on insert is the one failure a generated-code caller
    /// should answer with a fresh code instead of giving up.
    pub fn is_retryable_duplicate(&self) -> bool {
        matches!(self, ShortUrlError::Duplicate(_))
    }

    /// 格式化为彩色输出（用于 CLI）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortUrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortUrlError {}

// 便捷的构造函数
impl ShortUrlError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortUrlError::Validation(msg.into())
    }

    pub fn duplicate<T: Into<String>>(msg: T) -> Self {
        ShortUrlError::Duplicate(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortUrlError::NotFound(msg.into())
    }

    pub fn generation_exhausted<T: Into<String>>(msg: T) -> Self {
        ShortUrlError::GenerationExhausted(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        ShortUrlError::Storage(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ShortUrlError::Config(msg.into())
    }
}

impl From<sea_orm::DbErr> for ShortUrlError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一约束冲突单独归类，调用方据此决定是否换码重试
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return ShortUrlError::Duplicate(detail);
        }
        match err {
            sea_orm::DbErr::RecordNotFound(msg) => ShortUrlError::NotFound(msg),
            other => ShortUrlError::Storage(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ShortUrlError {
    fn from(err: std::io::Error) -> Self {
        ShortUrlError::Storage(err.to_string())
    }
}

impl From<config::ConfigError> for ShortUrlError {
    fn from(err: config::ConfigError) -> Self {
        ShortUrlError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortUrlError>;

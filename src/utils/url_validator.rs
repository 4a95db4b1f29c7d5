//! URL 验证模块
//!
//! Only absolute `http`/`https` URLs with a non-empty host are accepted as
//! link targets.

use url::Url;

/// URL 验证错误
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    MissingHost,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::MissingHost => write!(f, "URL must include a host"),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 验证链接目标 URL
///
/// 检查项目：
/// 1. URL 不为空
/// 2. 必须是 http:// 或 https://
/// 3. authority 部分必须带主机名（`http:///x` 会被 WHATWG 解析器"修正"，这里提前拒绝）
/// 4. URL 格式有效
pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let url_lower = url.to_lowercase();
    let rest = if let Some(rest) = url_lower.strip_prefix("http://") {
        rest
    } else if let Some(rest) = url_lower.strip_prefix("https://") {
        rest
    } else {
        let proto = match url_lower.split_once(':') {
            Some((scheme, _)) => format!("{}:", scheme),
            None => String::new(),
        };
        return Err(UrlValidationError::InvalidProtocol(proto));
    };

    if authority_host(rest).is_empty() {
        return Err(UrlValidationError::MissingHost);
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}

/// Convenience wrapper over [`validate_url`].
pub fn is_valid_url(url: &str) -> bool {
    validate_url(url).is_ok()
}

/// Host portion of the text following `scheme://`, without userinfo or port.
fn authority_host(rest: &str) -> &str {
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    if host_port.starts_with('[') {
        return host_port;
    }
    host_port.split(':').next().unwrap_or("")
}

/// 获取 URL 验证错误的用户友好消息
pub fn validation_error_message(error: &UrlValidationError) -> &'static str {
    match error {
        UrlValidationError::EmptyUrl => "URL cannot be empty",
        UrlValidationError::InvalidProtocol(_) => "URL must start with http:// or https://",
        UrlValidationError::MissingHost => "URL must include a host",
        UrlValidationError::InvalidFormat(_) => "Invalid URL format",
    }
}

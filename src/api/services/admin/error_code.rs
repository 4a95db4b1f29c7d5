//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::ShortUrlError;

/// API 错误码枚举
///
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 认证错误 2000-2099
    AuthFailed = 2000,

    // 链接错误 3000-3099
    LinkNotFound = 3000,
    LinkAlreadyExists = 3001,
    LinkInvalidInput = 3002,
    LinkDatabaseError = 3005,
    LinkGenerationFailed = 3008,
}

impl From<&ShortUrlError> for ErrorCode {
    fn from(err: &ShortUrlError) -> Self {
        match err {
            ShortUrlError::Validation(_) => ErrorCode::LinkInvalidInput,
            ShortUrlError::Duplicate(_) => ErrorCode::LinkAlreadyExists,
            ShortUrlError::NotFound(_) => ErrorCode::LinkNotFound,
            ShortUrlError::GenerationExhausted(_) => ErrorCode::LinkGenerationFailed,
            ShortUrlError::Storage(_) => ErrorCode::LinkDatabaseError,
            ShortUrlError::Config(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
        assert_eq!(
            serde_json::to_string(&ErrorCode::LinkAlreadyExists).unwrap(),
            "3001"
        );
    }

    #[test]
    fn test_from_error() {
        assert_eq!(
            ErrorCode::from(&ShortUrlError::duplicate("x")),
            ErrorCode::LinkAlreadyExists
        );
        assert_eq!(
            ErrorCode::from(&ShortUrlError::generation_exhausted("x")),
            ErrorCode::LinkGenerationFailed
        );
    }
}

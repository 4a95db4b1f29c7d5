//! Short code validation and generation
//!
//! Custom codes use a looser alphabet (`-` and `_` allowed) than generated
//! ones, which stay strictly alphanumeric.

use std::future::Future;
use std::iter;

use tracing::debug;

use crate::errors::{Result, ShortUrlError};

/// Alphabet for generated codes (62 symbols)
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const CUSTOM_MIN_LEN: usize = 3;
pub const CUSTOM_MAX_LEN: usize = 32;
pub const AUTO_MIN_LEN: usize = 4;
pub const AUTO_MAX_LEN: usize = 16;

/// Attempts made by [`generate_unique`] before giving up
pub const MAX_GENERATION_ATTEMPTS: usize = 20;

/// Admin-supplied code: 3-32 chars of `[A-Za-z0-9_-]`.
pub fn validate_custom(code: &str) -> bool {
    (CUSTOM_MIN_LEN..=CUSTOM_MAX_LEN).contains(&code.len())
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Generated code: 4-16 chars of `[A-Za-z0-9]`.
pub fn validate_auto(code: &str) -> bool {
    (AUTO_MIN_LEN..=AUTO_MAX_LEN).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Random alphanumeric string of `length` characters.
///
/// Each character is drawn with `random_range` over the thread-local CSPRNG,
/// which samples uniformly (no modulo bias towards the first symbols).
pub fn random_code(length: usize) -> String {
    iter::repeat_with(|| ALPHABET[rand::random_range(0..ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Draw codes until `exists` reports one as free.
///
/// `exists` is the uniqueness oracle (normally backed by the link store).
/// A free answer is only a hint: another request may insert the same code
/// before ours, so callers still have to handle a duplicate on insert.
pub async fn generate_unique<F, Fut>(length: usize, mut exists: F) -> Result<String>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    if !(AUTO_MIN_LEN..=AUTO_MAX_LEN).contains(&length) {
        return Err(ShortUrlError::validation(format!(
            "generated code length must be between {} and {}, got {}",
            AUTO_MIN_LEN, AUTO_MAX_LEN, length
        )));
    }

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let code = random_code(length);
        if !validate_auto(&code) {
            continue;
        }
        if !exists(code.clone()).await? {
            return Ok(code);
        }
        debug!("Generated code collided (attempt {})", attempt);
    }

    Err(ShortUrlError::generation_exhausted(format!(
        "no free code of length {} after {} attempts",
        length, MAX_GENERATION_ATTEMPTS
    )))
}

//! Base58 key codec and wish validation.
//!
//! Sequential keys are the base58 rendering of a monotonically increasing
//! counter. The alphabet drops `0`, `O`, `I` and `l` so keys survive being
//! read aloud or copied by hand.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Symbols in ascending digit order.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const BASE: u64 = ALPHABET.len() as u64;

/// Counter value of the first sequential key. Lower values stay unused.
pub const SEQUENCE_START: u64 = 8;

/// Longest accepted custom key.
pub const MAX_WISH_LENGTH: usize = 32;

/// Path segments owned by other routes.
const RESERVED_KEYS: &[&str] = &["api", "health", "static"];

static WISH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("wish pattern compiles"));

/// Encodes a counter value as a base58 key.
///
/// `encode(0)` is the first alphabet symbol; no other value gets a leading
/// zero digit.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(encode(0), "1");
/// assert_eq!(encode(8), "9");
/// assert_eq!(encode(58), "21");
/// ```
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    // 58^11 > u64::MAX
    let mut buf = [0u8; 11];
    let mut i = buf.len();
    while n > 0 {
        i -= 1;
        buf[i] = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }

    buf[i..].iter().map(|&b| b as char).collect()
}

/// Decodes a base58 key back into its counter value.
///
/// Leading zero digits are accepted, so `"19"` decodes like `"9"`.
///
/// # Errors
///
/// Returns [`AppError::InvalidKeyFormat`] if the key is empty, contains a
/// symbol outside [`ALPHABET`], or does not fit in a `u64`.
pub fn decode(key: &str) -> Result<u64, AppError> {
    if key.is_empty() {
        return Err(AppError::invalid_key(key));
    }

    key.bytes().try_fold(0u64, |acc, byte| {
        let digit = ALPHABET
            .iter()
            .position(|&symbol| symbol == byte)
            .ok_or_else(|| AppError::invalid_key(key))?;

        acc.checked_mul(BASE)
            .and_then(|v| v.checked_add(digit as u64))
            .ok_or_else(|| AppError::invalid_key(key))
    })
}

/// True if `key` would be shadowed by another route.
pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Validates a caller-chosen key.
///
/// # Rules
///
/// - Length: 1-32 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Cannot be a reserved route segment
///
/// Wishes do not have to be valid base58.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_wish(wish: &str) -> Result<(), AppError> {
    if wish.is_empty() || wish.len() > MAX_WISH_LENGTH {
        return Err(AppError::bad_request(
            "Wish must be 1-32 characters",
            json!({ "provided_length": wish.len() }),
        ));
    }

    if !WISH_REGEX.is_match(wish) {
        return Err(AppError::bad_request(
            "Wish can only contain letters, digits, '_' and '-'",
            json!({ "wish": wish }),
        ));
    }

    if is_reserved(wish) {
        return Err(AppError::bad_request(
            "This key is reserved",
            json!({ "wish": wish }),
        ));
    }

    Ok(())
}

//! Field format rules
//!
//! Each validator is a pure function from raw field text to either the
//! normalized value or a [`ValidationFailure`].

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ValidationFailure;
use crate::types::RecordId;

// =============================================================================
// PATTERNS
// =============================================================================

/// 12-byte object identifier in hex
static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap());

/// Spanish alphabet letters and spaces
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ ]+$").unwrap());

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

// =============================================================================
// VALIDATORS
// =============================================================================

/// Identifier: exactly 24 hex characters. Empty text is reported separately.
pub fn validate_id(text: &str) -> Result<RecordId, ValidationFailure> {
    if text.is_empty() {
        return Err(ValidationFailure::EmptyId);
    }
    if !ID_RE.is_match(text) {
        return Err(ValidationFailure::MalformedId);
    }
    Ok(RecordId::from_validated(text))
}

/// Name: letters (including á é í ó ú ñ) and spaces, at least one letter.
/// The normalized value is the trimmed text.
pub fn validate_name(text: &str) -> Result<String, ValidationFailure> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !NAME_RE.is_match(text) {
        return Err(ValidationFailure::InvalidName);
    }
    Ok(trimmed.to_string())
}

/// Phone: exactly ten ASCII digits, no separators
pub fn validate_phone(text: &str) -> Result<u64, ValidationFailure> {
    if !PHONE_RE.is_match(text) {
        return Err(ValidationFailure::InvalidPhone);
    }
    text.parse::<u64>()
        .map_err(|_| ValidationFailure::InvalidPhone)
}

/// Age: a base-10 integer strictly greater than zero.
///
/// Surrounding whitespace is ignored. The sign is decided from the digits,
/// so any negative or zero integer is `NonPositiveAge` whatever its width;
/// a positive value too large to store is `AgeOutOfRange`.
pub fn validate_age(text: &str) -> Result<u32, ValidationFailure> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationFailure::NotANumber);
    }
    if negative || digits.bytes().all(|b| b == b'0') {
        return Err(ValidationFailure::NonPositiveAge);
    }
    digits
        .parse::<u32>()
        .map_err(|_| ValidationFailure::AgeOutOfRange)
}

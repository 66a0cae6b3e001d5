//! Base64URL transcoding
//!
//! The authentication service ships every binary ceremony field as unpadded
//! base64url text. Decoding is tolerant of missing padding; encoding always
//! produces the unpadded URL-safe form.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::Engine;

/// Standard alphabet, canonical padding, lenient about the unused bits in the
/// final quantum (browsers' `atob` ignores them as well).
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Malformed base64url input
#[derive(Debug, thiserror::Error)]
#[error("invalid base64url data: {source}")]
pub struct DecodeError {
    #[from]
    source: base64::DecodeError,
}

/// Rewrite base64url text into padded standard base64
fn to_standard_base64(text: &str) -> String {
    let mut normalized: String = text
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }
    normalized
}

/// Decode base64url text (padding optional) into raw bytes
///
/// # Errors
///
/// Returns a `DecodeError` if the normalized text contains characters outside
/// the base64 alphabet or has a length no padding can repair.
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(STANDARD_LENIENT.decode(to_standard_base64(text))?)
}

/// Encode raw bytes as unpadded base64url text
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

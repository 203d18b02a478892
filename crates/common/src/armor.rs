//! Base64 text armor for moving keys and containers through text channels.
//!
//! The armored form is standard padded base64. Surrounding whitespace
//! (trailing newlines from shells and files) is ignored when dearmoring.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Errors produced when dearmoring text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArmorError {
    /// The input was empty after trimming whitespace.
    #[error("armored input is empty")]
    Empty,

    /// The input is not valid base64.
    #[error("armored input is not valid base64")]
    InvalidEncoding,
}

/// Encode `bytes` into their armored text representation.
pub fn armor(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode armored text back into bytes.
///
/// # Errors
///
/// Returns [`ArmorError::Empty`] for blank input and
/// [`ArmorError::InvalidEncoding`] if the text is not base64.
pub fn dearmor(text: &str) -> Result<Vec<u8>, ArmorError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ArmorError::Empty);
    }
    STANDARD
        .decode(trimmed)
        .map_err(|_| ArmorError::InvalidEncoding)
}

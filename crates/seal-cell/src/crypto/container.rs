//! Container byte layout.
//!
//! ```text
//! [ salt: SALT_LEN ][ ciphertext: N ][ tag: TAG_LEN ]
//! ```
//!
//! All fields are fixed-width except the ciphertext, whose length is whatever
//! remains. The layout carries no context, so container length depends on the
//! message length alone.

use common::CellError;

use super::aead::TAG_LEN;
use crate::salt::SALT_LEN;

/// Fixed per-container overhead (salt + tag).
pub const OVERHEAD: usize = SALT_LEN + TAG_LEN;

/// Borrowed view of the three container fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SealedParts<'a> {
    pub salt: &'a [u8; SALT_LEN],
    pub ciphertext: &'a [u8],
    pub tag: &'a [u8; TAG_LEN],
}

/// Length of the container produced for a message of `message_len` bytes.
pub const fn sealed_len(message_len: usize) -> usize {
    message_len.saturating_add(OVERHEAD)
}

/// Lay out salt, ciphertext and tag into one buffer.
pub fn encode(salt: &[u8; SALT_LEN], ciphertext: &[u8], tag: &[u8; TAG_LEN]) -> Vec<u8> {
    let mut out = Vec::with_capacity(sealed_len(ciphertext.len()));
    out.extend_from_slice(salt);
    out.extend_from_slice(ciphertext);
    out.extend_from_slice(tag);
    out
}

/// Split a container into its fields.
///
/// Only structure is checked here; authenticity is left to the tag.
///
/// # Errors
///
/// Returns [`CellError::InvalidArgument`] for an empty buffer and
/// [`CellError::MalformedContainer`] if it cannot hold a salt and a tag.
pub fn decode(bytes: &[u8]) -> Result<SealedParts<'_>, CellError> {
    if bytes.is_empty() {
        return Err(CellError::InvalidArgument("container must not be empty"));
    }
    if bytes.len() < OVERHEAD {
        return Err(CellError::MalformedContainer);
    }

    let (salt, rest) = bytes.split_at(SALT_LEN);
    let (ciphertext, tag) = rest.split_at(rest.len() - TAG_LEN);

    let salt = salt.try_into().map_err(|_| CellError::MalformedContainer)?;
    let tag = tag.try_into().map_err(|_| CellError::MalformedContainer)?;

    Ok(SealedParts {
        salt,
        ciphertext,
        tag,
    })
}

//! [`KeyMaterial`]: validated master key bytes held by a cell.

use std::fmt;

use common::CellError;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of keys produced by [`KeyMaterial::generate`] (32 bytes = 256 bits).
pub const DEFAULT_KEY_LEN: usize = 32;

/// Largest key [`KeyMaterial::generate_with_len`] will produce.
pub const MAX_GENERATED_KEY_LEN: usize = 4096;

/// Master key bytes for a Secure Cell.
///
/// Any non-empty length is accepted: the bytes seed key derivation and are
/// never used directly as a cipher key, so they are neither truncated nor
/// padded. The buffer is overwritten with zeroes on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial(Vec<u8>);

impl KeyMaterial {
    /// Copy caller-supplied key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidArgument`] if `bytes` is empty.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CellError> {
        if bytes.is_empty() {
            return Err(CellError::InvalidArgument("key must not be empty"));
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Generate a fresh [`DEFAULT_KEY_LEN`]-byte key from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::RandomnessUnavailable`] if the OS random source fails.
    pub fn generate() -> Result<Self, CellError> {
        Self::generate_with_len(DEFAULT_KEY_LEN)
    }

    /// Generate a fresh key of `len` bytes from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidArgument`] if `len` is zero or above
    /// [`MAX_GENERATED_KEY_LEN`], and [`CellError::RandomnessUnavailable`] if
    /// the OS random source fails.
    pub fn generate_with_len(len: usize) -> Result<Self, CellError> {
        if len == 0 {
            return Err(CellError::InvalidArgument("key length must be non-zero"));
        }
        if len > MAX_GENERATED_KEY_LEN {
            return Err(CellError::InvalidArgument("key length exceeds 4096 bytes"));
        }
        let mut buf = vec![0u8; len];
        getrandom::getrandom(&mut buf)
            .map_err(|e| CellError::RandomnessUnavailable(e.to_string()))?;
        Ok(Self(buf))
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for KeyMaterial {
    type Error = CellError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<Vec<u8>> for KeyMaterial {
    type Error = CellError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            return Err(CellError::InvalidArgument("key must not be empty"));
        }
        Ok(Self(bytes))
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("KeyMaterial([REDACTED])")
    }
}

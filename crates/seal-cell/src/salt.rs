//! Per-call salt generation.

use common::CellError;

/// Byte length of the salt stored at the front of every container.
pub const SALT_LEN: usize = 32;

/// Source of fresh salts.
///
/// The engine asks for exactly one salt per encryption and never caches or
/// reuses it. Implementations must be safe to call from many threads at once.
#[cfg_attr(test, mockall::automock)]
pub trait SaltSource: Send + Sync {
    /// Overwrite `salt` with fresh unpredictable bytes.
    fn fill_salt(&self, salt: &mut [u8; SALT_LEN]) -> Result<(), CellError>;
}

/// [`SaltSource`] backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSaltSource;

impl SaltSource for OsSaltSource {
    fn fill_salt(&self, salt: &mut [u8; SALT_LEN]) -> Result<(), CellError> {
        getrandom::getrandom(salt).map_err(|e| CellError::RandomnessUnavailable(e.to_string()))
    }
}

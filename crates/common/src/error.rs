//! Error taxonomy shared by the Secure Cell library and its tools.

use thiserror::Error;

/// Message rendered for every failure that happens after the caller's inputs
/// were accepted. Structural and cryptographic rejections share it.
pub const SECURE_CELL_FAILURE: &str = "Secure Cell failed to process data";

/// Errors produced by Secure Cell operations.
///
/// Every variant is terminal for the operation that raised it: retrying with
/// the same inputs fails the same way.
///
/// Variants map to process exit codes used by the `seal` tool:
/// - [`CellError::NullArgument`], [`CellError::InvalidArgument`] → 2
/// - [`CellError::MalformedContainer`], [`CellError::AuthenticationFailure`] → 1
/// - [`CellError::RandomnessUnavailable`] → 3
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CellError {
    /// A required input (key, message, container) was not supplied at all.
    #[error("required input is missing: {0}")]
    NullArgument(&'static str),

    /// A required input was supplied but is unusable, e.g. zero-length.
    #[error("invalid input: {0}")]
    InvalidArgument(&'static str),

    /// The container violates the byte layout (too short to hold salt and tag).
    #[error("{}", SECURE_CELL_FAILURE)]
    MalformedContainer,

    /// The container is well-formed but its tag did not verify. Covers wrong
    /// context, wrong key, corruption and tampering alike.
    #[error("{}", SECURE_CELL_FAILURE)]
    AuthenticationFailure,

    /// The OS random source could not produce a salt or key.
    #[error("secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),
}

impl CellError {
    /// Returns `true` for the failures surfaced to callers as a single opaque
    /// Secure Cell failure.
    pub fn is_secure_cell_failure(&self) -> bool {
        matches!(
            self,
            CellError::MalformedContainer | CellError::AuthenticationFailure
        )
    }

    /// Returns the process exit code that should be used for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CellError::NullArgument(_) | CellError::InvalidArgument(_) => 2,
            CellError::MalformedContainer | CellError::AuthenticationFailure => 1,
            CellError::RandomnessUnavailable(_) => 3,
        }
    }

    /// Short machine-readable name of the error kind, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            CellError::NullArgument(_) => "null_argument",
            CellError::InvalidArgument(_) => "invalid_argument",
            CellError::MalformedContainer => "malformed_container",
            CellError::AuthenticationFailure => "authentication_failure",
            CellError::RandomnessUnavailable(_) => "randomness_unavailable",
        }
    }
}

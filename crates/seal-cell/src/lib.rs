//! Secure Cell, Seal mode: symmetric authenticated encryption bound to an
//! optional context.
//!
//! A cell is keyed once with a master secret (raw key bytes or a passphrase)
//! and then seals messages into self-contained containers:
//!
//! ```text
//! [ salt: 32 ][ ciphertext: len(message) ][ tag: 32 ]
//! ```
//!
//! Every encryption draws a fresh salt from which a per-message encryption key
//! and authentication key are derived. The context is authenticated but never
//! stored, so it must be presented again to decrypt.
//!
//! ```rust
//! use seal_cell::SecureCellSeal;
//!
//! let cell = SecureCellSeal::with_key(b"a key of any non-zero length")?;
//! let sealed = cell.encrypt(b"message", Some(&b"user 42"[..]))?;
//! assert_eq!(cell.decrypt(&sealed, Some(&b"user 42"[..]))?, b"message");
//! assert!(cell.decrypt(&sealed, Some(&b"user 43"[..])).is_err());
//! # Ok::<(), seal_cell::CellError>(())
//! ```
//!
//! # Security invariants
//!
//! - Tags are verified in constant time before any plaintext is produced.
//! - Malformed containers, wrong contexts, wrong keys and tampering all end in
//!   one opaque failure message.
//! - Key material and derived keys are zeroized on drop and print as
//!   `[REDACTED]`; log events carry lengths and error kinds only.

pub mod cell;
pub mod crypto;
pub mod key;
pub mod legacy;
pub mod salt;
pub mod secret;

mod engine;

pub use cell::SecureCellSeal;
pub use common::CellError;
pub use crypto::{sealed_len, OVERHEAD, TAG_LEN};
pub use key::{KeyMaterial, DEFAULT_KEY_LEN, MAX_GENERATED_KEY_LEN};
pub use legacy::LegacySeal;
pub use salt::{OsSaltSource, SaltSource, SALT_LEN};
pub use secret::{MasterSecret, PassphraseParams, PassphraseSecret};

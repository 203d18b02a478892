//! Cryptographic core of Seal mode.
//!
//! This module is free of I/O and randomness: callers hand in the salt and the
//! master secret, and every function is a pure function of its inputs.
//!
//! # Pipeline
//!
//! ```text
//! encrypt: salt ─► kdf ─► aead::encrypt ─► container::encode
//! decrypt: container::decode ─► kdf(salt) ─► aead::decrypt (verify, then decrypt)
//! ```
//!
//! The context never enters the container; it only feeds the tag through
//! [`AssociatedData`].

pub mod aead;
pub mod container;
pub mod context;
pub mod kdf;

pub use aead::TAG_LEN;
pub use container::{sealed_len, SealedParts, OVERHEAD};
pub use context::AssociatedData;
pub use kdf::{DerivedKeys, Domain, DERIVED_KEY_LEN};

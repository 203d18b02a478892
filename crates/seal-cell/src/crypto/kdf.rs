//! Per-message key derivation with HKDF-SHA256.
//!
//! The master secret is the input keying material and the container salt is
//! the HKDF salt. Two expansions with distinct labels yield the encryption key
//! and the authentication key; neither output reveals the other or the master
//! secret, and a fresh salt yields an unlinkable pair.

use std::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::salt::SALT_LEN;

/// Byte length of each derived key.
pub const DERIVED_KEY_LEN: usize = 32;

const KEY_ENCRYPTION_LABEL: &[u8] = b"secure-cell/seal/v1/key/encryption";
const KEY_AUTHENTICATION_LABEL: &[u8] = b"secure-cell/seal/v1/key/authentication";
const PASSPHRASE_ENCRYPTION_LABEL: &[u8] = b"secure-cell/seal/v1/passphrase/encryption";
const PASSPHRASE_AUTHENTICATION_LABEL: &[u8] = b"secure-cell/seal/v1/passphrase/authentication";

/// Which kind of master secret the keys are derived from.
///
/// Each domain has its own labels, so a raw key and a passphrase with the
/// same bytes never derive the same keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Raw key bytes.
    Key,
    /// Argon2id-stretched passphrase.
    Passphrase,
}

impl Domain {
    fn labels(self) -> (&'static [u8], &'static [u8]) {
        match self {
            Domain::Key => (KEY_ENCRYPTION_LABEL, KEY_AUTHENTICATION_LABEL),
            Domain::Passphrase => (PASSPHRASE_ENCRYPTION_LABEL, PASSPHRASE_AUTHENTICATION_LABEL),
        }
    }
}

/// Encryption and authentication keys for a single container.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeys {
    encryption: [u8; DERIVED_KEY_LEN],
    authentication: [u8; DERIVED_KEY_LEN],
}

impl DerivedKeys {
    /// Derive the key pair for `salt` from `master`.
    ///
    /// Total over every master length, including the empty slice.
    pub fn derive(master: &[u8], salt: &[u8; SALT_LEN], domain: Domain) -> Self {
        let hkdf = Hkdf::<Sha256>::new(Some(&salt[..]), master);
        let (encryption_label, authentication_label) = domain.labels();

        let mut keys = Self {
            encryption: [0u8; DERIVED_KEY_LEN],
            authentication: [0u8; DERIVED_KEY_LEN],
        };
        expand(&hkdf, encryption_label, &mut keys.encryption);
        expand(&hkdf, authentication_label, &mut keys.authentication);
        keys
    }

    /// Key for the stream cipher.
    pub fn encryption(&self) -> &[u8; DERIVED_KEY_LEN] {
        &self.encryption
    }

    /// Key for the MAC.
    pub fn authentication(&self) -> &[u8; DERIVED_KEY_LEN] {
        &self.authentication
    }
}

impl fmt::Debug for DerivedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKeys([REDACTED])")
    }
}

fn expand(hkdf: &Hkdf<Sha256>, info: &[u8], out: &mut [u8; DERIVED_KEY_LEN]) {
    let Ok(()) = hkdf.expand(info, out) else {
        unreachable!("32 bytes is a valid HKDF-SHA256 output length");
    };
}

//! Master secrets a cell can be keyed with: raw key bytes or a passphrase.

use std::fmt;

use argon2::{Algorithm, Argon2, Params, Version};
use common::CellError;
use zeroize::Zeroizing;

use crate::crypto::kdf::{DerivedKeys, Domain, DERIVED_KEY_LEN};
use crate::key::KeyMaterial;
use crate::salt::SALT_LEN;

/// Argon2id cost parameters for passphrase-keyed cells.
///
/// Not stored in containers: the same parameters must be used to decrypt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassphraseParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub passes: u32,
    /// Degree of parallelism.
    pub lanes: u32,
}

impl Default for PassphraseParams {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            passes: 2,
            lanes: 1,
        }
    }
}

impl PassphraseParams {
    fn to_argon2(self) -> Result<Params, CellError> {
        Params::new(
            self.memory_kib,
            self.passes,
            self.lanes,
            Some(DERIVED_KEY_LEN),
        )
        .map_err(|_| CellError::InvalidArgument("passphrase parameters out of range"))
    }
}

/// Secret a cell derives its per-message keys from.
///
/// Both variants hold already validated material: [`KeyMaterial`] is never
/// empty, and a [`PassphraseSecret`] can only be built through
/// [`MasterSecret::passphrase`].
///
/// ```compile_fail
/// use seal_cell::secret::{MasterSecret, PassphraseSecret};
///
/// let secret = MasterSecret::Passphrase(PassphraseSecret {
///     passphrase: Default::default(),
///     params: Default::default(),
/// });
/// ```
pub enum MasterSecret {
    /// Raw key bytes, fed straight into HKDF.
    Key(KeyMaterial),
    /// Passphrase stretched with Argon2id over the per-call salt first.
    Passphrase(PassphraseSecret),
}

/// Non-empty passphrase together with its Argon2id costs.
pub struct PassphraseSecret {
    passphrase: Zeroizing<Vec<u8>>,
    params: Params,
}

impl PassphraseSecret {
    fn new(passphrase: &[u8], params: PassphraseParams) -> Result<Self, CellError> {
        if passphrase.is_empty() {
            return Err(CellError::InvalidArgument("passphrase must not be empty"));
        }
        Ok(Self {
            passphrase: Zeroizing::new(passphrase.to_vec()),
            params: params.to_argon2()?,
        })
    }

    fn stretch(&self, salt: &[u8; SALT_LEN]) -> Result<Zeroizing<[u8; DERIVED_KEY_LEN]>, CellError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());
        let mut stretched = Zeroizing::new([0u8; DERIVED_KEY_LEN]);
        argon2
            .hash_password_into(&self.passphrase, salt, &mut stretched[..])
            .map_err(|_| CellError::InvalidArgument("passphrase could not be stretched"))?;
        Ok(stretched)
    }
}

impl MasterSecret {
    /// Key a cell with raw key bytes.
    pub fn key(key: KeyMaterial) -> Self {
        MasterSecret::Key(key)
    }

    /// Key a cell with a passphrase.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidArgument`] if `passphrase` is empty or the
    /// cost parameters are rejected by Argon2.
    pub fn passphrase(passphrase: &[u8], params: PassphraseParams) -> Result<Self, CellError> {
        PassphraseSecret::new(passphrase, params).map(MasterSecret::Passphrase)
    }

    /// Derive the key pair for one container.
    pub(crate) fn derive(&self, salt: &[u8; SALT_LEN]) -> Result<DerivedKeys, CellError> {
        match self {
            MasterSecret::Key(key) => Ok(DerivedKeys::derive(key.as_bytes(), salt, Domain::Key)),
            MasterSecret::Passphrase(secret) => {
                let stretched = secret.stretch(salt)?;
                Ok(DerivedKeys::derive(&stretched[..], salt, Domain::Passphrase))
            }
        }
    }

    fn mode(&self) -> &'static str {
        match self {
            MasterSecret::Key(_) => "key",
            MasterSecret::Passphrase(_) => "passphrase",
        }
    }
}

impl From<KeyMaterial> for MasterSecret {
    fn from(key: KeyMaterial) -> Self {
        MasterSecret::Key(key)
    }
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MasterSecret::{}([REDACTED])", self.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_params() -> PassphraseParams {
        PassphraseParams {
            memory_kib: 64,
            passes: 1,
            lanes: 1,
        }
    }

    #[test]
    fn empty_passphrase_rejected() {
        assert_eq!(
            MasterSecret::passphrase(b"", light_params()).unwrap_err(),
            CellError::InvalidArgument("passphrase must not be empty")
        );
    }

    #[test]
    fn out_of_range_params_rejected() {
        let params = PassphraseParams {
            memory_kib: 1,
            passes: 0,
            lanes: 0,
        };
        assert!(matches!(
            MasterSecret::passphrase(b"pw", params),
            Err(CellError::InvalidArgument(_))
        ));
    }

    #[test]
    fn passphrase_derivation_is_deterministic_per_salt() {
        let secret = MasterSecret::passphrase(b"correct horse", light_params()).unwrap();
        let a = secret.derive(&[1u8; SALT_LEN]).unwrap();
        let b = secret.derive(&[1u8; SALT_LEN]).unwrap();
        let c = secret.derive(&[2u8; SALT_LEN]).unwrap();
        assert_eq!(a.encryption(), b.encryption());
        assert_ne!(a.encryption(), c.encryption());
    }

    #[test]
    fn key_and_passphrase_with_same_bytes_derive_different_keys() {
        let bytes = b"identical secret bytes";
        let key = MasterSecret::key(KeyMaterial::from_bytes(bytes).unwrap());
        let pass = MasterSecret::passphrase(bytes, light_params()).unwrap();
        let salt = [7u8; SALT_LEN];
        assert_ne!(
            key.derive(&salt).unwrap().authentication(),
            pass.derive(&salt).unwrap().authentication()
        );
    }

    #[test]
    fn passphrase_variant_is_built_only_through_validation() {
        use crate::salt::OsSaltSource;
        use crate::SecureCellSeal;

        assert!(matches!(
            MasterSecret::passphrase(b"", PassphraseParams::default()),
            Err(CellError::InvalidArgument(_))
        ));

        let secret = MasterSecret::passphrase(b" ", light_params()).unwrap();
        assert!(matches!(secret, MasterSecret::Passphrase(_)));
        let cell = SecureCellSeal::with_salt_source(secret, OsSaltSource);
        let sealed = cell.encrypt(b"m", None).unwrap();
        assert_eq!(cell.decrypt(&sealed, None).unwrap(), b"m");
    }

    #[test]
    fn debug_names_mode_only() {
        let secret = MasterSecret::passphrase(b"hunter2", light_params()).unwrap();
        let printed = format!("{secret:?}");
        assert_eq!(printed, "MasterSecret::passphrase([REDACTED])");
    }

    #[test]
    fn default_params_are_accepted() {
        assert!(PassphraseParams::default().to_argon2().is_ok());
    }
}

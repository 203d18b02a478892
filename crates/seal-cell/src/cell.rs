//! [`SecureCellSeal`]: the encrypt/decrypt facade.

use std::fmt;
use std::sync::Arc;

use common::CellError;

use crate::crypto::container;
use crate::engine::SealEngine;
use crate::key::KeyMaterial;
use crate::legacy::LegacySeal;
use crate::salt::{OsSaltSource, SaltSource};
use crate::secret::{MasterSecret, PassphraseParams};

/// Secure Cell in Seal mode.
///
/// Each [`encrypt`](Self::encrypt) call draws a fresh salt, so sealing the same
/// message twice yields different containers. The optional context is bound
/// into the tag and must be supplied again, byte for byte, to
/// [`decrypt`](Self::decrypt). Absent and empty contexts are equivalent.
///
/// Cloning is cheap and clones share the same engine; a cell may be used from
/// many threads at once.
pub struct SecureCellSeal<S: SaltSource = OsSaltSource> {
    engine: Arc<SealEngine<S>>,
}

impl SecureCellSeal {
    /// Build a cell keyed with raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidArgument`] if `key` is empty.
    pub fn with_key(key: impl AsRef<[u8]>) -> Result<Self, CellError> {
        let key = KeyMaterial::from_bytes(key.as_ref())?;
        Ok(Self::with_key_material(key))
    }

    /// Build a cell keyed with a freshly generated [`DEFAULT_KEY_LEN`]-byte
    /// key. The key is returned alongside the cell so it can be stored.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::RandomnessUnavailable`] if the OS random source
    /// fails.
    ///
    /// [`DEFAULT_KEY_LEN`]: crate::DEFAULT_KEY_LEN
    pub fn generate() -> Result<(Self, KeyMaterial), CellError> {
        let key = KeyMaterial::generate()?;
        Ok((Self::with_key_material(key.clone()), key))
    }

    /// Build a cell from already validated key material.
    pub fn with_key_material(key: KeyMaterial) -> Self {
        Self::with_salt_source(MasterSecret::key(key), OsSaltSource)
    }

    /// Build a cell keyed with a passphrase and default Argon2id costs.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidArgument`] if `passphrase` is empty.
    pub fn with_passphrase(passphrase: impl AsRef<[u8]>) -> Result<Self, CellError> {
        Self::with_passphrase_params(passphrase, PassphraseParams::default())
    }

    /// Build a cell keyed with a passphrase and explicit Argon2id costs.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidArgument`] if `passphrase` is empty or
    /// `params` are out of range.
    pub fn with_passphrase_params(
        passphrase: impl AsRef<[u8]>,
        params: PassphraseParams,
    ) -> Result<Self, CellError> {
        let secret = MasterSecret::passphrase(passphrase.as_ref(), params)?;
        Ok(Self::with_salt_source(secret, OsSaltSource))
    }
}

impl<S: SaltSource> SecureCellSeal<S> {
    /// Build a cell drawing salts from `salts`.
    pub fn with_salt_source(secret: MasterSecret, salts: S) -> Self {
        Self {
            engine: Arc::new(SealEngine::new(secret, salts)),
        }
    }

    /// Encrypt `message`, binding it to `context`.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidArgument`] if `message` is empty and
    /// [`CellError::RandomnessUnavailable`] if no salt could be drawn.
    pub fn encrypt(&self, message: &[u8], context: Option<&[u8]>) -> Result<Vec<u8>, CellError> {
        self.engine.seal(message, context)
    }

    /// Decrypt a container produced under the same secret and `context`.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidArgument`] if `sealed` is empty,
    /// [`CellError::MalformedContainer`] if it is too short, and
    /// [`CellError::AuthenticationFailure`] for any other mismatch.
    pub fn decrypt(&self, sealed: &[u8], context: Option<&[u8]>) -> Result<Vec<u8>, CellError> {
        self.engine.open(sealed, context)
    }

    /// Container length for a message of `message_len` bytes.
    pub fn sealed_len(&self, message_len: usize) -> usize {
        container::sealed_len(message_len)
    }

    /// Protect/unprotect view over the same engine.
    pub fn legacy(&self) -> LegacySeal<S> {
        LegacySeal::from_engine(Arc::clone(&self.engine))
    }
}

impl<S: SaltSource> Clone for SecureCellSeal<S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<S: SaltSource> fmt::Debug for SecureCellSeal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureCellSeal")
            .field("engine", &self.engine)
            .finish()
    }
}

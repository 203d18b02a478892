//! [`LegacySeal`]: the older protect/unprotect call shape.
//!
//! Inputs arrive as they would from a binding layer: possibly unset. Unset
//! inputs fail with [`CellError::NullArgument`], empty ones with
//! [`CellError::InvalidArgument`]. Everything else is delegated to the same
//! engine as [`SecureCellSeal`](crate::SecureCellSeal), so containers from
//! either facade open with the other.

use std::fmt;
use std::sync::Arc;

use common::CellError;

use crate::engine::SealEngine;
use crate::key::KeyMaterial;
use crate::salt::{OsSaltSource, SaltSource};
use crate::secret::MasterSecret;

/// Protect/unprotect facade over a Seal engine.
pub struct LegacySeal<S: SaltSource = OsSaltSource> {
    engine: Arc<SealEngine<S>>,
}

impl LegacySeal {
    /// Build a legacy cell from possibly-unset key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::NullArgument`] if `key` is `None` and
    /// [`CellError::InvalidArgument`] if it is empty.
    pub fn with_key(key: Option<&[u8]>) -> Result<Self, CellError> {
        let key = require(key, "key", "key must not be empty")?;
        let key = KeyMaterial::from_bytes(key)?;
        Ok(Self::from_engine(Arc::new(SealEngine::new(
            MasterSecret::key(key),
            OsSaltSource,
        ))))
    }
}

impl<S: SaltSource> LegacySeal<S> {
    pub(crate) fn from_engine(engine: Arc<SealEngine<S>>) -> Self {
        Self { engine }
    }

    /// Encrypt `message` bound to `context`.
    pub fn protect(
        &self,
        message: Option<&[u8]>,
        context: Option<&[u8]>,
    ) -> Result<Vec<u8>, CellError> {
        let message = require(message, "message", "message must not be empty")?;
        self.engine.seal(message, context)
    }

    /// Verify and decrypt `sealed` under `context`.
    pub fn unprotect(
        &self,
        sealed: Option<&[u8]>,
        context: Option<&[u8]>,
    ) -> Result<Vec<u8>, CellError> {
        let sealed = require(sealed, "container", "container must not be empty")?;
        self.engine.open(sealed, context)
    }
}

impl<S: SaltSource> Clone for LegacySeal<S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<S: SaltSource> fmt::Debug for LegacySeal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacySeal")
            .field("engine", &self.engine)
            .finish()
    }
}

fn require<'a>(
    input: Option<&'a [u8]>,
    name: &'static str,
    empty: &'static str,
) -> Result<&'a [u8], CellError> {
    match input {
        None => Err(CellError::NullArgument(name)),
        Some([]) => Err(CellError::InvalidArgument(empty)),
        Some(bytes) => Ok(bytes),
    }
}

//! [`SealEngine`]: the one implementation behind every Seal facade.

use std::fmt;

use common::CellError;
use tracing::{debug, trace};

use crate::crypto::{aead, container, AssociatedData};
use crate::salt::{SaltSource, SALT_LEN};
use crate::secret::MasterSecret;

/// Master secret plus salt source. Holds no other state, so a shared
/// reference can serve any number of concurrent callers.
pub(crate) struct SealEngine<S> {
    secret: MasterSecret,
    salts: S,
}

impl<S: SaltSource> SealEngine<S> {
    pub(crate) fn new(secret: MasterSecret, salts: S) -> Self {
        Self { secret, salts }
    }

    /// Encrypt `message` bound to `context` into a fresh container.
    pub(crate) fn seal(&self, message: &[u8], context: Option<&[u8]>) -> Result<Vec<u8>, CellError> {
        // Reject before drawing a salt.
        if message.is_empty() {
            return Err(CellError::InvalidArgument("message must not be empty"));
        }
        let ad = AssociatedData::normalize(context);

        let mut salt = [0u8; SALT_LEN];
        self.salts
            .fill_salt(&mut salt)
            .inspect_err(|e| debug!(kind = e.kind(), "salt generation failed"))?;

        let keys = self.secret.derive(&salt)?;
        let (ciphertext, tag) = aead::encrypt(message, &keys, ad)?;
        let sealed = container::encode(&salt, &ciphertext, &tag);

        trace!(
            message_len = message.len(),
            context_len = ad.len(),
            container_len = sealed.len(),
            "sealed message"
        );
        Ok(sealed)
    }

    /// Verify and decrypt `sealed` under `context`.
    pub(crate) fn open(&self, sealed: &[u8], context: Option<&[u8]>) -> Result<Vec<u8>, CellError> {
        let parts = container::decode(sealed)
            .inspect_err(|e| debug!(kind = e.kind(), container_len = sealed.len(), "rejected container"))?;
        let ad = AssociatedData::normalize(context);

        let keys = self.secret.derive(parts.salt)?;
        let message = aead::decrypt(parts.ciphertext, parts.tag, &keys, ad)
            .inspect_err(|e| debug!(kind = e.kind(), container_len = sealed.len(), "container failed verification"))?;

        trace!(
            container_len = sealed.len(),
            context_len = ad.len(),
            message_len = message.len(),
            "opened container"
        );
        Ok(message)
    }
}

impl<S> fmt::Debug for SealEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealEngine")
            .field("secret", &self.secret)
            .finish_non_exhaustive()
    }
}

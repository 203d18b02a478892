//! Encrypt-then-MAC with ChaCha20 and HMAC-SHA256.
//!
//! The keystream is keyed with the per-message encryption key, so the nonce is
//! a constant: the salt already makes every key unique. The tag covers
//!
//! ```text
//! ciphertext || associated data || u64_be(len(ciphertext))
//! ```
//!
//! The trailing length pins the boundary between ciphertext and associated
//! data. Decryption verifies the tag in constant time before any plaintext is
//! produced.

use chacha20::{
    cipher::{KeyIvInit, StreamCipher},
    ChaCha20,
};
use common::CellError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::context::AssociatedData;
use super::kdf::{DerivedKeys, DERIVED_KEY_LEN};

type HmacSha256 = Hmac<Sha256>;

/// Byte length of the authentication tag.
pub const TAG_LEN: usize = 32;

const NONCE: [u8; 12] = [0u8; 12];

/// Encrypt `message` and compute its tag.
///
/// # Errors
///
/// Returns [`CellError::InvalidArgument`] if `message` is empty.
pub fn encrypt(
    message: &[u8],
    keys: &DerivedKeys,
    ad: AssociatedData<'_>,
) -> Result<(Vec<u8>, [u8; TAG_LEN]), CellError> {
    if message.is_empty() {
        return Err(CellError::InvalidArgument("message must not be empty"));
    }

    let mut ciphertext = message.to_vec();
    apply_keystream(keys.encryption(), &mut ciphertext);

    let digest = keyed_mac(keys.authentication(), &ciphertext, ad)
        .finalize()
        .into_bytes();
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&digest);

    Ok((ciphertext, tag))
}

/// Verify `tag` and, only if it matches, decrypt `ciphertext`.
///
/// # Errors
///
/// Returns [`CellError::AuthenticationFailure`] if the tag does not match. The
/// cause (wrong context, wrong key, modified bytes) is not distinguished.
pub fn decrypt(
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
    keys: &DerivedKeys,
    ad: AssociatedData<'_>,
) -> Result<Vec<u8>, CellError> {
    keyed_mac(keys.authentication(), ciphertext, ad)
        .verify_slice(tag)
        .map_err(|_| CellError::AuthenticationFailure)?;

    let mut plaintext = ciphertext.to_vec();
    apply_keystream(keys.encryption(), &mut plaintext);
    Ok(plaintext)
}

fn apply_keystream(key: &[u8; DERIVED_KEY_LEN], buf: &mut [u8]) {
    let mut cipher = ChaCha20::new(key.into(), (&NONCE).into());
    cipher.apply_keystream(buf);
}

fn keyed_mac(key: &[u8; DERIVED_KEY_LEN], ciphertext: &[u8], ad: AssociatedData<'_>) -> HmacSha256 {
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        unreachable!("HMAC-SHA256 accepts any key size");
    };
    mac.update(ciphertext);
    mac.update(ad.as_bytes());
    mac.update(&(ciphertext.len() as u64).to_be_bytes());
    mac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::Domain;
    use crate::salt::SALT_LEN;

    fn keys(salt_byte: u8) -> DerivedKeys {
        DerivedKeys::derive(b"aead test master key", &[salt_byte; SALT_LEN], Domain::Key)
    }

    fn ad(bytes: &[u8]) -> AssociatedData<'_> {
        AssociatedData::normalize(Some(bytes))
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let keys = keys(1);
        let (ciphertext, tag) = encrypt(b"123-45-6789", &keys, ad(b"ctx")).unwrap();
        let plaintext = decrypt(&ciphertext, &tag, &keys, ad(b"ctx")).unwrap();
        assert_eq!(plaintext, b"123-45-6789");
    }

    #[test]
    fn ciphertext_has_message_length_and_differs() {
        let keys = keys(1);
        let message = b"the quick brown fox";
        let (ciphertext, _) = encrypt(message, &keys, AssociatedData::empty()).unwrap();
        assert_eq!(ciphertext.len(), message.len());
        assert_ne!(ciphertext.as_slice(), message.as_slice());
    }

    #[test]
    fn encryption_is_deterministic_for_fixed_keys() {
        let keys = keys(9);
        let a = encrypt(b"same", &keys, ad(b"x")).unwrap();
        let b = encrypt(b"same", &keys, ad(b"x")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_message_rejected() {
        assert_eq!(
            encrypt(b"", &keys(1), AssociatedData::empty()).unwrap_err(),
            CellError::InvalidArgument("message must not be empty")
        );
    }

    #[test]
    fn context_changes_tag_not_ciphertext() {
        let keys = keys(2);
        let (ct_a, tag_a) = encrypt(b"payload", &keys, ad(b"a")).unwrap();
        let (ct_b, tag_b) = encrypt(b"payload", &keys, ad(b"a much longer context")).unwrap();
        assert_eq!(ct_a, ct_b);
        assert_ne!(tag_a, tag_b);
    }

    #[test]
    fn wrong_context_fails_authentication() {
        let keys = keys(3);
        let (ciphertext, tag) = encrypt(b"payload", &keys, ad(b"right")).unwrap();
        assert_eq!(
            decrypt(&ciphertext, &tag, &keys, ad(b"wrong")).unwrap_err(),
            CellError::AuthenticationFailure
        );
    }

    #[test]
    fn wrong_keys_fail_authentication() {
        let (ciphertext, tag) = encrypt(b"payload", &keys(4), AssociatedData::empty()).unwrap();
        assert!(decrypt(&ciphertext, &tag, &keys(5), AssociatedData::empty()).is_err());
    }

    #[test]
    fn tampered_ciphertext_fails_authentication() {
        let keys = keys(6);
        let (mut ciphertext, tag) = encrypt(b"tamper me", &keys, AssociatedData::empty()).unwrap();
        ciphertext[0] ^= 0xFF;
        assert_eq!(
            decrypt(&ciphertext, &tag, &keys, AssociatedData::empty()).unwrap_err(),
            CellError::AuthenticationFailure
        );
    }

    #[test]
    fn tampered_tag_fails_authentication() {
        let keys = keys(7);
        let (ciphertext, mut tag) = encrypt(b"tamper me", &keys, AssociatedData::empty()).unwrap();
        tag[TAG_LEN - 1] ^= 0x01;
        assert!(decrypt(&ciphertext, &tag, &keys, AssociatedData::empty()).is_err());
    }

    #[test]
    fn bytes_cannot_move_between_ciphertext_and_context() {
        let keys = keys(8);
        let (ciphertext, tag) = encrypt(b"abcdef", &keys, ad(b"ctx")).unwrap();
        let (head, last) = ciphertext.split_at(ciphertext.len() - 1);
        let mut shifted_ad = last.to_vec();
        shifted_ad.extend_from_slice(b"ctx");
        assert!(decrypt(head, &tag, &keys, ad(&shifted_ad)).is_err());
    }
}

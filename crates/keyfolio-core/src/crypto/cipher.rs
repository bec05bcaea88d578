//! AES-GCM authenticated encryption
//!
//! Seal output is ciphertext with the 16-byte auth tag appended, which is
//! exactly the layout the envelope format carries. The key length picks the
//! AES variant: 16 -> AES-128-GCM, 24 -> AES-192-GCM, 32 -> AES-256-GCM.

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit, Nonce, Payload};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};

use super::DerivedKey;
use crate::error::{KeyFolioError, Result};

/// AES-GCM nonce size in bytes (96 bits, the only supported size)
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Encrypt `plaintext` binding `aad`, returning ciphertext with the tag
/// appended.
pub(crate) fn seal(
    key: &DerivedKey,
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    debug_assert_eq!(nonce.len(), NONCE_SIZE);
    let payload = Payload {
        msg: plaintext,
        aad,
    };
    match key.len() {
        16 => seal_with::<Aes128Gcm>(key.as_bytes(), nonce, payload),
        24 => seal_with::<Aes192Gcm>(key.as_bytes(), nonce, payload),
        32 => seal_with::<Aes256Gcm>(key.as_bytes(), nonce, payload),
        other => Err(KeyFolioError::Cryptographic(format!(
            "unsupported key size: {other} bytes"
        ))),
    }
}

/// Verify and decrypt `ciphertext_with_tag` under the same `aad` used at seal
/// time.
///
/// Wrong key, tampered ciphertext, tampered tag, and mismatched associated
/// data all produce the same "authentication failed" error.
pub(crate) fn open(
    key: &DerivedKey,
    nonce: &[u8],
    aad: &[u8],
    ciphertext_with_tag: &[u8],
) -> Result<Vec<u8>> {
    debug_assert_eq!(nonce.len(), NONCE_SIZE);
    let payload = Payload {
        msg: ciphertext_with_tag,
        aad,
    };
    match key.len() {
        16 => open_with::<Aes128Gcm>(key.as_bytes(), nonce, payload),
        24 => open_with::<Aes192Gcm>(key.as_bytes(), nonce, payload),
        32 => open_with::<Aes256Gcm>(key.as_bytes(), nonce, payload),
        other => Err(KeyFolioError::Cryptographic(format!(
            "unsupported key size: {other} bytes"
        ))),
    }
}

fn seal_with<C: Aead + KeyInit>(key: &[u8], nonce: &[u8], payload: Payload<'_, '_>) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key)
        .map_err(|_| KeyFolioError::Cryptographic("invalid key size".to_string()))?;
    cipher
        .encrypt(Nonce::<C>::from_slice(nonce), payload)
        .map_err(|_| KeyFolioError::Cryptographic("encryption failed".to_string()))
}

fn open_with<C: Aead + KeyInit>(key: &[u8], nonce: &[u8], payload: Payload<'_, '_>) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key)
        .map_err(|_| KeyFolioError::Cryptographic("invalid key size".to_string()))?;
    cipher
        .decrypt(Nonce::<C>::from_slice(nonce), payload)
        .map_err(|_| KeyFolioError::Cryptographic("authentication failed".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key(len: usize) -> DerivedKey {
        DerivedKey::new((0..len as u8).collect())
    }

    #[test]
    fn test_seal_open_round_trip_all_key_sizes() {
        let nonce = [9u8; NONCE_SIZE];
        let aad = b"keyfolio:v1";

        for key_len in [16, 24, 32] {
            let key = test_key(key_len);
            let sealed = seal(&key, &nonce, aad, b"hello world").unwrap();
            assert_eq!(sealed.len(), b"hello world".len() + TAG_SIZE);

            let opened = open(&key, &nonce, aad, &sealed).unwrap();
            assert_eq!(opened, b"hello world");
        }
    }

    #[test]
    fn test_empty_plaintext_seals_to_tag_only() {
        let key = test_key(32);
        let nonce = [0u8; NONCE_SIZE];

        let sealed = seal(&key, &nonce, b"aad", b"").unwrap();
        assert_eq!(sealed.len(), TAG_SIZE);

        let opened = open(&key, &nonce, b"aad", &sealed).unwrap();
        assert!(opened.is_empty());
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = test_key(32);
        let nonce = [1u8; NONCE_SIZE];

        let mut sealed = seal(&key, &nonce, b"aad", b"secret data").unwrap();
        sealed[0] ^= 0x01;

        let err = open(&key, &nonce, b"aad", &sealed).unwrap_err();
        assert!(matches!(err, KeyFolioError::Cryptographic(_)));
        assert_eq!(err.to_string(), "Cryptographic failure: authentication failed");
    }

    #[test]
    fn test_tampered_tag_fails() {
        let key = test_key(32);
        let nonce = [1u8; NONCE_SIZE];

        let mut sealed = seal(&key, &nonce, b"aad", b"secret data").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x80;

        assert!(open(&key, &nonce, b"aad", &sealed).is_err());
    }

    #[test]
    fn test_wrong_aad_fails() {
        let key = test_key(32);
        let nonce = [2u8; NONCE_SIZE];

        let sealed = seal(&key, &nonce, b"keyfolio:v1", b"payload").unwrap();
        let err = open(&key, &nonce, b"keyfolio:v2", &sealed).unwrap_err();
        assert_eq!(err.to_string(), "Cryptographic failure: authentication failed");
    }

    #[test]
    fn test_wrong_key_fails() {
        let nonce = [3u8; NONCE_SIZE];

        let sealed = seal(&test_key(32), &nonce, b"aad", b"payload").unwrap();
        let other = DerivedKey::new(vec![0xAA; 32]);

        assert!(open(&other, &nonce, b"aad", &sealed).is_err());
    }
}

//! Passphrase-based key derivation using PBKDF2-HMAC-SHA256

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use super::DerivedKey;

/// Derive a symmetric key from a passphrase and a per-message salt.
///
/// Deterministic: identical inputs always yield an identical key. The output
/// is exactly `key_len` bytes. No caching happens here - the salt is fresh
/// per message, so every call derives from scratch.
pub fn derive_key(secret: &str, salt: &[u8], iterations: u32, key_len: usize) -> DerivedKey {
    let mut bytes = vec![0u8; key_len];
    pbkdf2_hmac::<Sha256>(secret.as_bytes(), salt, iterations, &mut bytes);
    DerivedKey::new(bytes)
}

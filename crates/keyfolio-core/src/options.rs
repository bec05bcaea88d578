//! Engine configuration and validation

use crate::crypto::NONCE_SIZE;
use crate::envelope::ENVELOPE_VERSION;
use crate::error::{KeyFolioError, Result};

/// Minimum accepted PBKDF2 iteration count.
pub const MIN_ITERATIONS: u32 = 10_000;

/// Parameters controlling key derivation and cipher behavior.
///
/// Validated once at engine construction and immutable afterwards. The
/// defaults are the supported baseline; overriding `iterations` on a live
/// deployment orphans previously issued envelopes, since the count is not
/// embedded in the wire format.
#[derive(Debug, Clone)]
pub struct KeyFolioOptions {
    /// Associated data bound into every seal/open. Defaults to the envelope
    /// version literal, which ties authenticity to the declared version.
    pub aad: String,
    /// PBKDF2-HMAC-SHA256 iteration count.
    pub iterations: u32,
    /// Per-message salt length in bytes.
    pub salt_len: usize,
    /// AES-GCM nonce length in bytes. Only 12 is supported.
    pub nonce_len: usize,
    /// AES key length in bytes: 16, 24, or 32.
    pub key_len: usize,
}

impl Default for KeyFolioOptions {
    fn default() -> Self {
        Self {
            aad: ENVELOPE_VERSION.to_string(),
            iterations: 210_000,
            salt_len: 16,
            nonce_len: NONCE_SIZE,
            key_len: 32,
        }
    }
}

impl KeyFolioOptions {
    /// Check every constraint, failing on the first violation.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.iterations < MIN_ITERATIONS {
            return Err(KeyFolioError::Configuration(format!(
                "iterations must be at least {MIN_ITERATIONS}, got {}",
                self.iterations
            )));
        }
        if !matches!(self.key_len, 16 | 24 | 32) {
            return Err(KeyFolioError::Configuration(format!(
                "key_len must be 16, 24, or 32 bytes, got {}",
                self.key_len
            )));
        }
        if self.nonce_len != NONCE_SIZE {
            // AES-GCM accepts other nonce sizes, but 96 bits is the only one
            // this format supports. Keep it strict.
            return Err(KeyFolioError::Configuration(format!(
                "nonce_len must be {NONCE_SIZE} bytes, got {}",
                self.nonce_len
            )));
        }
        Ok(())
    }
}

//! Versioned wire format for encryption results
//!
//! Rendered form: `keyfolio:v1:<salt>.<nonce>.<ct>` where the three segments
//! are unpadded base64url and `ct` carries the ciphertext with the auth tag
//! appended. Parsing is purely structural - no cryptographic work happens
//! here.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::{KeyFolioError, Result};

/// Version literal carried by every envelope. Envelopes from any future
/// incompatible format must use a different literal, and this codec rejects
/// them.
pub const ENVELOPE_VERSION: &str = "keyfolio:v1";

/// One encryption result in transportable form.
///
/// Constructed fresh on encrypt and discarded after rendering, or
/// reconstructed fresh on decrypt and discarded after being consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Per-message key-derivation salt
    pub salt: Vec<u8>,
    /// AES-GCM nonce (12 bytes)
    pub nonce: Vec<u8>,
    /// Ciphertext with the 16-byte auth tag appended
    pub ciphertext: Vec<u8>,
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{ENVELOPE_VERSION}:{}.{}.{}",
            URL_SAFE_NO_PAD.encode(&self.salt),
            URL_SAFE_NO_PAD.encode(&self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext)
        )
    }
}

impl FromStr for Envelope {
    type Err = KeyFolioError;

    fn from_str(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(KeyFolioError::Format("envelope is empty".to_string()));
        }

        let rest = input
            .strip_prefix(ENVELOPE_VERSION)
            .and_then(|r| r.strip_prefix(':'))
            .ok_or_else(|| {
                KeyFolioError::Format(format!("expected '{ENVELOPE_VERSION}:' prefix"))
            })?;

        let segments: Vec<&str> = rest
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if segments.len() != 3 {
            return Err(KeyFolioError::Format(format!(
                "expected 3 dot-separated segments (salt.nonce.ciphertext), got {}",
                segments.len()
            )));
        }

        Ok(Self {
            salt: decode_segment(segments[0], "salt")?,
            nonce: decode_segment(segments[1], "nonce")?,
            ciphertext: decode_segment(segments[2], "ciphertext")?,
        })
    }
}

fn decode_segment(segment: &str, field: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| KeyFolioError::Format(format!("{field} segment is not valid base64url: {e}")))
}

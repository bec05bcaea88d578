//! Error types for keyfolio-core

use thiserror::Error;

/// Result type alias for envelope operations
pub type Result<T> = std::result::Result<T, KeyFolioError>;

/// Envelope scheme error types
///
/// Every failure is terminal for the call that produced it; nothing in this
/// crate retries. Messages never contain passphrases, derived keys, or
/// plaintext.
#[derive(Error, Debug)]
pub enum KeyFolioError {
    /// Invalid parameter detected while constructing an engine. The message
    /// names the offending field.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Envelope text that does not match the wire format. Raised before any
    /// cryptographic work happens.
    #[error("Invalid envelope: {0}")]
    Format(String),

    /// The secret provider returned an empty/blank secret or failed outright.
    #[error("Secret error: {0}")]
    Secret(String),

    /// Authentication/verification failure during decrypt, or a violated
    /// size invariant. Wrong key, tampered data, and mismatched associated
    /// data are deliberately indistinguishable.
    #[error("Cryptographic failure: {0}")]
    Cryptographic(String),
}

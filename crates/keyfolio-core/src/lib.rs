//! # keyfolio-core
//!
//! Passphrase-based authenticated-encryption envelopes:
//! - PBKDF2-HMAC-SHA256 key derivation with a per-message salt
//! - AES-GCM encryption binding a versioned associated-data string
//! - A portable, self-describing text format:
//!   `keyfolio:v1:<salt>.<nonce>.<ciphertext+tag>` (unpadded base64url)
//!
//! The [`KeyFolio`] engine is immutable after construction and safe to share
//! across threads; the passphrase comes from a caller-supplied
//! [`SecretProvider`] and is never stored beyond one call.

pub mod crypto;
pub mod envelope;
pub mod error;
pub mod secret;

mod engine;
mod options;

pub use crypto::{derive_key, DerivedKey, NONCE_SIZE, TAG_SIZE};
pub use engine::KeyFolio;
pub use envelope::{Envelope, ENVELOPE_VERSION};
pub use error::{KeyFolioError, Result};
pub use options::{KeyFolioOptions, MIN_ITERATIONS};
pub use secret::{CachedSecret, EnvSecret, SecretProvider, StaticSecret};

//! Cryptographic primitives for the envelope scheme
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 key derivation from passphrases
//! - AES-GCM authenticated encryption (128/192/256-bit keys)
//! - Secure memory handling with zeroize

mod cipher;
mod key_derivation;
mod secure_memory;

pub(crate) use cipher::{open, seal};
pub use cipher::{NONCE_SIZE, TAG_SIZE};
pub use key_derivation::derive_key;
pub use secure_memory::DerivedKey;

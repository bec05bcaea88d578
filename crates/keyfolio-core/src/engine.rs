//! Envelope engine orchestration

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{self, derive_key, TAG_SIZE};
use crate::envelope::Envelope;
use crate::error::{KeyFolioError, Result};
use crate::options::KeyFolioOptions;
use crate::secret::SecretProvider;

/// Passphrase-based authenticated-encryption engine.
///
/// Holds a validated [`KeyFolioOptions`] and nothing else; immutable after
/// construction and safe for unlimited concurrent calls. Every call pulls a
/// fresh secret, generates fresh randomness, and allocates its own buffers.
pub struct KeyFolio {
    options: KeyFolioOptions,
}

impl KeyFolio {
    /// Create an engine with the default options.
    pub fn new() -> Self {
        Self {
            options: KeyFolioOptions::default(),
        }
    }

    /// Create an engine with custom options, validating them atomically.
    pub fn with_options(options: KeyFolioOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The validated options this engine was constructed with.
    pub fn options(&self) -> &KeyFolioOptions {
        &self.options
    }

    /// Encrypt `plaintext` into a portable envelope string.
    ///
    /// The empty string is valid input. Fresh salt and nonce are drawn from
    /// the OS random source on every call and never reused.
    pub fn encrypt(&self, plaintext: &str, secrets: &dyn SecretProvider) -> Result<String> {
        let secret = self.pull_secret(secrets)?;

        let mut salt = vec![0u8; self.options.salt_len];
        OsRng.fill_bytes(&mut salt);
        let mut nonce = vec![0u8; self.options.nonce_len];
        OsRng.fill_bytes(&mut nonce);

        let key = derive_key(&secret, &salt, self.options.iterations, self.options.key_len);
        let ciphertext = crypto::seal(
            &key,
            &nonce,
            self.options.aad.as_bytes(),
            plaintext.as_bytes(),
        )?;

        debug!(plaintext_len = plaintext.len(), "sealed envelope");

        Ok(Envelope {
            salt,
            nonce,
            ciphertext,
        }
        .to_string())
    }

    /// Decrypt an envelope string produced by [`encrypt`](Self::encrypt)
    /// under the same passphrase and options.
    pub fn decrypt(&self, envelope_text: &str, secrets: &dyn SecretProvider) -> Result<String> {
        let envelope: Envelope = envelope_text.parse()?;

        if envelope.salt.len() != self.options.salt_len {
            return Err(KeyFolioError::Cryptographic("invalid salt size".to_string()));
        }
        if envelope.nonce.len() != self.options.nonce_len {
            return Err(KeyFolioError::Cryptographic(
                "invalid nonce size".to_string(),
            ));
        }
        if envelope.ciphertext.len() < TAG_SIZE {
            return Err(KeyFolioError::Cryptographic(
                "invalid ciphertext/tag payload".to_string(),
            ));
        }

        let secret = self.pull_secret(secrets)?;
        let key = derive_key(
            &secret,
            &envelope.salt,
            self.options.iterations,
            self.options.key_len,
        );

        let plaintext = crypto::open(
            &key,
            &envelope.nonce,
            self.options.aad.as_bytes(),
            &envelope.ciphertext,
        )?;

        debug!(plaintext_len = plaintext.len(), "opened envelope");

        String::from_utf8(plaintext)
            .map_err(|_| KeyFolioError::Cryptographic("payload is not valid UTF-8".to_string()))
    }

    fn pull_secret(&self, secrets: &dyn SecretProvider) -> Result<Zeroizing<String>> {
        let secret = Zeroizing::new(secrets.secret()?);
        if secret.trim().is_empty() {
            return Err(KeyFolioError::Secret(
                "secret provider returned an empty secret".to_string(),
            ));
        }
        Ok(secret)
    }
}

impl Default for KeyFolio {
    fn default() -> Self {
        Self::new()
    }
}

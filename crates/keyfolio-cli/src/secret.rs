//! Passphrase resolution for the console

use std::io::IsTerminal;

use dialoguer::Password;
use keyfolio_core::{KeyFolioError, Result, SecretProvider};
use tracing::debug;

/// Reads the passphrase from an environment variable, falling back to a
/// masked prompt when running on a terminal.
///
/// Wrap in [`keyfolio_core::CachedSecret`] to prompt at most once per
/// process.
pub struct EnvOrPromptSecret {
    var: String,
}

impl EnvOrPromptSecret {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SecretProvider for EnvOrPromptSecret {
    fn secret(&self) -> Result<String> {
        if let Ok(value) = std::env::var(&self.var) {
            if !value.trim().is_empty() {
                debug!(var = %self.var, "passphrase resolved from environment");
                return Ok(value);
            }
        }

        if !std::io::stdin().is_terminal() {
            return Err(KeyFolioError::Secret(format!(
                "{} is not set and no terminal is available to prompt",
                self.var
            )));
        }

        let secret = Password::new()
            .with_prompt(format!("{} not set. Enter passphrase", self.var))
            .interact()
            .map_err(|e| KeyFolioError::Secret(format!("failed to read passphrase: {e}")))?;
        if secret.trim().is_empty() {
            return Err(KeyFolioError::Secret("no passphrase provided".to_string()));
        }
        Ok(secret)
    }
}

//! Secret source capability
//!
//! The engine never stores a passphrase beyond one call and never caches
//! what a provider returns; any prompt-once behavior belongs to the provider
//! itself (see [`CachedSecret`]).

use std::sync::OnceLock;

use crate::error::{KeyFolioError, Result};

/// Something that can be asked, on demand, for the passphrase.
///
/// Implementations may block (interactive prompts, environment I/O) and may
/// fail. Called fresh on every engine operation.
pub trait SecretProvider {
    fn secret(&self) -> Result<String>;
}

/// Fixed passphrase, for tests and embedding callers that already hold one.
pub struct StaticSecret {
    value: String,
}

impl StaticSecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl SecretProvider for StaticSecret {
    fn secret(&self) -> Result<String> {
        Ok(self.value.clone())
    }
}

/// Reads the passphrase from a named environment variable.
pub struct EnvSecret {
    var: String,
}

impl EnvSecret {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SecretProvider for EnvSecret {
    fn secret(&self) -> Result<String> {
        match std::env::var(&self.var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(KeyFolioError::Secret(format!(
                "environment variable '{}' is not set or empty",
                self.var
            ))),
        }
    }
}

/// Decorator that memoizes the first successful result of the inner
/// provider for the lifetime of the process.
///
/// Failures are not cached - the inner provider is asked again on the next
/// call until one attempt succeeds.
pub struct CachedSecret<P> {
    inner: P,
    cell: OnceLock<String>,
}

impl<P: SecretProvider> CachedSecret<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cell: OnceLock::new(),
        }
    }
}

impl<P: SecretProvider> SecretProvider for CachedSecret<P> {
    fn secret(&self) -> Result<String> {
        if let Some(cached) = self.cell.get() {
            return Ok(cached.clone());
        }
        let value = self.inner.secret()?;
        Ok(self.cell.get_or_init(|| value).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingSecret {
        calls: AtomicU32,
        fail_first: bool,
    }

    impl CountingSecret {
        fn new(fail_first: bool) -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail_first,
            }
        }
    }

    impl SecretProvider for &CountingSecret {
        fn secret(&self) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && call == 0 {
                return Err(KeyFolioError::Secret("not ready".to_string()));
            }
            Ok(format!("secret-{call}"))
        }
    }

    #[test]
    fn test_static_secret() {
        let provider = StaticSecret::new("hunter2");
        assert_eq!(provider.secret().unwrap(), "hunter2");
    }

    #[test]
    fn test_env_secret_reads_variable() {
        std::env::set_var("KEYFOLIO_TEST_ENV_SECRET", "from-env");
        let provider = EnvSecret::new("KEYFOLIO_TEST_ENV_SECRET");
        assert_eq!(provider.secret().unwrap(), "from-env");
        std::env::remove_var("KEYFOLIO_TEST_ENV_SECRET");
    }

    #[test]
    fn test_env_secret_missing_variable_fails() {
        let provider = EnvSecret::new("KEYFOLIO_TEST_ENV_UNSET");
        let err = provider.secret().unwrap_err();
        assert!(matches!(err, KeyFolioError::Secret(_)));
    }

    #[test]
    fn test_env_secret_blank_variable_fails() {
        std::env::set_var("KEYFOLIO_TEST_ENV_BLANK", "   ");
        let provider = EnvSecret::new("KEYFOLIO_TEST_ENV_BLANK");
        assert!(provider.secret().is_err());
        std::env::remove_var("KEYFOLIO_TEST_ENV_BLANK");
    }

    #[test]
    fn test_cached_secret_asks_inner_once() {
        let inner = CountingSecret::new(false);
        let provider = CachedSecret::new(&inner);

        assert_eq!(provider.secret().unwrap(), "secret-0");
        assert_eq!(provider.secret().unwrap(), "secret-0");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cached_secret_does_not_cache_failures() {
        let inner = CountingSecret::new(true);
        let provider = CachedSecret::new(&inner);

        assert!(provider.secret().is_err());
        assert_eq!(provider.secret().unwrap(), "secret-1");
        assert_eq!(provider.secret().unwrap(), "secret-1");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}

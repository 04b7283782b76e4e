//! Capabilities the binder consumes.
//!
//! Both are plain request/response calls so any backing store (secret
//! manager, file, vault, in-memory map) can sit behind them.

use crate::domain::errors::FetchError;

/// Fetches raw secret payloads by reference.
pub trait SecretAccessor {
    /// Return the payload stored under `reference`.
    ///
    /// Blocking. Timeouts, if any, belong to the implementation.
    fn fetch_secret(&self, reference: &str) -> Result<String, FetchError>;
}

impl<A: SecretAccessor + ?Sized> SecretAccessor for &A {
    fn fetch_secret(&self, reference: &str) -> Result<String, FetchError> {
        (**self).fetch_secret(reference)
    }
}

impl<A: SecretAccessor + ?Sized> SecretAccessor for Box<A> {
    fn fetch_secret(&self, reference: &str) -> Result<String, FetchError> {
        (**self).fetch_secret(reference)
    }
}

/// Source of environment variables.
///
/// Injected so tests can supply variables without touching the process
/// environment.
pub trait EnvironmentProvider {
    /// Value of `key`, or `None` when unset.
    fn get_var(&self, key: &str) -> Option<String>;
}

impl<P: EnvironmentProvider + ?Sized> EnvironmentProvider for &P {
    fn get_var(&self, key: &str) -> Option<String> {
        (**self).get_var(key)
    }
}

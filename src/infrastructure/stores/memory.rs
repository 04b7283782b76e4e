use std::collections::HashMap;
use std::fmt;

use super::StoreError;
use crate::domain::errors::FetchError;
use crate::domain::ports::SecretAccessor;

/// Secret store holding payloads in a map.
#[derive(Clone, Default)]
pub struct InMemorySecretStore {
    secrets: HashMap<String, String>,
}

impl InMemorySecretStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_secret(mut self, reference: impl Into<String>, payload: impl Into<String>) -> Self {
        self.insert(reference, payload);
        self
    }

    /// Store `payload` under `reference`, returning the previous payload.
    pub fn insert(
        &mut self,
        reference: impl Into<String>,
        payload: impl Into<String>,
    ) -> Option<String> {
        self.secrets.insert(reference.into(), payload.into())
    }

    pub fn remove(&mut self, reference: &str) -> Option<String> {
        self.secrets.remove(reference)
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.secrets.contains_key(reference)
    }

    /// Stored references, sorted.
    pub fn references(&self) -> Vec<&str> {
        let mut references: Vec<&str> = self.secrets.keys().map(String::as_str).collect();
        references.sort_unstable();
        references
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl SecretAccessor for InMemorySecretStore {
    fn fetch_secret(&self, reference: &str) -> Result<String, FetchError> {
        self.secrets
            .get(reference)
            .cloned()
            .ok_or_else(|| StoreError::SecretNotFound(reference.to_string()).into())
    }
}

impl FromIterator<(String, String)> for InMemorySecretStore {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            secrets: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for InMemorySecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemorySecretStore")
            .field("references", &self.references())
            .finish()
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use super::{InMemorySecretStore, StoreError};
use crate::domain::errors::FetchError;
use crate::domain::ports::SecretAccessor;

/// Secret store loaded from a JSON file.
///
/// The file holds one object mapping references to payloads:
///
/// ```json
/// {
///   "/my-ns/plaintext": "value",
///   "/my-ns/structured": { "api_key": "1234567890" }
/// }
/// ```
///
/// String members are served as-is; any other member is served as its JSON
/// text, so structured secrets reach the binder as JSON payloads.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
    secrets: InMemorySecretStore,
}

impl FileSecretStore {
    /// Read and parse the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let bytes = fs::read(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let members: Map<String, Value> =
            serde_json::from_slice(&bytes).map_err(|err| StoreError::Parse {
                path: path.clone(),
                reason: err.to_string(),
            })?;

        let secrets = members
            .into_iter()
            .map(|(reference, member)| {
                let payload = match member {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                (reference, payload)
            })
            .collect::<InMemorySecretStore>();

        debug!(path = %path.display(), secrets = secrets.len(), "loaded file secret store");
        Ok(Self { path, secrets })
    }

    /// File the store was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored references, sorted.
    pub fn references(&self) -> Vec<&str> {
        self.secrets.references()
    }
}

impl SecretAccessor for FileSecretStore {
    fn fetch_secret(&self, reference: &str) -> Result<String, FetchError> {
        self.secrets.fetch_secret(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn store_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_string_and_object_members() {
        let file = store_file(r#"{"plain": "abc", "creds": {"api_key": "123"}}"#);
        let store = FileSecretStore::open(file.path()).unwrap();

        assert_eq!(store.fetch_secret("plain").unwrap(), "abc");
        let creds: Value = serde_json::from_str(&store.fetch_secret("creds").unwrap()).unwrap();
        assert_eq!(creds["api_key"], "123");
        assert_eq!(store.references(), vec!["creds", "plain"]);
        assert_eq!(store.path(), file.path());
    }

    #[test]
    fn test_missing_reference() {
        let file = store_file("{}");
        let store = FileSecretStore::open(file.path()).unwrap();
        let err = store.fetch_secret("absent").unwrap_err();
        assert_eq!(err.to_string(), "secret 'absent' not found");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSecretStore::open(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_file_must_hold_an_object() {
        let file = store_file(r#"["not", "an", "object"]"#);
        let err = FileSecretStore::open(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}

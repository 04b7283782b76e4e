//! Secret store adapters
//!
//! Implementations of [`SecretAccessor`](crate::domain::ports::SecretAccessor):
//! - In-memory map (tests, embedding)
//! - JSON file mapping references to payloads

pub mod file;
pub mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileSecretStore;
pub use memory::InMemorySecretStore;

/// Errors raised by the bundled secret stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("secret '{0}' not found")]
    SecretNotFound(String),

    #[error("failed to read secret store {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("secret store {} must be a JSON object of secrets: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
}

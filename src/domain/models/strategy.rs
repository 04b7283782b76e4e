use std::fmt;

/// How secret-tagged fields are resolved.
///
/// Chosen explicitly by the caller. Plaintext and JSON payloads are both legal
/// under either strategy, so the payload shape never selects one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Fetch one secret holding a JSON object of string values; each field
    /// reference is a key in that object.
    SharedDocument {
        /// Secret-store key of the shared document.
        key: String,
    },
    /// Fetch every field reference as its own secret.
    PerField,
}

impl Strategy {
    /// Shared-document strategy reading the secret stored under `key`.
    pub fn shared(key: impl Into<String>) -> Self {
        Self::SharedDocument { key: key.into() }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SharedDocument { key } => write!(f, "shared document '{key}'"),
            Self::PerField => write!(f, "per-field"),
        }
    }
}

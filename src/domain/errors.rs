//! Domain errors for configuration binding.

use thiserror::Error;

use super::models::binding::FieldShape;

/// Error type produced by secret-access capabilities.
///
/// Accessors may wrap any error (network, permissions, not found); the binder
/// passes the message through untouched.
pub type FetchError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Format a list of sub-field names as `[a, b, c]`.
fn format_field_list(fields: &[String]) -> String {
    format!("[{}]", fields.join(", "))
}

/// What a secret payload turned out to be once inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Plain text (anything that does not parse as JSON).
    Plaintext,
    /// Valid JSON of any kind.
    Document,
}

impl PayloadKind {
    /// The field shape able to hold a payload of this kind.
    pub const fn accepted_by(self) -> FieldShape {
        match self {
            Self::Plaintext => FieldShape::Text,
            Self::Document => FieldShape::Structure,
        }
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plaintext => write!(f, "plaintext secret"),
            Self::Document => write!(f, "JSON secret"),
        }
    }
}

/// Errors that abort a binding pass.
///
/// Every failure is terminal for the whole call. Fields assigned before the
/// failing one keep their values.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("{source}")]
    SecretStore { reference: String, source: FetchError },

    #[error("invalid payload for secret '{reference}': {reason}")]
    InvalidPayload { reference: String, reason: String },

    #[error(
        "incorrect type when attempting to set {found}. Expected {} for field '{reference}'",
        .found.accepted_by()
    )]
    TypeMismatch {
        field: &'static str,
        reference: String,
        declared: FieldShape,
        found: PayloadKind,
    },

    #[error("required secret '{key}' is not set")]
    MissingSecret { key: String },

    #[error("secrets not defined in configuration {}", format_field_list(.missing))]
    IncompleteSecret {
        field: &'static str,
        reference: String,
        missing: Vec<String>,
    },

    #[error("required environment variable \"{var}\" is not set")]
    MissingEnv { field: &'static str, var: String },

    #[error("environment variable \"{var}\" should not be empty")]
    EmptyEnv { field: &'static str, var: String },

    #[error("parse error on field \"{field}\" from environment variable \"{var}\": {reason}")]
    EnvConversion {
        field: &'static str,
        var: String,
        reason: String,
    },
}

impl BindError {
    /// Name of the configuration field the error concerns, where one applies.
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::TypeMismatch { field, .. }
            | Self::IncompleteSecret { field, .. }
            | Self::MissingEnv { field, .. }
            | Self::EmptyEnv { field, .. }
            | Self::EnvConversion { field, .. } => Some(*field),
            Self::SecretStore { .. } | Self::InvalidPayload { .. } | Self::MissingSecret { .. } => {
                None
            }
        }
    }
}

/// Result alias for binding operations.
pub type BindResult<T> = Result<T, BindError>;

/// Failure converting a resolved payload into a field value.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("secrets not defined in configuration {}", format_field_list(.0))]
    Incomplete(Vec<String>),

    #[error("field cannot hold a {0}")]
    Rejected(PayloadKind),

    #[error("expected a JSON object")]
    NotAnObject,
}

//! Field descriptor tables.
//!
//! A configuration type describes its secret and environment fields once, as
//! an ordered table of `(field name, source, slot accessor)` entries. The
//! binder walks that table instead of inspecting the type at runtime.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::domain::errors::{DocumentError, PayloadKind};

/// The kind of value a field can hold, as far as secret resolution cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// A string field; accepts payloads that are not JSON.
    Text,
    /// A nested structure; accepts JSON payloads.
    Structure,
    /// Any other scalar (numbers, booleans). Never assignable from a secret.
    Scalar(&'static str),
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "a string"),
            Self::Structure => write!(f, "a structure"),
            Self::Scalar(name) => write!(f, "{name}"),
        }
    }
}

/// A secret payload after inspection, ready to be converted into a field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// Raw payload text.
    Plaintext(String),
    /// Payload that parsed as JSON of any kind.
    Document(Value),
}

impl Resolved {
    /// Kind of payload this value came from.
    pub const fn kind(&self) -> PayloadKind {
        match self {
            Self::Plaintext(_) => PayloadKind::Plaintext,
            Self::Document(_) => PayloadKind::Document,
        }
    }
}

/// A field type that secrets can be resolved into.
///
/// Implemented for `String`, for the primitive scalars (which report
/// [`FieldShape::Scalar`] and reject every payload), and for every
/// [`SecretDocument`].
pub trait SecretTarget: Sized {
    /// Shape of the field, checked before any conversion is attempted.
    fn shape() -> FieldShape;

    /// Convert a plaintext payload.
    fn from_plaintext(payload: String) -> Result<Self, DocumentError> {
        let _ = payload;
        Err(DocumentError::Rejected(PayloadKind::Plaintext))
    }

    /// Convert a JSON payload.
    fn from_document(document: Value) -> Result<Self, DocumentError> {
        let _ = document;
        Err(DocumentError::Rejected(PayloadKind::Document))
    }
}

impl SecretTarget for String {
    fn shape() -> FieldShape {
        FieldShape::Text
    }

    fn from_plaintext(payload: String) -> Result<Self, DocumentError> {
        Ok(payload)
    }
}

macro_rules! scalar_targets {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SecretTarget for $ty {
                fn shape() -> FieldShape {
                    FieldShape::Scalar(stringify!($ty))
                }
            }
        )*
    };
}

scalar_targets!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Marker for structures that may be filled from a JSON secret.
///
/// The structure is decoded starting from its `Default`, and every top-level
/// member must end up non-zero.
pub trait SecretDocument: serde::Serialize + serde::de::DeserializeOwned + Default {}

type AssignFn<C> = Box<dyn Fn(&mut C, Resolved) -> Result<(), DocumentError>>;
type ParseFn<C> = Box<dyn Fn(&mut C, &str) -> Result<(), String>>;

/// One secret-tagged field.
pub struct SecretBinding<C> {
    field: &'static str,
    reference: String,
    shape: FieldShape,
    assign: AssignFn<C>,
}

impl<C> SecretBinding<C> {
    /// Name of the configuration field.
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Secret reference, or key in the shared document.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub const fn shape(&self) -> FieldShape {
        self.shape
    }

    /// Convert `value` and store it in the field.
    pub fn assign(&self, target: &mut C, value: Resolved) -> Result<(), DocumentError> {
        (self.assign)(target, value)
    }
}

impl<C> fmt::Debug for SecretBinding<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBinding")
            .field("field", &self.field)
            .field("reference", &self.reference)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// Environment tag of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    name: String,
    required: bool,
    not_empty: bool,
    default: Option<String>,
}

impl EnvVar {
    /// Optional variable `name` with no default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            not_empty: false,
            default: None,
        }
    }

    /// Fail when the variable is unset.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Fail when the variable is set to an empty string.
    #[must_use]
    pub const fn not_empty(mut self) -> Self {
        self.not_empty = true;
        self
    }

    /// Value parsed when the variable is unset.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Variable name, before any prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub const fn is_not_empty(&self) -> bool {
        self.not_empty
    }

    /// Raw default parsed when the variable is unset.
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// One environment-tagged field.
pub struct EnvBinding<C> {
    field: &'static str,
    var: EnvVar,
    parse: ParseFn<C>,
}

impl<C> EnvBinding<C> {
    /// Name of the configuration field.
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Variable this field reads.
    pub const fn var(&self) -> &EnvVar {
        &self.var
    }

    /// Parse `raw` and store it in the field.
    pub fn apply(&self, target: &mut C, raw: &str) -> Result<(), String> {
        (self.parse)(target, raw)
    }
}

impl<C> fmt::Debug for EnvBinding<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvBinding")
            .field("field", &self.field)
            .field("var", &self.var)
            .finish_non_exhaustive()
    }
}

/// Ordered descriptor table for a configuration type.
pub struct Bindings<C> {
    secrets: Vec<SecretBinding<C>>,
    env: Vec<EnvBinding<C>>,
}

impl<C: 'static> Bindings<C> {
    /// Empty table.
    pub const fn new() -> Self {
        Self {
            secrets: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Declare a field filled from the secret identified by `reference`.
    #[must_use]
    pub fn secret<V>(
        mut self,
        field: &'static str,
        reference: impl Into<String>,
        slot: fn(&mut C) -> &mut V,
    ) -> Self
    where
        V: SecretTarget + 'static,
    {
        let assign = move |target: &mut C, value: Resolved| -> Result<(), DocumentError> {
            let converted = match value {
                Resolved::Plaintext(text) => V::from_plaintext(text)?,
                Resolved::Document(document) => V::from_document(document)?,
            };
            *slot(target) = converted;
            Ok(())
        };
        self.secrets.push(SecretBinding {
            field,
            reference: reference.into(),
            shape: V::shape(),
            assign: Box::new(assign),
        });
        self
    }

    /// Declare a field filled from an environment variable.
    #[must_use]
    pub fn env<V>(mut self, field: &'static str, var: EnvVar, slot: fn(&mut C) -> &mut V) -> Self
    where
        V: FromStr + 'static,
        V::Err: fmt::Display,
    {
        let parse = move |target: &mut C, raw: &str| -> Result<(), String> {
            *slot(target) = raw.parse::<V>().map_err(|err| err.to_string())?;
            Ok(())
        };
        self.env.push(EnvBinding {
            field,
            var,
            parse: Box::new(parse),
        });
        self
    }
}

impl<C> Bindings<C> {
    /// Secret bindings in declaration order.
    pub fn secrets(&self) -> &[SecretBinding<C>] {
        &self.secrets
    }

    /// Environment bindings in declaration order.
    pub fn env_bindings(&self) -> &[EnvBinding<C>] {
        &self.env
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty() && self.env.is_empty()
    }
}

impl<C: 'static> Default for Bindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Bindings<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("secrets", &self.secrets)
            .field("env", &self.env)
            .finish()
    }
}

/// A configuration type that knows its own descriptor table.
pub trait Bindable: Sized + 'static {
    /// Descriptor table for this type.
    fn bindings() -> Bindings<Self>;
}

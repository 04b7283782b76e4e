//! Decoding of JSON secrets into nested structures.
//!
//! Only JSON objects decode into structures. A document is decoded on top of the structure's `Default`, so keys the
//! payload omits do not fail deserialization. Completeness is checked
//! afterwards: every top-level member must hold a non-zero value.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::errors::DocumentError;
use crate::domain::models::{FieldShape, SecretDocument, SecretTarget};

impl<T: SecretDocument> SecretTarget for T {
    fn shape() -> FieldShape {
        FieldShape::Structure
    }

    fn from_document(document: Value) -> Result<Self, DocumentError> {
        let Value::Object(document) = document else {
            return Err(DocumentError::NotAnObject);
        };
        let decoded: T = decode_document(document)?;
        let missing = zero_fields(&decoded)?;
        if missing.is_empty() {
            Ok(decoded)
        } else {
            Err(DocumentError::Incomplete(missing))
        }
    }
}

/// Deserialize `document` into `T`, starting from `T::default()`.
pub fn decode_document<T>(document: Map<String, Value>) -> Result<T, DocumentError>
where
    T: Serialize + DeserializeOwned + Default,
{
    let mut merged = match serde_json::to_value(T::default())? {
        Value::Object(template) => template,
        _ => Map::new(),
    };
    merged.extend(document);
    Ok(serde_json::from_value(Value::Object(merged))?)
}

/// Names of the top-level members of `value` that hold a zero value.
///
/// Names are the serialized member names, sorted.
pub fn zero_fields<T: Serialize>(value: &T) -> Result<Vec<String>, DocumentError> {
    let serialized = serde_json::to_value(value)?;
    let Value::Object(members) = serialized else {
        return Ok(Vec::new());
    };
    Ok(members
        .into_iter()
        .filter(|(_, member)| is_zero(member))
        .map(|(name, _)| name)
        .collect())
}

/// Whether a JSON value is the serialized form of a type's zero value.
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.values().all(is_zero),
    }
}

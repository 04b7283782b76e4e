//! Domain layer for configuration binding
//!
//! Error taxonomy, field descriptor tables, and the capability traits the
//! binder consumes. Nothing here touches the process environment or a
//! secrets store directly.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{BindError, BindResult, DocumentError, FetchError, PayloadKind};

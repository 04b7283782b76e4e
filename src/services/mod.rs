pub mod binder;
pub mod document;
pub mod env_binder;

pub use binder::{resolve, resolve_per_field, resolve_shared, Binder};
pub use document::{decode_document, is_zero, zero_fields};
pub use env_binder::EnvBinder;

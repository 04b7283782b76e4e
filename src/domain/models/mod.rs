//! Domain models

pub mod binding;
pub mod strategy;

pub use binding::{
    Bindable, Bindings, EnvBinding, EnvVar, FieldShape, Resolved, SecretBinding, SecretDocument,
    SecretTarget,
};
pub use strategy::Strategy;

//! Environment binding
//!
//! Runs after secret resolution and fills environment-tagged fields through
//! an [`EnvironmentProvider`].

use tracing::debug;

use crate::domain::errors::{BindError, BindResult};
use crate::domain::models::Bindings;
use crate::domain::ports::EnvironmentProvider;

/// Fills environment-tagged fields of a configuration value.
///
/// A set variable always overwrites the field. An unset variable falls back to
/// its declared default, fails if required, and otherwise leaves the field
/// untouched.
#[derive(Debug, Clone)]
pub struct EnvBinder<P> {
    provider: P,
    prefix: String,
}

impl<P: EnvironmentProvider> EnvBinder<P> {
    /// Binder reading variables from `provider`, without a prefix.
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            prefix: String::new(),
        }
    }

    /// Prepend `prefix` to every variable name before lookup.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Prefix prepended to variable names; empty when unset.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Apply every environment binding in declaration order.
    pub fn bind<C>(&self, target: &mut C, bindings: &Bindings<C>) -> BindResult<()> {
        for binding in bindings.env_bindings() {
            let tag = binding.var();
            let var = format!("{}{}", self.prefix, tag.name());

            let raw = match self.provider.get_var(&var) {
                Some(value) => {
                    if tag.is_not_empty() && value.is_empty() {
                        return Err(BindError::EmptyEnv {
                            field: binding.field(),
                            var,
                        });
                    }
                    value
                }
                None if tag.is_required() => {
                    return Err(BindError::MissingEnv {
                        field: binding.field(),
                        var,
                    });
                }
                None => match tag.default() {
                    Some(default) => default.to_string(),
                    None => continue,
                },
            };

            binding
                .apply(target, &raw)
                .map_err(|reason| BindError::EnvConversion {
                    field: binding.field(),
                    var: var.clone(),
                    reason,
                })?;
            debug!(field = binding.field(), var = %var, "bound environment field");
        }
        Ok(())
    }
}

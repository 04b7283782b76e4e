//! Configuration binder
//!
//! Resolves secret-tagged fields through a [`SecretAccessor`], then hands the
//! remaining environment-tagged fields to the [`EnvBinder`].
//!
//! One linear pass in declaration order. The first failure aborts the pass;
//! fields assigned before it keep their values.

use std::collections::HashMap;

use serde_json::error::Category;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::domain::errors::{BindError, BindResult, DocumentError};
use crate::domain::models::{Bindable, Bindings, Resolved, SecretBinding, Strategy};
use crate::domain::ports::{EnvironmentProvider, SecretAccessor};
use crate::infrastructure::environment::SystemEnvironment;
use crate::services::env_binder::EnvBinder;

/// Binds configuration values from a secrets store and the environment.
#[derive(Debug, Clone)]
pub struct Binder<P = SystemEnvironment> {
    strategy: Strategy,
    env: EnvBinder<P>,
}

impl Binder<SystemEnvironment> {
    /// Binder reading the process environment.
    pub const fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            env: EnvBinder::new(SystemEnvironment),
        }
    }

    /// Binder using one shared JSON document stored under `key`.
    pub fn shared(key: impl Into<String>) -> Self {
        Self::new(Strategy::shared(key))
    }

    /// Binder fetching every secret reference individually.
    pub const fn per_field() -> Self {
        Self::new(Strategy::PerField)
    }
}

impl<P: EnvironmentProvider> Binder<P> {
    /// Replace the environment source, keeping strategy and prefix.
    pub fn with_environment<Q: EnvironmentProvider>(self, provider: Q) -> Binder<Q> {
        let prefix = self.env.prefix().to_string();
        Binder {
            strategy: self.strategy,
            env: EnvBinder::new(provider).with_prefix(prefix),
        }
    }

    /// Prefix prepended to every environment variable name.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env = self.env.with_prefix(prefix);
        self
    }

    /// Strategy used for secret-tagged fields.
    pub const fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Bind `target` using its own descriptor table.
    pub fn bind<C, A>(&self, target: &mut C, accessor: &A) -> BindResult<()>
    where
        C: Bindable,
        A: SecretAccessor + ?Sized,
    {
        self.bind_with(target, &C::bindings(), accessor)
    }

    /// Bind `target` using an explicit descriptor table.
    #[instrument(skip_all, fields(strategy = %self.strategy))]
    pub fn bind_with<C, A>(
        &self,
        target: &mut C,
        bindings: &Bindings<C>,
        accessor: &A,
    ) -> BindResult<()>
    where
        A: SecretAccessor + ?Sized,
    {
        match &self.strategy {
            Strategy::SharedDocument { key } => {
                resolve_shared_document(target, bindings, key, accessor)?;
            }
            Strategy::PerField => resolve_each_field(target, bindings, accessor)?,
        }

        self.env.bind(target, bindings)?;

        info!(
            secrets = bindings.secrets().len(),
            env = bindings.env_bindings().len(),
            "configuration bound"
        );
        Ok(())
    }
}

/// Bind `target` from the process environment using `strategy`.
pub fn resolve<C, A>(target: &mut C, strategy: Strategy, accessor: &A) -> BindResult<()>
where
    C: Bindable,
    A: SecretAccessor + ?Sized,
{
    Binder::new(strategy).bind(target, accessor)
}

/// Bind `target` from a shared JSON document stored under `key`.
pub fn resolve_shared<C, A>(target: &mut C, key: &str, accessor: &A) -> BindResult<()>
where
    C: Bindable,
    A: SecretAccessor + ?Sized,
{
    Binder::shared(key).bind(target, accessor)
}

/// Bind `target`, fetching each secret reference on its own.
pub fn resolve_per_field<C, A>(target: &mut C, accessor: &A) -> BindResult<()>
where
    C: Bindable,
    A: SecretAccessor + ?Sized,
{
    Binder::per_field().bind(target, accessor)
}

fn resolve_shared_document<C, A>(
    target: &mut C,
    bindings: &Bindings<C>,
    key: &str,
    accessor: &A,
) -> BindResult<()>
where
    A: SecretAccessor + ?Sized,
{
    debug!(key, "fetching shared secret document");
    let payload = fetch(accessor, key)?;

    let document: Value =
        serde_json::from_str(&payload).map_err(|_| BindError::InvalidPayload {
            reference: key.to_string(),
            reason: "expected a JSON payload. Plaintext secrets are not supported for a shared document"
                .to_string(),
        })?;
    let values: HashMap<String, String> =
        serde_json::from_value(document).map_err(|_| BindError::InvalidPayload {
            reference: key.to_string(),
            reason: "expected a JSON object with string values".to_string(),
        })?;

    for binding in bindings.secrets() {
        let value = values
            .get(binding.reference())
            .ok_or_else(|| BindError::MissingSecret {
                key: binding.reference().to_string(),
            })?;
        debug!(
            field = binding.field(),
            reference = binding.reference(),
            "resolving field from shared document"
        );
        assign(binding, target, Resolved::Plaintext(value.clone()))?;
    }
    Ok(())
}

fn resolve_each_field<C, A>(target: &mut C, bindings: &Bindings<C>, accessor: &A) -> BindResult<()>
where
    A: SecretAccessor + ?Sized,
{
    for binding in bindings.secrets() {
        debug!(
            field = binding.field(),
            reference = binding.reference(),
            shape = %binding.shape(),
            "fetching secret"
        );
        let payload = fetch(accessor, binding.reference())?;
        let value = match serde_json::from_str::<Value>(&payload) {
            Ok(document) => Resolved::Document(document),
            Err(_) => Resolved::Plaintext(payload),
        };
        assign(binding, target, value)?;
    }
    Ok(())
}

fn fetch<A: SecretAccessor + ?Sized>(accessor: &A, reference: &str) -> BindResult<String> {
    accessor
        .fetch_secret(reference)
        .map_err(|source| BindError::SecretStore {
            reference: reference.to_string(),
            source,
        })
}

/// Shape-check `value` against the binding, then store it.
fn assign<C>(binding: &SecretBinding<C>, target: &mut C, value: Resolved) -> BindResult<()> {
    let found = value.kind();
    let mismatch = || BindError::TypeMismatch {
        field: binding.field(),
        reference: binding.reference().to_string(),
        declared: binding.shape(),
        found,
    };

    if binding.shape() != found.accepted_by() {
        return Err(mismatch());
    }

    binding.assign(target, value).map_err(|err| match err {
        DocumentError::Decode(err) => BindError::InvalidPayload {
            reference: binding.reference().to_string(),
            reason: describe_decode_error(&err),
        },
        DocumentError::Incomplete(missing) => BindError::IncompleteSecret {
            field: binding.field(),
            reference: binding.reference().to_string(),
            missing,
        },
        DocumentError::NotAnObject => BindError::InvalidPayload {
            reference: binding.reference().to_string(),
            reason: "a structured field needs a JSON object".to_string(),
        },
        DocumentError::Rejected(_) => mismatch(),
    })
}

// serde_json data errors quote the offending value; keep it out of the message.
fn describe_decode_error(err: &serde_json::Error) -> String {
    match err.classify() {
        Category::Data => "a member has the wrong type for the field's structure".to_string(),
        Category::Syntax | Category::Eof | Category::Io => err.to_string(),
    }
}

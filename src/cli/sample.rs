//! Sample service configuration bound by `confbind check`.

use serde::{Deserialize, Serialize};

use crate::domain::errors::BindResult;
use crate::domain::models::{Bindable, Bindings, EnvVar, SecretDocument, Strategy};
use crate::domain::ports::{EnvironmentProvider, SecretAccessor};
use crate::infrastructure::logging::redact;
use crate::services::Binder;

/// API credentials stored as one JSON secret
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl SecretDocument for ApiCredentials {}

/// Configuration of a typical service: one plaintext secret, one structured
/// secret, and a few environment settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub environment: String,
    pub listen_port: u16,
    pub database_password: String,
    pub api: ApiCredentials,
}

impl Bindable for ServiceConfig {
    fn bindings() -> Bindings<Self> {
        Bindings::new()
            .secret(
                "database_password",
                "/service/database-password",
                |c: &mut Self| &mut c.database_password,
            )
            .secret("api", "/service/api-credentials", |c: &mut Self| &mut c.api)
            .env("environment", EnvVar::new("ENV").required(), |c: &mut Self| {
                &mut c.environment
            })
            .env(
                "listen_port",
                EnvVar::new("PORT").default_value("8080"),
                |c: &mut Self| &mut c.listen_port,
            )
    }
}

/// The same service configured for a shared secret document
///
/// A shared document only holds strings, so the API credentials are two
/// separate keys instead of one structured secret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedServiceConfig {
    pub environment: String,
    pub listen_port: u16,
    pub database_password: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Bindable for SharedServiceConfig {
    fn bindings() -> Bindings<Self> {
        Bindings::new()
            .secret(
                "database_password",
                "/service/database-password",
                |c: &mut Self| &mut c.database_password,
            )
            .secret("api_key", "/service/api-key", |c: &mut Self| &mut c.api_key)
            .secret("api_secret", "/service/api-secret", |c: &mut Self| {
                &mut c.api_secret
            })
            .env("environment", EnvVar::new("ENV").required(), |c: &mut Self| {
                &mut c.environment
            })
            .env(
                "listen_port",
                EnvVar::new("PORT").default_value("8080"),
                |c: &mut Self| &mut c.listen_port,
            )
    }
}

/// One bound field as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub field: String,
    pub value: String,
}

impl ServiceConfig {
    /// Field values with every secret redacted
    pub fn report(&self) -> Vec<FieldReport> {
        let field = |name: &str, value: String| FieldReport {
            field: name.to_string(),
            value,
        };
        vec![
            field("environment", self.environment.clone()),
            field("listen_port", self.listen_port.to_string()),
            field("database_password", redact(&self.database_password)),
            field("api.api_key", redact(&self.api.api_key)),
            field("api.api_secret", redact(&self.api.api_secret)),
        ]
    }
}

impl SharedServiceConfig {
    /// Field values with every secret redacted
    pub fn report(&self) -> Vec<FieldReport> {
        let field = |name: &str, value: String| FieldReport {
            field: name.to_string(),
            value,
        };
        vec![
            field("environment", self.environment.clone()),
            field("listen_port", self.listen_port.to_string()),
            field("database_password", redact(&self.database_password)),
            field("api_key", redact(&self.api_key)),
            field("api_secret", redact(&self.api_secret)),
        ]
    }
}

/// Bind the sample that suits the binder's strategy and report it
pub fn bind_sample<P, A>(binder: &Binder<P>, store: &A) -> BindResult<Vec<FieldReport>>
where
    P: EnvironmentProvider,
    A: SecretAccessor + ?Sized,
{
    match binder.strategy() {
        Strategy::SharedDocument { .. } => {
            let mut config = SharedServiceConfig::default();
            binder.bind(&mut config, store)?;
            Ok(config.report())
        }
        Strategy::PerField => {
            let mut config = ServiceConfig::default();
            binder.bind(&mut config, store)?;
            Ok(config.report())
        }
    }
}

//! Confbind - configuration binding from the environment and a secrets store
//!
//! Confbind fills a configuration struct in one synchronous pass at startup:
//! secret-tagged fields are resolved through a [`SecretAccessor`], then the
//! remaining fields are read from environment variables.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): descriptor tables, error taxonomy, ports
//! - **Service Layer** (`services`): the binder, document decoding, env binding
//! - **Infrastructure Layer** (`infrastructure`): secret stores, environment
//!   providers, settings, logging
//! - **CLI Layer** (`cli`): diagnostic command-line interface
//!
//! # Example
//!
//! ```
//! use confbind::{Bindable, Bindings, Binder, EnvVar, InMemorySecretStore, MapEnvironment};
//!
//! #[derive(Debug, Default)]
//! struct Config {
//!     env: String,
//!     password: String,
//! }
//!
//! impl Bindable for Config {
//!     fn bindings() -> Bindings<Self> {
//!         Bindings::new()
//!             .secret("password", "/my-ns/password", |c: &mut Self| &mut c.password)
//!             .env("env", EnvVar::new("ENV").required(), |c: &mut Self| &mut c.env)
//!     }
//! }
//!
//! let store = InMemorySecretStore::new().with_secret("/my-ns/password", "hunter2");
//! let mut config = Config::default();
//! Binder::per_field()
//!     .with_environment(MapEnvironment::empty().with_var("ENV", "staging"))
//!     .bind(&mut config, &store)?;
//!
//! assert_eq!(config.password, "hunter2");
//! assert_eq!(config.env, "staging");
//! # Ok::<(), confbind::BindError>(())
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{BindError, BindResult, DocumentError, FetchError, PayloadKind};
pub use domain::models::{
    Bindable, Bindings, EnvVar, FieldShape, SecretDocument, SecretTarget, Strategy,
};
pub use domain::ports::{EnvironmentProvider, SecretAccessor};
pub use infrastructure::config::{BinderSettings, SettingsError, SettingsLoader};
pub use infrastructure::environment::{MapEnvironment, SystemEnvironment};
pub use infrastructure::stores::{FileSecretStore, InMemorySecretStore, StoreError};
pub use services::{resolve, resolve_per_field, resolve_shared, Binder, EnvBinder};

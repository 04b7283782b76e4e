//! Configuration management infrastructure
//!
//! Hierarchical settings for the binder itself, using figment:
//! - Programmatic defaults
//! - YAML file loading
//! - Environment variable overrides (`CONFBIND_*`)
//! - Settings validation

pub mod loader;
pub mod settings;

pub use loader::{SettingsError, SettingsLoader};
pub use settings::{BinderSettings, StrategyKind};

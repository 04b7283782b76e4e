use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::infrastructure::logging::LogConfig;

/// Settings controlling how the binder runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BinderSettings {
    /// Resolution strategy (shared, per_field)
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Secret-store key of the shared document; required by `shared`
    #[serde(default)]
    pub secret_key: Option<String>,

    /// Prefix prepended to every environment variable name
    #[serde(default)]
    pub env_prefix: String,

    /// JSON file backing the file secret store
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,
}

/// Serializable selector for [`Strategy`](crate::domain::models::Strategy)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Shared,
    #[default]
    PerField,
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "shared" => Ok(Self::Shared),
            "per_field" => Ok(Self::PerField),
            other => Err(format!(
                "unknown strategy '{other}'. Must be one of: shared, per_field"
            )),
        }
    }
}

impl Default for BinderSettings {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            secret_key: None,
            env_prefix: String::new(),
            store_path: None,
            logging: LogConfig::default(),
        }
    }
}

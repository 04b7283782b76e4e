use anyhow::{Context, Result};
use figment::providers::{Data, Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use super::settings::{BinderSettings, StrategyKind};
use crate::domain::models::Strategy;
use crate::services::Binder;

/// Default project settings file
pub const DEFAULT_SETTINGS_PATH: &str = ".confbind/config.yaml";

/// Prefix of environment variables overriding settings
pub const ENV_PREFIX: &str = "CONFBIND_";

/// Settings error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Strategy 'shared' requires secret_key to be set")]
    MissingSecretKey,

    #[error("secret_key cannot be empty")]
    EmptySecretKey,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

impl BinderSettings {
    /// The resolution strategy these settings select
    pub fn resolved_strategy(&self) -> Result<Strategy, SettingsError> {
        match self.strategy {
            StrategyKind::PerField => Ok(Strategy::PerField),
            StrategyKind::Shared => match self.secret_key.as_deref() {
                None => Err(SettingsError::MissingSecretKey),
                Some("") => Err(SettingsError::EmptySecretKey),
                Some(key) => Ok(Strategy::shared(key)),
            },
        }
    }

    /// A binder over the process environment configured from these settings
    pub fn binder(&self) -> Result<Binder, SettingsError> {
        Ok(Binder::new(self.resolved_strategy()?).with_env_prefix(self.env_prefix.clone()))
    }
}

/// Settings loader with hierarchical merging
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .confbind/config.yaml (optional)
    /// 3. Environment variables (CONFBIND_* prefix, `__` separates nesting)
    pub fn load() -> Result<BinderSettings> {
        Self::load_layers(Some(Yaml::file(DEFAULT_SETTINGS_PATH)))
    }

    /// Load settings from `path` (if given) with environment overrides
    ///
    /// An explicit `path` must exist.
    pub fn load_with(path: Option<&Path>) -> Result<BinderSettings> {
        Self::load_layers(path.map(Yaml::file_exact))
    }

    fn load_layers(file: Option<Data<Yaml>>) -> Result<BinderSettings> {
        let mut figment = Figment::new().merge(Serialized::defaults(BinderSettings::default()));
        if let Some(file) = file {
            figment = figment.merge(file);
        }
        let settings: BinderSettings = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract settings from figment")?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Load settings from a specific file, ignoring the environment
    ///
    /// The file must exist.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<BinderSettings> {
        let settings: BinderSettings = Figment::new()
            .merge(Serialized::defaults(BinderSettings::default()))
            .merge(Yaml::file_exact(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load settings from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Validate settings after loading
    pub fn validate(settings: &BinderSettings) -> Result<(), SettingsError> {
        settings.resolved_strategy()?;

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&settings.logging.level.to_lowercase().as_str()) {
            return Err(SettingsError::InvalidLogLevel(
                settings.logging.level.clone(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::logging::LogFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_settings() {
        let settings = BinderSettings::default();
        assert_eq!(settings.strategy, StrategyKind::PerField);
        assert_eq!(settings.secret_key, None);
        assert_eq!(settings.logging.level, "warn");
        SettingsLoader::validate(&settings).expect("Default settings should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let file = settings_file(
            "strategy: shared\nsecret_key: app/secrets\nenv_prefix: APP_\nlogging:\n  level: debug\n  format: json",
        );

        let settings = SettingsLoader::load_from_file(file.path()).unwrap();

        assert_eq!(settings.strategy, StrategyKind::Shared);
        assert_eq!(settings.secret_key.as_deref(), Some("app/secrets"));
        assert_eq!(settings.env_prefix, "APP_");
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(
            settings.resolved_strategy().unwrap(),
            Strategy::shared("app/secrets")
        );
    }

    #[test]
    fn test_shared_without_key_is_rejected() {
        let settings = BinderSettings {
            strategy: StrategyKind::Shared,
            ..Default::default()
        };
        assert_eq!(
            SettingsLoader::validate(&settings),
            Err(SettingsError::MissingSecretKey)
        );
    }

    #[test]
    fn test_shared_with_empty_key_is_rejected() {
        let settings = BinderSettings {
            strategy: StrategyKind::Shared,
            secret_key: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            settings.resolved_strategy(),
            Err(SettingsError::EmptySecretKey)
        );
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut settings = BinderSettings::default();
        settings.logging.level = "loud".to_string();
        match SettingsLoader::validate(&settings) {
            Err(SettingsError::InvalidLogLevel(level)) => assert_eq!(level, "loud"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_override() {
        let file = settings_file("strategy: per_field\nenv_prefix: FILE_");

        temp_env::with_vars(
            [
                ("CONFBIND_STRATEGY", Some("shared")),
                ("CONFBIND_SECRET_KEY", Some("from/env")),
                ("CONFBIND_LOGGING__LEVEL", Some("error")),
            ],
            || {
                let settings = SettingsLoader::load_with(Some(file.path())).unwrap();
                assert_eq!(settings.strategy, StrategyKind::Shared, "Env should win");
                assert_eq!(settings.secret_key.as_deref(), Some("from/env"));
                assert_eq!(settings.logging.level, "error");
                assert_eq!(
                    settings.env_prefix, "FILE_",
                    "File value should persist when not overridden"
                );
            },
        );
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.yaml");
        assert!(SettingsLoader::load_from_file(&absent).is_err());
        assert!(SettingsLoader::load_with(Some(&absent)).is_err());
    }

    #[test]
    fn test_no_file_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "CONFBIND_STRATEGY",
                "CONFBIND_SECRET_KEY",
                "CONFBIND_ENV_PREFIX",
                "CONFBIND_STORE_PATH",
                "CONFBIND_LOGGING__LEVEL",
            ],
            || {
                let settings = SettingsLoader::load_with(None).unwrap();
                assert_eq!(settings.strategy, StrategyKind::PerField);
                assert_eq!(settings.secret_key, None);
                assert_eq!(settings.logging.level, "warn");
            },
        );
    }

    #[test]
    fn test_strategy_kind_from_str() {
        assert_eq!("shared".parse::<StrategyKind>(), Ok(StrategyKind::Shared));
        assert_eq!("per-field".parse::<StrategyKind>(), Ok(StrategyKind::PerField));
        assert_eq!("PER_FIELD".parse::<StrategyKind>(), Ok(StrategyKind::PerField));
        assert!("both".parse::<StrategyKind>().is_err());
    }
}

//! Implementation of the `confbind check` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::cli::sample::{bind_sample, FieldReport};
use crate::infrastructure::config::{BinderSettings, StrategyKind};
use crate::infrastructure::stores::FileSecretStore;

/// Arguments of `confbind check`
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// JSON file holding the secrets (overrides store_path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Resolution strategy (shared, per-field)
    #[arg(long)]
    pub strategy: Option<StrategyKind>,

    /// Secret-store key of the shared document
    #[arg(long)]
    pub secret_key: Option<String>,

    /// Prefix for environment variable names
    #[arg(long)]
    pub env_prefix: Option<String>,
}

impl CheckArgs {
    /// Overlay command-line flags on loaded settings
    pub fn apply(&self, settings: &mut BinderSettings) {
        if let Some(store) = &self.store {
            settings.store_path = Some(store.clone());
        }
        if let Some(strategy) = self.strategy {
            settings.strategy = strategy;
        }
        if let Some(key) = &self.secret_key {
            settings.secret_key = Some(key.clone());
        }
        if let Some(prefix) = &self.env_prefix {
            settings.env_prefix.clone_from(prefix);
        }
    }
}

/// Result of a successful check
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub success: bool,
    pub strategy: String,
    pub store: PathBuf,
    pub fields: Vec<FieldReport>,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Bound sample configuration using {} strategy from {}",
            self.strategy,
            self.store.display()
        )];
        for report in &self.fields {
            lines.push(format!("  {:<20} {}", report.field, report.value));
        }
        lines.join("\n")
    }
}

/// Run the check and print its result.
pub fn execute(args: &CheckArgs, settings: BinderSettings, json_mode: bool) -> Result<()> {
    let output_data = run(args, settings)?;
    output(&output_data, json_mode);
    Ok(())
}

/// Bind the sample matching the configured strategy against the file store.
///
/// `shared` binds a string-only sample, since a shared document cannot hold
/// structured secrets; `per_field` binds the sample with a structured secret.
pub fn run(args: &CheckArgs, mut settings: BinderSettings) -> Result<CheckOutput> {
    args.apply(&mut settings);

    let binder = settings.binder()?;
    let store_path = settings
        .store_path
        .clone()
        .context("No secret store configured. Pass --store or set store_path")?;
    let store = FileSecretStore::open(&store_path)?;

    let fields = bind_sample(&binder, &store).context("Failed to bind sample configuration")?;

    Ok(CheckOutput {
        success: true,
        strategy: binder.strategy().to_string(),
        store: store_path,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let mut settings = BinderSettings::default();
        let args = CheckArgs {
            store: Some(PathBuf::from("secrets.json")),
            strategy: Some(StrategyKind::Shared),
            secret_key: Some("app/secrets".to_string()),
            env_prefix: Some("APP_".to_string()),
        };
        args.apply(&mut settings);
        assert_eq!(settings.store_path, Some(PathBuf::from("secrets.json")));
        assert_eq!(settings.strategy, StrategyKind::Shared);
        assert_eq!(settings.secret_key.as_deref(), Some("app/secrets"));
        assert_eq!(settings.env_prefix, "APP_");
    }

    #[test]
    fn test_absent_flags_keep_settings() {
        let mut settings = BinderSettings {
            env_prefix: "SVC_".to_string(),
            ..Default::default()
        };
        CheckArgs::default().apply(&mut settings);
        assert_eq!(settings.env_prefix, "SVC_");
        assert_eq!(settings.strategy, StrategyKind::PerField);
    }

    #[test]
    fn test_missing_store_is_an_error() {
        let err = execute(&CheckArgs::default(), BinderSettings::default(), false).unwrap_err();
        assert!(err.to_string().contains("No secret store configured"));
    }

    #[test]
    fn test_shared_strategy_binds_from_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("secrets.json");
        std::fs::write(
            &store,
            r#"{ "app/secrets": {
                "/service/database-password": "hunter2",
                "/service/api-key": "key-1",
                "/service/api-secret": "secret-1"
            } }"#,
        )
        .unwrap();
        let args = CheckArgs {
            store: Some(store.clone()),
            strategy: Some(StrategyKind::Shared),
            secret_key: Some("app/secrets".to_string()),
            env_prefix: Some("CONFBIND_CHECK_SHARED_".to_string()),
        };

        temp_env::with_var("CONFBIND_CHECK_SHARED_ENV", Some("staging"), || {
            let result = run(&args, BinderSettings::default()).unwrap();
            assert!(result.success);
            assert_eq!(result.store, store);
            assert_eq!(result.fields[0].value, "staging");
            assert!(result.fields.iter().all(|f| !f.value.contains("hunter2")));
        });
    }

    #[test]
    fn test_per_field_strategy_binds_from_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("secrets.json");
        std::fs::write(
            &store,
            r#"{
                "/service/database-password": "hunter2",
                "/service/api-credentials": { "api_key": "k", "api_secret": "s" }
            }"#,
        )
        .unwrap();
        let args = CheckArgs {
            store: Some(store),
            env_prefix: Some("CONFBIND_CHECK_PER_FIELD_".to_string()),
            ..CheckArgs::default()
        };

        temp_env::with_var("CONFBIND_CHECK_PER_FIELD_ENV", Some("qa"), || {
            let result = run(&args, BinderSettings::default()).unwrap();
            assert_eq!(result.strategy, "per-field");
            assert_eq!(result.fields[0].value, "qa");
        });
    }
}

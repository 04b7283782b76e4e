//! Implementation of the `confbind show-settings` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::BinderSettings;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SettingsOutput {
    pub settings: BinderSettings,
}

impl CommandOutput for SettingsOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.settings).unwrap_or_default()
    }
}

/// Print the effective settings.
pub fn execute(settings: BinderSettings, json_mode: bool) -> Result<()> {
    output(&SettingsOutput { settings }, json_mode);
    Ok(())
}

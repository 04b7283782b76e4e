use std::collections::HashMap;

use crate::domain::ports::EnvironmentProvider;

/// Production environment provider that reads from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Environment provider backed by an in-memory map
///
/// Lets callers supply variables without modifying the global process
/// environment, which parallel tests share.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    /// Provider serving exactly `vars`.
    pub const fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Provider with no variables set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set one variable.
    #[must_use]
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    /// Set several variables.
    pub fn with_vars(mut self, vars: &[(&str, &str)]) -> Self {
        for (key, value) in vars {
            self.vars.insert((*key).to_string(), (*value).to_string());
        }
        self
    }
}

impl EnvironmentProvider for MapEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

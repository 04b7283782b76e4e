//! Common test utilities for integration tests
//!
//! Provides shared fixtures, helpers, and test utilities used across
//! multiple integration test files.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use confbind::{FetchError, SecretAccessor, SecretDocument};
use serde::{Deserialize, Serialize};

/// Scripted response for one reference
#[derive(Debug, Clone)]
enum Response {
    Payload(String),
    Failure(String),
}

/// Secret store that answers from a script and records every fetch
///
/// Unscripted references fail with `unexpected fetch of '<reference>'`.
#[derive(Debug, Default)]
pub struct RecordingSecretStore {
    responses: HashMap<String, Response>,
    calls: RefCell<Vec<String>>,
}

impl RecordingSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(mut self, reference: &str, payload: &str) -> Self {
        self.responses
            .insert(reference.to_string(), Response::Payload(payload.to_string()));
        self
    }

    pub fn failing(mut self, reference: &str, message: &str) -> Self {
        self.responses
            .insert(reference.to_string(), Response::Failure(message.to_string()));
        self
    }

    /// References fetched so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SecretAccessor for RecordingSecretStore {
    fn fetch_secret(&self, reference: &str) -> Result<String, FetchError> {
        self.calls.borrow_mut().push(reference.to_string());
        match self.responses.get(reference) {
            Some(Response::Payload(payload)) => Ok(payload.clone()),
            Some(Response::Failure(message)) => Err(message.clone().into()),
            None => Err(format!("unexpected fetch of '{reference}'").into()),
        }
    }
}

/// Structured secret used across binder tests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretStruct {
    pub api_key: String,
}

impl SecretDocument for SecretStruct {}

/// Structured secret with several members
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSecret {
    pub host: String,
    pub user: String,
    pub password: String,
    pub port: u16,
}

impl SecretDocument for DatabaseSecret {}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

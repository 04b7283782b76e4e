//! Infrastructure layer module
//!
//! This module contains the adapters behind the domain ports and the
//! binder's own plumbing:
//! - Secret stores (in-memory, JSON file)
//! - Environment providers
//! - Settings management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod environment;
pub mod logging;
pub mod stores;

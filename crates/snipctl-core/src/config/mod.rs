//! Configuration and profile management for snipctl
//!
//! Profiles hold the values a recipe would otherwise read from the process
//! environment: project id, default location and zone, access token,
//! endpoint overrides and wait settings. Operations never read the
//! environment themselves; the CLI resolves a profile and passes plain
//! values down.
//!
//! # Features
//!
//! - Multiple named profiles with a default
//! - Secure credential storage using OS keyring (optional)
//! - Environment variable expansion in config files
//! - Platform-specific config file locations

#![allow(clippy::module_inception)]

pub mod config;
pub mod credential;
pub mod error;

pub use config::{ACCESS_TOKEN_ENV, Config, Profile};
pub use credential::{CredentialStorage, CredentialStore};
pub use error::{ConfigError, Result};

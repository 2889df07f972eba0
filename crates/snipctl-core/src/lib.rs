//! # snipctl-core
//!
//! Typed building blocks for single-call recipes against managed cloud
//! services. Every recipe follows the same four steps:
//!
//! 1. **Params** - a per-domain builder turns scalar inputs into a validated,
//!    fully-qualified request (`into_request()`). No I/O happens here.
//! 2. **Handler** - submits the request through a [`GoogleClient`] and returns
//!    either the finished resource or a long-running operation.
//! 3. **Wait** - [`operation::wait`] polls an operation until it is done,
//!    failed, or the deadline passes.
//! 4. **Report** - [`report::Report`] extracts the fields worth showing.
//!
//! ## Domains
//!
//! - [`compute`] - hyperdisk creation from a storage pool
//! - [`dataplex`] - catalog entry types
//! - [`secretmanager`] - secrets with annotations
//! - [`vertexai`] - prompt templates, content generation, prompt versions
//! - [`texttospeech`] - multi-speaker synthesis to an audio file
//!
//! ## Example
//!
//! ```rust,ignore
//! use snipctl_core::compute::{CreateHyperdiskParams, create_hyperdisk_from_pool_and_wait};
//! use snipctl_core::{GoogleClient, WaitOptions};
//!
//! let client = GoogleClient::builder().access_token(token).build()?;
//! let params = CreateHyperdiskParams::new("my-project", "us-central1-a", "test-disk", "my-pool")
//!     .with_size_gb(100);
//!
//! let disk = create_hyperdisk_from_pool_and_wait(&client, params, WaitOptions::default(), None).await?;
//! assert_eq!(disk.status.as_deref(), Some("READY"));
//! ```

pub mod client;
pub mod compute;
pub mod config;
pub mod dataplex;
pub mod error;
pub mod longrunning;
pub mod operation;
pub mod report;
pub mod resource;
pub mod secretmanager;
pub mod texttospeech;
pub mod vertexai;

pub use client::{Endpoints, GoogleClient, GoogleClientBuilder, Service};
pub use config::{Config, ConfigError, Profile};
pub use error::{ApiError, Code, CoreError, Result};
pub use operation::{
    OperationPoller, PollState, ProgressCallback, ProgressEvent, WaitOptions, WaitOutcome,
};
pub use report::Report;
pub use resource::{ProjectContext, ResourcePath};

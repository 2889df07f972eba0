//! Secret Manager: secrets with annotations
//!
//! Secret creation is synchronous; the response is the created secret.

pub mod handler;
pub mod model;
pub mod params;

pub use handler::{SecretsHandler, create_secret_with_annotations};
pub use model::{Replica, Replication, Secret, UserManaged};
pub use params::{CreateSecretParams, CreateSecretRequest};

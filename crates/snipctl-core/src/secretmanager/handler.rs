//! Secret Manager calls

use tracing::{debug, info};

use crate::client::{GoogleClient, Service};
use crate::error::Result;
use crate::resource::ResourcePath;

use super::model::Secret;
use super::params::{CreateSecretParams, CreateSecretRequest};

/// Handler for `projects/*/secrets`
#[derive(Debug, Clone)]
pub struct SecretsHandler {
    client: GoogleClient,
}

impl SecretsHandler {
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }

    /// Create a secret (no payload versions are added)
    pub async fn create(&self, request: &CreateSecretRequest) -> Result<Secret> {
        let path = format!("{}/secrets", request.parent);
        debug!("Creating secret {} in {}", request.secret_id, request.parent);
        let secret = self
            .client
            .post(
                Service::SecretManager,
                None,
                &path,
                &[("secretId", request.secret_id.as_str())],
                &request.secret,
            )
            .await?;
        Ok(secret)
    }

    /// Fetch secret metadata
    pub async fn get(&self, project_id: &str, secret_id: &str) -> Result<Secret> {
        let path = ResourcePath::project(project_id)?.child("secrets", secret_id)?;
        let secret = self
            .client
            .get(Service::SecretManager, None, path.as_str())
            .await?;
        Ok(secret)
    }
}

/// Validate `params` and create the secret
///
/// # Example
///
/// ```rust,ignore
/// let params = CreateSecretParams::new("my-project", "my-secret").with_annotation("env", "prod");
/// let secret = create_secret_with_annotations(&client, params).await?;
/// println!("Created secret: {}", secret.name);
/// ```
pub async fn create_secret_with_annotations(
    client: &GoogleClient,
    params: CreateSecretParams,
) -> Result<Secret> {
    let request = params.into_request()?;
    let secret = SecretsHandler::new(client.clone()).create(&request).await?;
    info!(
        "Created secret {} with {} annotation(s)",
        secret.name,
        secret.annotations.len()
    );
    Ok(secret)
}

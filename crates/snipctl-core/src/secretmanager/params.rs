//! Parameters for creating a secret

use std::collections::BTreeMap;

use crate::error::{CoreError, Result};
use crate::resource::{ResourcePath, require};

use super::model::{Replication, Secret};

const MAX_SECRET_ID_LEN: usize = 255;
const MAX_KEY_LEN: usize = 63;

/// Parameters for creating a secret with annotations
///
/// Replication defaults to automatic.
///
/// # Example
///
/// ```rust
/// use snipctl_core::secretmanager::CreateSecretParams;
///
/// let request = CreateSecretParams::new("my-project", "my-secret")
///     .with_annotation("env", "prod")
///     .into_request()
///     .unwrap();
///
/// assert_eq!(request.parent.as_str(), "projects/my-project");
/// assert_eq!(request.secret.annotations["env"], "prod");
/// ```
#[derive(Debug, Clone)]
pub struct CreateSecretParams {
    pub project_id: String,
    pub secret_id: String,
    pub annotations: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
    /// Replica locations; empty means automatic replication
    pub replica_locations: Vec<String>,
}

impl CreateSecretParams {
    #[must_use]
    pub fn new(project_id: impl Into<String>, secret_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            secret_id: secret_id.into(),
            annotations: BTreeMap::new(),
            labels: BTreeMap::new(),
            replica_locations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_annotations<I, K, V>(mut self, annotations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.annotations
            .extend(annotations.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Pin replicas to the given locations instead of automatic replication
    #[must_use]
    pub fn with_user_managed_replication<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replica_locations = locations.into_iter().map(Into::into).collect();
        self
    }

    /// Validate and build the create request
    pub fn into_request(self) -> Result<CreateSecretRequest> {
        let parent = ResourcePath::project(&self.project_id)?;
        let secret_id = require("secret_id", &self.secret_id)?.to_string();
        validate_secret_id(&secret_id)?;

        for key in self.annotations.keys() {
            validate_key("annotation", key)?;
        }
        for key in self.labels.keys() {
            validate_key("label", key)?;
        }

        let replication = if self.replica_locations.is_empty() {
            Replication::automatic()
        } else {
            let locations = self
                .replica_locations
                .iter()
                .map(|l| require("replica location", l).map(str::to_string))
                .collect::<Result<Vec<_>>>()?;
            Replication::user_managed(locations)
        };

        Ok(CreateSecretRequest {
            parent,
            secret_id,
            secret: Secret {
                replication,
                annotations: self.annotations,
                labels: self.labels,
                ..Secret::default()
            },
        })
    }
}

fn validate_secret_id(id: &str) -> Result<()> {
    let valid = id.len() <= MAX_SECRET_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(CoreError::validation(format!(
            "secret_id '{}' may only contain letters, digits, '-' and '_' (max {} characters)",
            id, MAX_SECRET_ID_LEN
        )));
    }
    Ok(())
}

/// Alphanumeric at both ends, `-`, `_` and `.` in between
fn validate_key(kind: &str, key: &str) -> Result<()> {
    let bytes = key.as_bytes();
    let valid = !bytes.is_empty()
        && bytes.len() <= MAX_KEY_LEN
        && bytes[0].is_ascii_alphanumeric()
        && bytes[bytes.len() - 1].is_ascii_alphanumeric()
        && bytes
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
    if !valid {
        return Err(CoreError::validation(format!(
            "invalid {} key '{}': must be 1-{} characters, start and end with a letter or digit, and contain only letters, digits, '-', '_' or '.'",
            kind, key, MAX_KEY_LEN
        )));
    }
    Ok(())
}

/// A validated secret creation
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSecretRequest {
    /// `projects/{project}`
    pub parent: ResourcePath,
    pub secret_id: String,
    pub secret: Secret,
}

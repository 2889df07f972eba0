//! Fully-qualified resource paths
//!
//! Every request names its target as a path such as
//! `projects/my-project/zones/us-central1-a/disks/test-disk`. Paths are built
//! one segment at a time from caller input, and every segment is checked, so
//! a missing project or zone is caught before a request exists.

use std::fmt;

use crate::error::{CoreError, Result};

/// Check a mandatory scalar and return it trimmed
pub(crate) fn require<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::validation(format!("{} must not be empty", field)));
    }
    if value.contains('/') {
        return Err(CoreError::validation(format!(
            "{} must not contain '/': {}",
            field, value
        )));
    }
    Ok(value)
}

/// A `collection/id/collection/id` resource name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// `projects/{project_id}`
    pub fn project(project_id: &str) -> Result<Self> {
        Ok(Self(format!("projects/{}", require("project_id", project_id)?)))
    }

    /// `.../zones/{zone}`
    pub fn zone(&self, zone: &str) -> Result<Self> {
        self.child_named("zones", "zone", zone)
    }

    /// `.../locations/{location}`
    pub fn location(&self, location: &str) -> Result<Self> {
        self.child_named("locations", "location", location)
    }

    /// `.../{collection}/{id}`
    pub fn child(&self, collection: &str, id: &str) -> Result<Self> {
        self.child_named(collection, collection, id)
    }

    fn child_named(&self, collection: &str, field: &str, id: &str) -> Result<Self> {
        let id = require(field, id)?;
        Ok(Self(format!("{}/{}/{}", self.0, collection, id)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last segment, i.e. the resource id
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Project and location passed explicitly to location-scoped calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub project_id: String,
    pub location: String,
}

impl ProjectContext {
    pub fn new(project_id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
        }
    }

    /// `projects/{project}/locations/{location}`
    pub fn parent(&self) -> Result<ResourcePath> {
        ResourcePath::project(&self.project_id)?.location(&self.location)
    }
}

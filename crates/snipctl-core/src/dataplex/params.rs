//! Parameters for creating an entry type

use std::collections::BTreeMap;

use crate::error::{CoreError, Result};
use crate::resource::ResourcePath;

use super::model::{AspectInfo, EntryType};

/// The system "generic" aspect type, usable from any project
pub const GENERIC_ASPECT_TYPE: &str =
    "projects/dataplex-types/locations/global/aspectTypes/generic";

const DEFAULT_DESCRIPTION: &str = "description of the entry type";
const MAX_ID_LEN: usize = 63;

/// Parameters for creating an entry type
///
/// Required aspects start out as the generic system aspect; use
/// [`with_required_aspects`](Self::with_required_aspects) to replace them.
///
/// # Example
///
/// ```rust
/// use snipctl_core::dataplex::{CreateEntryTypeParams, GENERIC_ASPECT_TYPE};
///
/// let request = CreateEntryTypeParams::new("my-project", "us-central1", "my-entry-type")
///     .into_request()
///     .unwrap();
///
/// assert_eq!(request.parent.as_str(), "projects/my-project/locations/us-central1");
/// assert_eq!(request.entry_type.required_aspects[0].aspect_type, GENERIC_ASPECT_TYPE);
/// ```
#[derive(Debug, Clone)]
pub struct CreateEntryTypeParams {
    pub project_id: String,
    pub location: String,
    pub entry_type_id: String,
    pub description: Option<String>,
    pub display_name: Option<String>,
    pub required_aspects: Vec<String>,
    pub labels: BTreeMap<String, String>,
}

impl CreateEntryTypeParams {
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
        entry_type_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
            entry_type_id: entry_type_id.into(),
            description: None,
            display_name: None,
            required_aspects: vec![GENERIC_ASPECT_TYPE.to_string()],
            labels: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Replace the required aspect types (full resource names)
    #[must_use]
    pub fn with_required_aspects<I, S>(mut self, aspect_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_aspects = aspect_types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Validate and build the create request
    pub fn into_request(self) -> Result<CreateEntryTypeRequest> {
        let parent = ResourcePath::project(&self.project_id)?.location(&self.location)?;
        let entry_type_id = self.entry_type_id.trim().to_string();
        validate_entry_type_id(&entry_type_id)?;

        if self.required_aspects.is_empty() {
            return Err(CoreError::validation(
                "an entry type needs at least one required aspect",
            ));
        }
        let required_aspects = self
            .required_aspects
            .into_iter()
            .map(|aspect_type| {
                let aspect_type = aspect_type.trim().to_string();
                if aspect_type.split('/').any(str::is_empty) {
                    Err(CoreError::validation(format!(
                        "required aspect must be a full aspect type name, got '{}'",
                        aspect_type
                    )))
                } else {
                    Ok(AspectInfo { aspect_type })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CreateEntryTypeRequest {
            parent,
            entry_type_id,
            entry_type: EntryType {
                description: Some(
                    self.description
                        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
                ),
                display_name: self.display_name,
                labels: self.labels,
                required_aspects,
                ..EntryType::default()
            },
        })
    }
}

/// Lowercase letter first, then lowercase letters, digits and hyphens
fn validate_entry_type_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(CoreError::validation("entry_type_id must not be empty"));
    }
    let valid = id.len() <= MAX_ID_LEN
        && id.starts_with(|c: char| c.is_ascii_lowercase())
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(CoreError::validation(format!(
            "entry_type_id '{}' must start with a lowercase letter and contain only lowercase letters, digits and hyphens (max {} characters)",
            id, MAX_ID_LEN
        )));
    }
    Ok(())
}

/// A validated entry type creation
#[derive(Debug, Clone, PartialEq)]
pub struct CreateEntryTypeRequest {
    /// `projects/{project}/locations/{location}`
    pub parent: ResourcePath,
    pub entry_type_id: String,
    pub entry_type: EntryType,
}

//! Dataplex wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::report::{Field, Report, push_some};

/// `projects/*/locations/*/entryTypes/*`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryType {
    /// Output only; set by the service
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_aspects: Vec<AspectInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// A required aspect, named by its aspect type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectInfo {
    #[serde(rename = "type")]
    pub aspect_type: String,
}

impl Report for EntryType {
    fn report(&self) -> Vec<Field> {
        let mut fields = vec![("Name", self.name.clone())];
        push_some(&mut fields, "Description", self.description.as_deref());
        if !self.required_aspects.is_empty() {
            let aspects = self
                .required_aspects
                .iter()
                .map(|a| a.aspect_type.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            fields.push(("Required aspects", aspects));
        }
        push_some(&mut fields, "Created", self.create_time.map(|t| t.to_rfc3339()));
        fields
    }
}

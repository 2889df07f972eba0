//! Secret Manager wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::client::Empty;
use crate::report::{Field, Report, push_some};

/// `projects/*/secrets/*`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub replication: Replication,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// Where secret payloads are stored. Exactly one of the two is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Replication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automatic: Option<Empty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_managed: Option<UserManaged>,
}

impl Default for Replication {
    fn default() -> Self {
        Self::automatic()
    }
}

impl Replication {
    pub fn automatic() -> Self {
        Self {
            automatic: Some(Empty {}),
            user_managed: None,
        }
    }

    pub fn user_managed<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            automatic: None,
            user_managed: Some(UserManaged {
                replicas: locations
                    .into_iter()
                    .map(|location| Replica {
                        location: location.into(),
                    })
                    .collect(),
            }),
        }
    }

    pub fn is_automatic(&self) -> bool {
        self.automatic.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserManaged {
    #[serde(default)]
    pub replicas: Vec<Replica>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replica {
    pub location: String,
}

impl Report for Secret {
    fn report(&self) -> Vec<Field> {
        let mut fields = vec![("Name", self.name.clone())];
        if !self.annotations.is_empty() {
            let annotations = self
                .annotations
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(", ");
            fields.push(("Annotations", annotations));
        }
        let replication = match &self.replication.user_managed {
            Some(user_managed) => user_managed
                .replicas
                .iter()
                .map(|r| r.location.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            None => "automatic".to_string(),
        };
        fields.push(("Replication", replication));
        push_some(&mut fields, "Created", self.create_time.map(|t| t.to_rfc3339()));
        fields
    }
}

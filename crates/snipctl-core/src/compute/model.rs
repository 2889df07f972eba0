//! Compute Engine wire types

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Code};
use crate::report::{Field, Report, push_some};

/// A persistent disk
///
/// Compute encodes int64 fields as JSON strings; see [`int64`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disk {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, with = "int64", skip_serializing_if = "Option::is_none")]
    pub size_gb: Option<i64>,
    /// Full or partial URL of the disk type
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_pool: Option<String>,
    #[serde(default, with = "int64", skip_serializing_if = "Option::is_none")]
    pub provisioned_iops: Option<i64>,
    /// MiB per second
    #[serde(default, with = "int64", skip_serializing_if = "Option::is_none")]
    pub provisioned_throughput: Option<i64>,
    /// CREATING, RESTORING, FAILED, READY, DELETING
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Report for Disk {
    fn report(&self) -> Vec<Field> {
        let mut fields = vec![("Name", self.name.clone())];
        push_some(&mut fields, "Status", self.status.as_deref());
        push_some(&mut fields, "Size (GB)", self.size_gb);
        push_some(&mut fields, "Provisioned IOPS", self.provisioned_iops);
        push_some(&mut fields, "Provisioned throughput", self.provisioned_throughput);
        push_some(&mut fields, "Storage pool", self.storage_pool.as_deref());
        fields
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    #[default]
    Pending,
    Running,
    Done,
}

/// A zonal Compute operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeOperation {
    pub name: String,
    #[serde(default)]
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationErrors>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<OperationMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_error_status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationErrors {
    #[serde(default)]
    pub errors: Vec<OperationMessage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationMessage {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ComputeOperation {
    pub fn is_done(&self) -> bool {
        self.status == OperationStatus::Done
    }

    /// The failure of a finished operation, if it had one
    pub fn failure(&self) -> Option<ApiError> {
        let errors = self.error.as_ref().filter(|e| !e.errors.is_empty())?;

        let code = match self.http_error_status_code {
            Some(status) => Code::from_http(status),
            None => compute_error_code(&errors.errors[0].code),
        };
        let message = errors
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join("; ");

        Some(ApiError::Status {
            http_status: self.http_error_status_code.unwrap_or(200),
            code,
            message,
        })
    }
}

/// Map Compute's error reasons onto canonical codes
fn compute_error_code(reason: &str) -> Code {
    match reason {
        "QUOTA_EXCEEDED" | "ZONE_RESOURCE_POOL_EXHAUSTED" => Code::ResourceExhausted,
        "RESOURCE_ALREADY_EXISTS" | "ALREADY_EXISTS" => Code::AlreadyExists,
        "RESOURCE_NOT_FOUND" | "NOT_FOUND" => Code::NotFound,
        "PERMISSION_DENIED" | "FORBIDDEN" => Code::PermissionDenied,
        "INVALID_FIELD_VALUE" | "INVALID_ARGUMENT" | "BAD_REQUEST" => Code::InvalidArgument,
        other => Code::from_name(other),
    }
}

/// Serde adapter for int64 values sent as JSON strings
pub(crate) mod int64 {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Str(String),
        Num(i64),
    }

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => serializer.serialize_str(&n.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Repr::Num(n)) => Ok(Some(n)),
            Some(Repr::Str(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_disk_int64_fields_are_strings_on_the_wire() {
        let disk = Disk {
            name: "test-disk".to_string(),
            size_gb: Some(100),
            ..Disk::default()
        };
        let value = serde_json::to_value(&disk).unwrap();
        assert_eq!(value["sizeGb"], json!("100"));
        assert!(value.get("provisionedIops").is_none());
    }

    #[test]
    fn test_disk_from_service_response() {
        let disk: Disk = serde_json::from_value(json!({
            "name": "test-disk",
            "sizeGb": "100",
            "status": "READY",
            "provisionedIops": "3600",
            "provisionedThroughput": 290,
            "type": "https://www.googleapis.com/compute/v1/projects/p/zones/z/diskTypes/hyperdisk-balanced",
            "kind": "compute#disk"
        }))
        .unwrap();

        assert_eq!(disk.size_gb, Some(100));
        assert_eq!(disk.provisioned_iops, Some(3600));
        assert_eq!(disk.provisioned_throughput, Some(290));
        assert_eq!(
            disk.report_lines(),
            vec![
                "Name: test-disk",
                "Status: READY",
                "Size (GB): 100",
                "Provisioned IOPS: 3600",
                "Provisioned throughput: 290",
            ]
        );
    }

    #[test]
    fn test_operation_failure_uses_http_status() {
        let op: ComputeOperation = serde_json::from_value(json!({
            "name": "operation-1",
            "status": "DONE",
            "httpErrorStatusCode": 409,
            "error": {"errors": [{"code": "RESOURCE_ALREADY_EXISTS", "message": "The resource 'test-disk' already exists"}]}
        }))
        .unwrap();

        assert!(op.is_done());
        let err = op.failure().unwrap();
        assert_eq!(err.code(), Some(&Code::AlreadyExists));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_operation_failure_from_reason() {
        let op: ComputeOperation = serde_json::from_value(json!({
            "name": "operation-1",
            "status": "DONE",
            "error": {"errors": [{"code": "QUOTA_EXCEEDED", "message": "Quota exceeded"}]}
        }))
        .unwrap();
        assert_eq!(op.failure().unwrap().code(), Some(&Code::ResourceExhausted));
    }

    #[test]
    fn test_successful_operation_has_no_failure() {
        let op: ComputeOperation =
            serde_json::from_value(json!({"name": "operation-1", "status": "DONE"})).unwrap();
        assert!(op.failure().is_none());
    }
}

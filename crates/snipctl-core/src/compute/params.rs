//! Parameters for creating a hyperdisk from a storage pool

use crate::error::{CoreError, Result};
use crate::resource::{ResourcePath, require};

use super::model::Disk;

/// Disk type used when none is given
pub const DEFAULT_DISK_TYPE: &str = "hyperdisk-balanced";
/// Disk size used when none is given
pub const DEFAULT_SIZE_GB: i64 = 100;

/// Parameters for creating a disk inside a storage pool
///
/// # Example
///
/// ```rust
/// use snipctl_core::compute::CreateHyperdiskParams;
///
/// let request = CreateHyperdiskParams::new("my-project", "us-central1-a", "test-disk", "my-pool")
///     .with_size_gb(100)
///     .into_request()
///     .unwrap();
///
/// assert_eq!(
///     request.disk.storage_pool.as_deref(),
///     Some("projects/my-project/zones/us-central1-a/storagePools/my-pool")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CreateHyperdiskParams {
    pub project_id: String,
    pub zone: String,
    pub disk_name: String,
    pub storage_pool: String,
    /// Size in GB (default: 100)
    pub size_gb: Option<i64>,
    /// Disk type short name (default: hyperdisk-balanced)
    pub disk_type: Option<String>,
    pub provisioned_iops: Option<i64>,
    /// MiB per second
    pub provisioned_throughput: Option<i64>,
}

impl CreateHyperdiskParams {
    /// Create new params with required fields
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        zone: impl Into<String>,
        disk_name: impl Into<String>,
        storage_pool: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            zone: zone.into(),
            disk_name: disk_name.into(),
            storage_pool: storage_pool.into(),
            size_gb: None,
            disk_type: None,
            provisioned_iops: None,
            provisioned_throughput: None,
        }
    }

    #[must_use]
    pub fn with_size_gb(mut self, size_gb: i64) -> Self {
        self.size_gb = Some(size_gb);
        self
    }

    #[must_use]
    pub fn with_disk_type(mut self, disk_type: impl Into<String>) -> Self {
        self.disk_type = Some(disk_type.into());
        self
    }

    #[must_use]
    pub fn with_provisioned_iops(mut self, iops: i64) -> Self {
        self.provisioned_iops = Some(iops);
        self
    }

    #[must_use]
    pub fn with_provisioned_throughput(mut self, throughput: i64) -> Self {
        self.provisioned_throughput = Some(throughput);
        self
    }

    /// Validate and build the insert request
    pub fn into_request(self) -> Result<DiskInsertRequest> {
        let zone_path = ResourcePath::project(&self.project_id)?.zone(&self.zone)?;
        let disk_name = require("disk_name", &self.disk_name)?.to_string();
        let disk_type = zone_path.child(
            "diskTypes",
            self.disk_type.as_deref().unwrap_or(DEFAULT_DISK_TYPE),
        )?;
        let storage_pool = zone_path.child("storagePools", &self.storage_pool)?;

        let size_gb = self.size_gb.unwrap_or(DEFAULT_SIZE_GB);
        if size_gb <= 0 {
            return Err(CoreError::validation(format!(
                "size_gb must be positive, got {}",
                size_gb
            )));
        }
        for (field, value) in [
            ("provisioned_iops", self.provisioned_iops),
            ("provisioned_throughput", self.provisioned_throughput),
        ] {
            if let Some(v) = value
                && v <= 0
            {
                return Err(CoreError::validation(format!(
                    "{} must be positive, got {}",
                    field, v
                )));
            }
        }

        let zone = zone_path.id().to_string();
        Ok(DiskInsertRequest {
            project_id: self.project_id.trim().to_string(),
            zone: zone.clone(),
            parent: zone_path,
            disk: Disk {
                name: disk_name,
                zone: Some(zone),
                size_gb: Some(size_gb),
                disk_type: Some(disk_type.into_string()),
                storage_pool: Some(storage_pool.into_string()),
                provisioned_iops: self.provisioned_iops,
                provisioned_throughput: self.provisioned_throughput,
                ..Disk::default()
            },
        })
    }
}

/// A validated disk insert: the zone to create in and the disk body
#[derive(Debug, Clone, PartialEq)]
pub struct DiskInsertRequest {
    pub project_id: String,
    pub zone: String,
    /// `projects/{project}/zones/{zone}`
    pub parent: ResourcePath,
    pub disk: Disk,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> CreateHyperdiskParams {
        CreateHyperdiskParams::new("my-project", "us-central1-a", "test-disk", "my-pool")
    }

    #[test]
    fn test_defaults() {
        let request = params().into_request().unwrap();
        assert_eq!(request.parent.as_str(), "projects/my-project/zones/us-central1-a");
        assert_eq!(request.disk.name, "test-disk");
        assert_eq!(request.disk.zone.as_deref(), Some("us-central1-a"));
        assert_eq!(request.disk.size_gb, Some(100));
        assert_eq!(
            request.disk.disk_type.as_deref(),
            Some("projects/my-project/zones/us-central1-a/diskTypes/hyperdisk-balanced")
        );
        assert!(request.disk.provisioned_iops.is_none());
    }

    #[test]
    fn test_with_options() {
        let request = params()
            .with_size_gb(500)
            .with_disk_type("hyperdisk-throughput")
            .with_provisioned_iops(10000)
            .with_provisioned_throughput(140)
            .into_request()
            .unwrap();

        assert_eq!(request.disk.size_gb, Some(500));
        assert_eq!(request.disk.provisioned_iops, Some(10000));
        assert_eq!(request.disk.provisioned_throughput, Some(140));
        assert!(
            request
                .disk
                .disk_type
                .unwrap()
                .ends_with("/diskTypes/hyperdisk-throughput")
        );
    }

    #[test]
    fn test_missing_fields_fail() {
        for bad in [
            CreateHyperdiskParams::new("", "us-central1-a", "d", "pool"),
            CreateHyperdiskParams::new("p", "", "d", "pool"),
            CreateHyperdiskParams::new("p", "us-central1-a", "", "pool"),
            CreateHyperdiskParams::new("p", "us-central1-a", "d", ""),
        ] {
            let err = bad.into_request().unwrap_err();
            assert!(err.is_validation(), "expected validation error, got {err}");
        }
    }

    #[test]
    fn test_non_positive_size_fails() {
        let err = params().with_size_gb(0).into_request().unwrap_err();
        assert!(err.to_string().contains("size_gb"));

        let err = params().with_provisioned_iops(-1).into_request().unwrap_err();
        assert!(err.to_string().contains("provisioned_iops"));
    }
}

//! Compute Engine disk and zonal operation calls

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::{GoogleClient, Service};
use crate::error::Result;
use crate::operation::{OperationPoller, PollState};
use crate::resource::ResourcePath;

use super::model::{ComputeOperation, Disk};
use super::params::DiskInsertRequest;

/// Handler for `projects/*/zones/*/disks`
#[derive(Debug, Clone)]
pub struct DisksHandler {
    client: GoogleClient,
}

impl DisksHandler {
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }

    /// Start creating a disk. Returns the zonal operation.
    pub async fn insert(&self, request: &DiskInsertRequest) -> Result<ComputeOperation> {
        let path = format!("{}/disks", request.parent);
        debug!("Inserting disk {} in {}", request.disk.name, request.parent);
        let op: ComputeOperation = self
            .client
            .post(Service::Compute, None, &path, &[], &request.disk)
            .await?;
        Ok(op)
    }

    /// Fetch a disk
    pub async fn get(&self, project_id: &str, zone: &str, disk_name: &str) -> Result<Disk> {
        let path = ResourcePath::project(project_id)?
            .zone(zone)?
            .child("disks", disk_name)?;
        let disk = self.client.get(Service::Compute, None, path.as_str()).await?;
        Ok(disk)
    }

    /// Poller for an operation returned by [`DisksHandler::insert`]
    pub fn operation_poller(
        &self,
        zone_path: &ResourcePath,
        operation: &ComputeOperation,
    ) -> Result<ZoneOperationPoller> {
        let path = zone_path.child("operations", &operation.name)?;
        Ok(ZoneOperationPoller {
            client: self.client.clone(),
            path,
        })
    }
}

/// Polls `GET projects/{p}/zones/{z}/operations/{name}`
pub struct ZoneOperationPoller {
    client: GoogleClient,
    path: ResourcePath,
}

#[async_trait]
impl OperationPoller for ZoneOperationPoller {
    type Output = ComputeOperation;

    fn operation(&self) -> &str {
        self.path.id()
    }

    async fn poll(&self) -> Result<PollState<ComputeOperation>> {
        let op: ComputeOperation = self
            .client
            .get(Service::Compute, None, self.path.as_str())
            .await?;

        if !op.is_done() {
            return Ok(PollState::Pending {
                status: format!("{:?}", op.status).to_uppercase(),
            });
        }

        for warning in &op.warnings {
            warn!(
                "Operation {} warning {}: {}",
                op.name, warning.code, warning.message
            );
        }

        match op.failure() {
            Some(err) => Ok(PollState::Failed(err)),
            None => Ok(PollState::Done(op)),
        }
    }
}

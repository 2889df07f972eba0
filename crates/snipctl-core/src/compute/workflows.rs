//! Compute workflows

use std::time::Duration;
use tracing::info;

use crate::client::GoogleClient;
use crate::error::Result;
use crate::operation::{ProgressCallback, WaitOptions, wait_for_completion};

use super::handler::DisksHandler;
use super::model::Disk;
use super::params::CreateHyperdiskParams;

/// Default wait budget for disk creation
pub const DISK_CREATE_TIMEOUT: Duration = Duration::from_secs(300);

/// Wait options suited to disk creation
pub fn disk_wait_options() -> WaitOptions {
    WaitOptions::default().with_timeout(DISK_CREATE_TIMEOUT)
}

/// Create a hyperdisk in a storage pool and wait for it
///
/// 1. Validates `params` (no request is sent if this fails)
/// 2. Inserts the disk (returns a zonal operation)
/// 3. Polls the operation until it is done
/// 4. Fetches and returns the created disk
///
/// # Example
///
/// ```rust,ignore
/// let params = CreateHyperdiskParams::new("my-project", "us-central1-a", "test-disk", "my-pool");
/// let disk = create_hyperdisk_from_pool_and_wait(&client, params, disk_wait_options(), None).await?;
/// println!("{}", disk.status.unwrap_or_default()); // READY
/// ```
pub async fn create_hyperdisk_from_pool_and_wait(
    client: &GoogleClient,
    params: CreateHyperdiskParams,
    options: WaitOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<Disk> {
    let request = params.into_request()?;
    let handler = DisksHandler::new(client.clone());

    let operation = handler.insert(&request).await?;
    let poller = handler.operation_poller(&request.parent, &operation)?;
    wait_for_completion(&poller, options, on_progress).await?;

    let disk = handler
        .get(&request.project_id, &request.zone, &request.disk.name)
        .await?;
    info!(
        "Disk {} is {} (IOPS {:?}, throughput {:?})",
        disk.name,
        disk.status.as_deref().unwrap_or("UNKNOWN"),
        disk.provisioned_iops,
        disk.provisioned_throughput
    );
    Ok(disk)
}

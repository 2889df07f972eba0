//! `disk` commands

use crate::cli::{Cli, DiskCommands};
use crate::connection::ConnectionManager;
use crate::error::SnipCtlError;
use crate::output::print_result;
use crate::progress::WaitSpinner;
use snipctl_core::compute::{
    CreateHyperdiskParams, create_hyperdisk_from_pool_and_wait, disk_wait_options,
};
use tracing::debug;

pub async fn handle_disk_command(
    cmd: &DiskCommands,
    conn_mgr: &ConnectionManager,
    cli: &Cli,
) -> Result<(), SnipCtlError> {
    match cmd {
        DiskCommands::CreateFromPool {
            zone,
            name,
            storage_pool,
            size_gb,
            disk_type,
            provisioned_iops,
            provisioned_throughput,
            wait,
        } => {
            let profile = cli.profile.as_deref();
            let project_id = conn_mgr.project_id(cli.project.as_deref(), profile)?;
            let zone = conn_mgr.zone(zone.as_deref(), profile)?;
            let options = conn_mgr.wait_options(profile, disk_wait_options(), wait)?;

            let mut params = CreateHyperdiskParams::new(&project_id, &zone, name, storage_pool)
                .with_size_gb(*size_gb)
                .with_disk_type(disk_type);
            if let Some(iops) = provisioned_iops {
                params = params.with_provisioned_iops(*iops);
            }
            if let Some(throughput) = provisioned_throughput {
                params = params.with_provisioned_throughput(*throughput);
            }
            debug!("Creating disk {} in {}/{}", name, project_id, zone);

            let client = conn_mgr.create_client(profile)?;
            let spinner = WaitSpinner::new(format!("Creating disk {}", name), cli.output);
            let callback = spinner.callback();
            let disk =
                create_hyperdisk_from_pool_and_wait(&client, params, options, Some(&callback))
                    .await?;
            spinner.finish();

            print_result(&disk, cli.output, cli.query.as_deref())
        }
    }
}

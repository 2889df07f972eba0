//! `secret` commands

use crate::cli::{Cli, SecretCommands};
use crate::connection::ConnectionManager;
use crate::error::SnipCtlError;
use crate::output::print_result_headed;
use snipctl_core::secretmanager::{CreateSecretParams, create_secret_with_annotations};

pub async fn handle_secret_command(
    cmd: &SecretCommands,
    conn_mgr: &ConnectionManager,
    cli: &Cli,
) -> Result<(), SnipCtlError> {
    match cmd {
        SecretCommands::CreateWithAnnotations {
            project_id,
            secret_id,
            annotation_key,
            annotation_value,
            replica_locations,
        } => {
            let mut params = CreateSecretParams::new(project_id, secret_id)
                .with_annotation(annotation_key, annotation_value);
            if !replica_locations.is_empty() {
                params = params.with_user_managed_replication(replica_locations);
            }

            let client = conn_mgr.create_client(cli.profile.as_deref())?;
            let secret = create_secret_with_annotations(&client, params).await?;

            print_result_headed(
                &secret,
                &format!("Created secret: {}", secret.name),
                cli.output,
                cli.query.as_deref(),
            )
        }
    }
}

//! `entry-type` commands

use crate::cli::{Cli, EntryTypeCommands};
use crate::connection::ConnectionManager;
use crate::error::SnipCtlError;
use crate::output::print_result_headed;
use crate::progress::WaitSpinner;
use snipctl_core::WaitOptions;
use snipctl_core::dataplex::{CreateEntryTypeParams, create_entry_type_and_wait};

pub async fn handle_entry_type_command(
    cmd: &EntryTypeCommands,
    conn_mgr: &ConnectionManager,
    cli: &Cli,
) -> Result<(), SnipCtlError> {
    match cmd {
        EntryTypeCommands::Create {
            location,
            id,
            description,
            display_name,
            required_aspects,
            wait,
        } => {
            let profile = cli.profile.as_deref();
            let project_id = conn_mgr.project_id(cli.project.as_deref(), profile)?;
            let location = conn_mgr.location(location.as_deref(), profile, None)?;
            let options = conn_mgr.wait_options(profile, WaitOptions::default(), wait)?;

            let mut params = CreateEntryTypeParams::new(&project_id, &location, id);
            if let Some(description) = description {
                params = params.with_description(description);
            }
            if let Some(display_name) = display_name {
                params = params.with_display_name(display_name);
            }
            if !required_aspects.is_empty() {
                params = params.with_required_aspects(required_aspects);
            }

            let client = conn_mgr.create_client(profile)?;
            let spinner = WaitSpinner::new(format!("Creating entry type {}", id), cli.output);
            let callback = spinner.callback();
            let entry_type =
                create_entry_type_and_wait(&client, params, options, Some(&callback)).await?;
            spinner.finish();

            print_result_headed(
                &entry_type,
                &format!("Successfully created entry type: {}", entry_type.name),
                cli.output,
                cli.query.as_deref(),
            )
        }
    }
}

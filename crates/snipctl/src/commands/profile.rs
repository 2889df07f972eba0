//! Profile management command implementations

use crate::cli::{Cli, OutputFormat, ProfileCommands};
use crate::connection::ConnectionManager;
use crate::error::SnipCtlError;
use crate::output;
use anyhow::Context;
use colored::Colorize;
use snipctl_core::config::CredentialStore;
use snipctl_core::{Endpoints, Profile};
use tracing::{debug, info, trace, warn};

/// Handle profile management commands
pub async fn handle_profile_command(
    profile_cmd: &ProfileCommands,
    conn_mgr: &ConnectionManager,
    cli: &Cli,
) -> Result<(), SnipCtlError> {
    use ProfileCommands::*;

    match profile_cmd {
        List => handle_list(conn_mgr, cli.output),
        Path => handle_path(conn_mgr, cli.output),
        Show { name } => handle_show(conn_mgr, name.as_deref(), cli.output),
        Set {
            name,
            project_id,
            location,
            zone,
            access_token,
            prompt_token,
            #[cfg(feature = "secure-storage")]
            use_keyring,
            wait_timeout,
            poll_interval,
            compute_endpoint,
            dataplex_endpoint,
            secret_manager_endpoint,
            text_to_speech_endpoint,
            aiplatform_endpoint,
        } => {
            let token = match (access_token, prompt_token) {
                (Some(token), _) => Some(token.clone()),
                (None, true) => Some(
                    rpassword::prompt_password("Enter access token: ")
                        .context("Failed to read access token")?,
                ),
                (None, false) => None,
            };

            #[cfg(feature = "secure-storage")]
            let token = match token {
                Some(token) if *use_keyring => {
                    let reference = CredentialStore::new()
                        .store_credential(&format!("{}-access-token", name), &token)
                        .context("Failed to store access token in keyring")?;
                    println!("Access token stored securely in OS keyring");
                    Some(reference)
                }
                other => other,
            };

            let update = Profile {
                project_id: project_id.clone(),
                location: location.clone(),
                zone: zone.clone(),
                access_token: token,
                endpoints: Endpoints {
                    compute: compute_endpoint.clone(),
                    dataplex: dataplex_endpoint.clone(),
                    secret_manager: secret_manager_endpoint.clone(),
                    text_to_speech: text_to_speech_endpoint.clone(),
                    aiplatform: aiplatform_endpoint.clone(),
                },
                wait_timeout_secs: *wait_timeout,
                poll_interval_secs: *poll_interval,
            };
            handle_set(conn_mgr, name, update)
        }
        Remove { name } => handle_remove(conn_mgr, name),
        Default { name } => handle_default(conn_mgr, name),
    }
}

fn handle_list(conn_mgr: &ConnectionManager, output_format: OutputFormat) -> Result<(), SnipCtlError> {
    debug!("Listing all configured profiles");
    let profiles = conn_mgr.config.list_profiles();
    trace!("Found {} profiles", profiles.len());
    let default = conn_mgr.config.default_profile.as_deref();

    match output_format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let profile_list: Vec<serde_json::Value> = profiles
                .iter()
                .map(|(name, profile)| {
                    serde_json::json!({
                        "name": name,
                        "is_default": default == Some(name.as_str()),
                        "project_id": profile.project_id,
                        "location": profile.location,
                        "zone": profile.zone,
                    })
                })
                .collect();

            let output_data = serde_json::json!({
                "config_path": conn_mgr.display_path().map(|p| p.display().to_string()),
                "profiles": profile_list,
                "count": profiles.len()
            });
            output::print_output(&output_data, output_format, None)?;
        }
        _ => {
            if let Some(path) = conn_mgr.display_path() {
                println!("Configuration file: {}", path.display());
                println!();
            }

            if profiles.is_empty() {
                info!("No profiles configured");
                println!("No profiles configured.");
                println!("Use 'snipctl profile set' to create a profile.");
                return Ok(());
            }

            for (name, profile) in &profiles {
                let marker = if default == Some(name.as_str()) {
                    " (default)".green().to_string()
                } else {
                    String::new()
                };
                println!("{}{}", name.bold().cyan(), marker);
                println!(
                    "  Project: {}",
                    profile.project_id.as_deref().unwrap_or("-")
                );
                if let Some(location) = &profile.location {
                    println!("  Location: {}", location);
                }
                if let Some(zone) = &profile.zone {
                    println!("  Zone: {}", zone);
                }
            }
        }
    }
    Ok(())
}

fn handle_path(conn_mgr: &ConnectionManager, output_format: OutputFormat) -> Result<(), SnipCtlError> {
    let config_path = match conn_mgr.display_path() {
        Some(path) => path,
        None => return Err(snipctl_core::ConfigError::ConfigDirError.into()),
    };

    match output_format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let output_data = serde_json::json!({
                "config_path": config_path.display().to_string()
            });
            output::print_output(&output_data, output_format, None)?;
        }
        _ => {
            println!("{}", config_path.display());
        }
    }
    Ok(())
}

fn handle_show(
    conn_mgr: &ConnectionManager,
    name: Option<&str>,
    output_format: OutputFormat,
) -> Result<(), SnipCtlError> {
    let name = conn_mgr.config.resolve_profile(name)?;
    let profile = conn_mgr
        .config
        .profiles
        .get(&name)
        .ok_or_else(|| SnipCtlError::ProfileNotFound { name: name.clone() })?;
    let is_default = conn_mgr.config.default_profile.as_deref() == Some(name.as_str());
    let token = token_preview(profile.access_token.as_deref());

    match output_format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let output_data = serde_json::json!({
                "name": name,
                "is_default": is_default,
                "project_id": profile.project_id,
                "location": profile.location,
                "zone": profile.zone,
                "access_token": token,
                "endpoints": profile.endpoints,
                "wait_timeout_secs": profile.wait_timeout_secs,
                "poll_interval_secs": profile.poll_interval_secs,
            });
            output::print_output(&output_data, output_format, None)?;
        }
        _ => {
            println!("Profile: {}", name.bold());
            if is_default {
                println!("Default: {}", "yes".green());
            }
            println!("Project: {}", profile.project_id.as_deref().unwrap_or("-"));
            println!("Location: {}", profile.location.as_deref().unwrap_or("-"));
            println!("Zone: {}", profile.zone.as_deref().unwrap_or("-"));
            println!("Access token: {}", token.as_deref().unwrap_or("-"));
            if let Some(secs) = profile.wait_timeout_secs {
                println!("Wait timeout: {}s", secs);
            }
            if let Some(secs) = profile.poll_interval_secs {
                println!("Poll interval: {}s", secs);
            }
            if !profile.endpoints.is_empty() {
                println!("Endpoints:");
                for (service, url) in [
                    ("compute", &profile.endpoints.compute),
                    ("dataplex", &profile.endpoints.dataplex),
                    ("secret_manager", &profile.endpoints.secret_manager),
                    ("text_to_speech", &profile.endpoints.text_to_speech),
                    ("aiplatform", &profile.endpoints.aiplatform),
                ] {
                    if let Some(url) = url {
                        println!("  {}: {}", service, url);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Keyring references are shown as-is; plaintext tokens only by prefix
fn token_preview(token: Option<&str>) -> Option<String> {
    token.map(|token| {
        if CredentialStore::is_keyring_reference(token) {
            token.to_string()
        } else {
            let prefix: String = token.chars().take(8).collect();
            format!("{}...", prefix)
        }
    })
}

fn handle_set(conn_mgr: &ConnectionManager, name: &str, update: Profile) -> Result<(), SnipCtlError> {
    debug!("Setting profile: {}", name);

    // Flags that were not given keep their existing values
    let profile = match conn_mgr.config.profiles.get(name) {
        Some(existing) => merge(existing, update),
        None => update,
    };

    let mut config = conn_mgr.config.clone();
    let first_profile = config.profiles.is_empty();
    config.set_profile(name.to_string(), profile);
    if first_profile {
        config.default_profile = Some(name.to_string());
    }
    conn_mgr.save_config(&config)?;

    match conn_mgr.display_path() {
        Some(path) => {
            println!("Profile '{}' saved successfully to:", name);
            println!("  {}", path.display());
        }
        None => println!("Profile '{}' saved successfully.", name),
    }
    if first_profile {
        println!("Profile '{}' is now the default.", name);
    }
    Ok(())
}

fn merge(existing: &Profile, update: Profile) -> Profile {
    let endpoints = Endpoints {
        compute: update.endpoints.compute.or(existing.endpoints.compute.clone()),
        dataplex: update.endpoints.dataplex.or(existing.endpoints.dataplex.clone()),
        secret_manager: update
            .endpoints
            .secret_manager
            .or(existing.endpoints.secret_manager.clone()),
        text_to_speech: update
            .endpoints
            .text_to_speech
            .or(existing.endpoints.text_to_speech.clone()),
        aiplatform: update
            .endpoints
            .aiplatform
            .or(existing.endpoints.aiplatform.clone()),
    };
    Profile {
        project_id: update.project_id.or(existing.project_id.clone()),
        location: update.location.or(existing.location.clone()),
        zone: update.zone.or(existing.zone.clone()),
        access_token: update.access_token.or(existing.access_token.clone()),
        endpoints,
        wait_timeout_secs: update.wait_timeout_secs.or(existing.wait_timeout_secs),
        poll_interval_secs: update.poll_interval_secs.or(existing.poll_interval_secs),
    }
}

fn handle_remove(conn_mgr: &ConnectionManager, name: &str) -> Result<(), SnipCtlError> {
    debug!("Removing profile: {}", name);

    let mut config = conn_mgr.config.clone();
    let was_default = config.default_profile.as_deref() == Some(name);
    let Some(removed) = config.remove_profile(name) else {
        return Err(SnipCtlError::ProfileNotFound { name: name.into() });
    };

    if let Some(key) = removed
        .access_token
        .as_deref()
        .and_then(CredentialStore::keyring_key)
        && let Err(e) = CredentialStore::new().delete_credential(key)
    {
        warn!("Failed to delete keyring entry {}: {}", key, e);
    }

    conn_mgr.save_config(&config)?;
    if was_default {
        println!("Default profile cleared.");
    }
    println!("Profile '{}' removed successfully.", name);
    Ok(())
}

fn handle_default(conn_mgr: &ConnectionManager, name: &str) -> Result<(), SnipCtlError> {
    debug!("Setting default profile: {}", name);

    if !conn_mgr.config.profiles.contains_key(name) {
        return Err(SnipCtlError::ProfileNotFound { name: name.into() });
    }

    let mut config = conn_mgr.config.clone();
    config.default_profile = Some(name.to_string());
    conn_mgr.save_config(&config)?;

    println!("Default profile set to '{}'.", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_preview() {
        assert_eq!(
            token_preview(Some("ya29.a0AfH6SMB-long-token")),
            Some("ya29.a0A...".to_string())
        );
        assert_eq!(
            token_preview(Some("keyring:dev-access-token")),
            Some("keyring:dev-access-token".to_string())
        );
        assert_eq!(token_preview(None), None);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let existing = Profile {
            project_id: Some("old".to_string()),
            zone: Some("us-central1-a".to_string()),
            endpoints: Endpoints {
                compute: Some("http://localhost:1".to_string()),
                ..Endpoints::default()
            },
            ..Profile::default()
        };
        let update = Profile {
            project_id: Some("new".to_string()),
            ..Profile::default()
        };

        let merged = merge(&existing, update);
        assert_eq!(merged.project_id.as_deref(), Some("new"));
        assert_eq!(merged.zone.as_deref(), Some("us-central1-a"));
        assert_eq!(
            merged.endpoints.compute.as_deref(),
            Some("http://localhost:1")
        );
    }
}

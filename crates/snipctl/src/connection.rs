//! Client and setting resolution from profiles, flags and the environment

use crate::cli::WaitArgs;
use crate::error::{Result as CliResult, SnipCtlError};
use anyhow::Context;
use snipctl_core::config::ACCESS_TOKEN_ENV;
use snipctl_core::{Config, GoogleClient, Profile, WaitOptions};
use std::time::Duration;
use tracing::{debug, info, trace};

/// Upper bound on a single HTTP request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection manager for creating authenticated clients
#[derive(Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<std::path::PathBuf>,
}

impl ConnectionManager {
    /// Create a new connection manager with a custom config path
    pub fn with_config_path(config: Config, config_path: Option<std::path::PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Save `config` to the explicit path, or the default location
    pub fn save_config(&self, config: &Config) -> CliResult<()> {
        if let Some(ref path) = self.config_path {
            config
                .save_to_path(path)
                .context("Failed to save configuration")?;
        } else {
            config.save().context("Failed to save configuration")?;
        }
        Ok(())
    }

    /// Where the configuration lives, for display
    pub fn display_path(&self) -> Option<std::path::PathBuf> {
        self.config_path
            .clone()
            .or_else(|| Config::config_path().ok())
    }

    /// The profile to use with `${VAR}` references expanded, or `None` when
    /// no profiles exist and none was named
    pub fn profile(&self, profile_name: Option<&str>) -> CliResult<Option<Profile>> {
        Ok(self
            .config
            .active_profile(profile_name)?
            .map(Profile::expanded))
    }

    /// Create an authenticated client from profile credentials
    ///
    /// The access token comes from `GOOGLE_OAUTH_ACCESS_TOKEN` or the profile.
    /// When --config-file is specified explicitly the environment is ignored.
    pub fn create_client(&self, profile_name: Option<&str>) -> CliResult<GoogleClient> {
        debug!("Creating client");
        trace!("Profile name: {:?}", profile_name);

        let use_env_vars = self.config_path.is_none();
        if !use_env_vars {
            info!("--config-file specified explicitly, ignoring environment variables");
        }
        let env_var = use_env_vars.then_some(ACCESS_TOKEN_ENV);

        let profile = self.profile(profile_name)?;
        let token = match &profile {
            Some(profile) => profile.resolve_access_token(env_var)?,
            None => env_var.and_then(|var| std::env::var(var).ok()),
        }
        .filter(|token| !token.trim().is_empty());

        let Some(token) = token else {
            return Err(SnipCtlError::MissingCredentials {
                profile: self.config.resolve_profile(profile_name).ok(),
            });
        };

        let endpoints = profile.map(|p| p.endpoints).unwrap_or_default();
        debug!("Endpoint overrides present: {}", !endpoints.is_empty());

        let client = GoogleClient::builder()
            .access_token(token)
            .endpoints(endpoints)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(snipctl_core::CoreError::from)?;
        Ok(client)
    }

    /// Project id from --project (or `GOOGLE_CLOUD_PROJECT`), then the profile
    pub fn project_id(
        &self,
        explicit: Option<&str>,
        profile_name: Option<&str>,
    ) -> CliResult<String> {
        self.setting(explicit, profile_name, |p| p.project_id.as_deref())
            .ok_or(SnipCtlError::MissingSetting {
                setting: "project",
                flag: "--project <PROJECT>",
            })
    }

    pub fn zone(&self, explicit: Option<&str>, profile_name: Option<&str>) -> CliResult<String> {
        self.setting(explicit, profile_name, |p| p.zone.as_deref())
            .ok_or(SnipCtlError::MissingSetting {
                setting: "zone",
                flag: "--zone <ZONE>",
            })
    }

    /// Location from the flag, then the profile, then `fallback`
    pub fn location(
        &self,
        explicit: Option<&str>,
        profile_name: Option<&str>,
        fallback: Option<&str>,
    ) -> CliResult<String> {
        self.setting(explicit, profile_name, |p| p.location.as_deref())
            .or_else(|| fallback.map(str::to_string))
            .ok_or(SnipCtlError::MissingSetting {
                setting: "location",
                flag: "--location <LOCATION>",
            })
    }

    /// Wait budget: flags win over the profile, the profile over `base`
    pub fn wait_options(
        &self,
        profile_name: Option<&str>,
        base: WaitOptions,
        args: &WaitArgs,
    ) -> CliResult<WaitOptions> {
        let mut options = match self.profile(profile_name)? {
            Some(profile) => profile.wait_options(base),
            None => base,
        };
        if let Some(secs) = args.wait_timeout {
            options = options.with_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = args.wait_interval {
            if secs == 0 {
                return Err(SnipCtlError::InvalidInput {
                    message: "--wait-interval must be at least 1 second".to_string(),
                });
            }
            options = options.with_interval(Duration::from_secs(secs));
        }
        Ok(options)
    }

    fn setting(
        &self,
        explicit: Option<&str>,
        profile_name: Option<&str>,
        field: impl Fn(&Profile) -> Option<&str>,
    ) -> Option<String> {
        if let Some(value) = explicit.filter(|v| !v.is_empty()) {
            return Some(value.to_string());
        }
        // A broken profile selection surfaces later through create_client
        let profile = self.profile(profile_name).ok().flatten()?;
        field(&profile).map(str::to_string)
    }
}

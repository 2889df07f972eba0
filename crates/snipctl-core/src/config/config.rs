//! Configuration management for snipctl
//!
//! Configuration is stored in TOML format with support for multiple named
//! profiles. String values may reference environment variables with `${VAR}`
//! or `${VAR:-default}`. References are kept as written in memory and on
//! save; they are expanded only when a profile is used
//! ([`Profile::expanded`], [`Profile::resolve_access_token`]).
//!
//! ```toml
//! default_profile = "dev"
//!
//! [profiles.dev]
//! project_id = "my-project"
//! location = "us-central1"
//! zone = "us-central1-a"
//! access_token = "${GOOGLE_OAUTH_ACCESS_TOKEN}"
//! wait_timeout_secs = 300
//!
//! [profiles.dev.endpoints]
//! secret_manager = "http://localhost:8085/v1"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::credential::CredentialStore;
use super::error::{ConfigError, Result};
use crate::client::Endpoints;
use crate::operation::WaitOptions;

/// Environment variable consulted for an access token override
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when none is given explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile configuration
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// Individual profile configuration
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Profile {
    /// Project that owns created resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Default region/location (Dataplex, Vertex AI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Default zone (Compute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// OAuth access token; plaintext or `keyring:<key>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Per-service base URL overrides
    #[serde(default, skip_serializing_if = "Endpoints::is_empty")]
    pub endpoints: Endpoints,
    /// Default wait budget for long-running operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_timeout_secs: Option<u64>,
    /// Default polling interval for long-running operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,
}

impl Profile {
    /// Resolve the access token, consulting `env_var` first when given.
    ///
    /// Returns `Ok(None)` when neither the environment nor the profile has one.
    pub fn resolve_access_token(&self, env_var: Option<&str>) -> Result<Option<String>> {
        let store = CredentialStore::new();
        match &self.access_token {
            Some(token) => store
                .get_credential(&expand_env_vars(token), env_var)
                .map(Some)
                .map_err(|e| {
                    ConfigError::CredentialError(format!("Failed to resolve access token: {}", e))
                }),
            None => Ok(env_var.and_then(|var| std::env::var(var).ok())),
        }
    }

    /// Wait options with this profile's overrides applied on top of `base`
    ///
    /// A zero poll interval is ignored in favor of `base`.
    pub fn wait_options(&self, base: WaitOptions) -> WaitOptions {
        WaitOptions {
            timeout: self
                .wait_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(base.timeout),
            interval: self
                .poll_interval_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(base.interval),
        }
    }

    /// Copy with `${VAR}` references expanded in every setting
    ///
    /// The access token is left as written; it is expanded by
    /// [`Profile::resolve_access_token`].
    pub fn expanded(&self) -> Profile {
        let expand = |value: &Option<String>| value.as_deref().map(expand_env_vars);
        Profile {
            project_id: expand(&self.project_id),
            location: expand(&self.location),
            zone: expand(&self.zone),
            access_token: self.access_token.clone(),
            endpoints: Endpoints {
                compute: expand(&self.endpoints.compute),
                dataplex: expand(&self.endpoints.dataplex),
                secret_manager: expand(&self.endpoints.secret_manager),
                text_to_speech: expand(&self.endpoints.text_to_speech),
                aiplatform: expand(&self.endpoints.aiplatform),
            },
            wait_timeout_secs: self.wait_timeout_secs,
            poll_interval_secs: self.poll_interval_secs,
        }
    }
}

impl Config {
    /// Resolve the profile name to use
    ///
    /// Order: explicit name, `default_profile`, alphabetically first profile.
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<String> {
        if let Some(name) = explicit_profile {
            return if self.profiles.contains_key(name) {
                Ok(name.to_string())
            } else {
                Err(ConfigError::ProfileNotFound {
                    name: name.to_string(),
                })
            };
        }

        if let Some(ref default) = self.default_profile {
            return Ok(default.clone());
        }

        self.list_profiles()
            .first()
            .map(|(name, _)| (*name).clone())
            .ok_or_else(|| ConfigError::NoProfiles {
                suggestion: "Use 'snipctl profile set' to create a profile.".to_string(),
            })
    }

    /// Look up the profile to use, if any is configured
    pub fn active_profile(&self, explicit_profile: Option<&str>) -> Result<Option<&Profile>> {
        match self.resolve_profile(explicit_profile) {
            Ok(name) => self
                .profiles
                .get(&name)
                .map(Some)
                .ok_or(ConfigError::ProfileNotFound { name }),
            Err(ConfigError::NoProfiles { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the standard location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| ConfigError::SaveError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    /// Set or update a profile
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile by name
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// List all profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Get the path to the configuration file
    ///
    /// On Linux: ~/.config/snipctl/config.toml
    /// On macOS: ~/Library/Application Support/dev.snipctl.snipctl/config.toml
    /// On Windows: %APPDATA%\snipctl\snipctl\config\config.toml
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("dev", "snipctl", "snipctl").ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

/// Expand `${VAR}` and `${VAR:-default}` references
///
/// Unset variables without a default are left as-is.
fn expand_env_vars(value: &str) -> String {
    shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(project: &str) -> Profile {
        Profile {
            project_id: Some(project.to_string()),
            zone: Some("us-central1-a".to_string()),
            ..Profile::default()
        }
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.set_profile("dev".to_string(), profile("my-project"));
        config.default_profile = Some("dev".to_string());

        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.default_profile, deserialized.default_profile);
        assert_eq!(deserialized.profiles.get("dev"), Some(&profile("my-project")));
    }

    #[test]
    fn test_resolve_profile_order() {
        let mut config = Config::default();
        config.set_profile("zeta".to_string(), profile("p1"));
        config.set_profile("alpha".to_string(), profile("p2"));

        // Alphabetically first when no default is set
        assert_eq!(config.resolve_profile(None).unwrap(), "alpha");

        config.default_profile = Some("zeta".to_string());
        assert_eq!(config.resolve_profile(None).unwrap(), "zeta");

        assert_eq!(config.resolve_profile(Some("alpha")).unwrap(), "alpha");
        assert!(matches!(
            config.resolve_profile(Some("missing")),
            Err(ConfigError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn test_active_profile_without_profiles() {
        let config = Config::default();
        assert!(config.active_profile(None).unwrap().is_none());
        assert!(config.active_profile(Some("dev")).is_err());
    }

    #[test]
    fn test_remove_profile_clears_default() {
        let mut config = Config::default();
        config.set_profile("dev".to_string(), profile("p"));
        config.default_profile = Some("dev".to_string());

        assert!(config.remove_profile("dev").is_some());
        assert!(config.default_profile.is_none());
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_wait_options_override() {
        let base = WaitOptions::new(Duration::from_secs(60), Duration::from_secs(2));
        let mut p = profile("p");
        assert_eq!(p.wait_options(base), base);

        p.wait_timeout_secs = Some(300);
        let opts = p.wait_options(base);
        assert_eq!(opts.timeout, Duration::from_secs(300));
        assert_eq!(opts.interval, Duration::from_secs(2));
    }

    #[test]
    fn test_zero_poll_interval_is_ignored() {
        let base = WaitOptions::new(Duration::from_secs(60), Duration::from_secs(2));
        let mut p = profile("p");
        p.poll_interval_secs = Some(0);
        assert_eq!(p.wait_options(base).interval, Duration::from_secs(2));
    }

    #[test]
    #[serial_test::serial]
    fn test_expanded_keeps_token_reference() {
        unsafe {
            std::env::set_var("SNIPCTL_TEST_EXPANDED_ZONE", "europe-west1-b");
        }
        let p = Profile {
            zone: Some("${SNIPCTL_TEST_EXPANDED_ZONE}".to_string()),
            access_token: Some("${SNIPCTL_TEST_EXPANDED_TOKEN}".to_string()),
            ..Profile::default()
        };
        let expanded = p.expanded();
        unsafe {
            std::env::remove_var("SNIPCTL_TEST_EXPANDED_ZONE");
        }

        assert_eq!(expanded.zone.as_deref(), Some("europe-west1-b"));
        assert_eq!(expanded.access_token, p.access_token);
        assert_eq!(p.zone.as_deref(), Some("${SNIPCTL_TEST_EXPANDED_ZONE}"));
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_expansion() {
        unsafe {
            std::env::set_var("SNIPCTL_TEST_PROJECT", "expanded-project");
        }

        let content = r#"
[profiles.dev]
project_id = "${SNIPCTL_TEST_PROJECT}"
location = "${SNIPCTL_MISSING_LOCATION:-us-central1}"
"#;

        let expanded = expand_env_vars(content);
        assert!(expanded.contains("expanded-project"));
        assert!(expanded.contains("us-central1"));

        unsafe {
            std::env::remove_var("SNIPCTL_TEST_PROJECT");
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_resolve_access_token() {
        unsafe {
            std::env::remove_var("SNIPCTL_TEST_ACCESS_TOKEN");
        }

        let mut p = profile("p");
        assert_eq!(p.resolve_access_token(Some("SNIPCTL_TEST_ACCESS_TOKEN")).unwrap(), None);

        p.access_token = Some("from-profile".to_string());
        assert_eq!(
            p.resolve_access_token(Some("SNIPCTL_TEST_ACCESS_TOKEN")).unwrap(),
            Some("from-profile".to_string())
        );

        unsafe {
            std::env::set_var("SNIPCTL_TEST_ACCESS_TOKEN", "from-env");
        }
        assert_eq!(
            p.resolve_access_token(Some("SNIPCTL_TEST_ACCESS_TOKEN")).unwrap(),
            Some("from-env".to_string())
        );
        // Explicit files ignore the environment
        assert_eq!(
            p.resolve_access_token(None).unwrap(),
            Some("from-profile".to_string())
        );

        unsafe {
            std::env::remove_var("SNIPCTL_TEST_ACCESS_TOKEN");
        }
    }
}

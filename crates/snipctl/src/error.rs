//! Error types for snipctl
//!
//! Core errors are mapped onto a small set of user-facing variants, each
//! with its own tips.

use colored::Colorize;
use snipctl_core::{ConfigError, CoreError};
use thiserror::Error;

/// Cargo-style diagnostic formatter for CLI errors.
///
/// ```text
/// error: no project configured
///
///   tip: pass one explicitly:
///       snipctl --project my-project ...
/// ```
pub struct CliDiagnostic {
    message: String,
    detail: Option<String>,
    tips: Vec<(String, Vec<String>)>,
}

impl CliDiagnostic {
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            detail: None,
            tips: Vec::new(),
        }
    }

    pub fn detail(mut self, text: &str) -> Self {
        self.detail = Some(text.to_string());
        self
    }

    /// Add a tip with optional example commands.
    pub fn tip(mut self, description: &str, commands: &[&str]) -> Self {
        self.tips.push((
            description.to_string(),
            commands.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        if let Some(detail) = &self.detail {
            eprintln!("  {}", detail);
        }

        for (description, commands) in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
            for cmd in commands {
                eprintln!("      {}", cmd);
            }
        }
    }
}

/// Main error type for the snipctl application
#[derive(Error, Debug)]
pub enum SnipCtlError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No access token available")]
    MissingCredentials { profile: Option<String> },

    #[error("No {setting} configured")]
    MissingSetting {
        setting: &'static str,
        flag: &'static str,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Already exists: {message}")]
    AlreadyExists { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("Timeout: {message}")]
    Timeout { message: String },

    #[error("File error for '{path}': {message}")]
    FileError { path: String, message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },
}

/// Result type for snipctl operations
pub type Result<T> = std::result::Result<T, SnipCtlError>;

impl SnipCtlError {
    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            SnipCtlError::ProfileNotFound { name } => vec![
                "List available profiles: snipctl profile list".to_string(),
                format!("Create profile '{}': snipctl profile set {}", name, name),
            ],
            SnipCtlError::MissingCredentials { profile } => vec![
                "Export a token: export GOOGLE_OAUTH_ACCESS_TOKEN=$(gcloud auth print-access-token)"
                    .to_string(),
                format!(
                    "Or store one in the profile: snipctl profile set {} --prompt-token",
                    profile.as_deref().unwrap_or("<name>")
                ),
            ],
            SnipCtlError::MissingSetting { setting, flag } => vec![
                format!("Pass the {} explicitly: {}", setting, flag),
                "Or set a default in your profile: snipctl profile set <name> --help".to_string(),
            ],
            SnipCtlError::AuthenticationFailed { .. } => vec![
                "Access tokens expire after an hour; fetch a new one: gcloud auth print-access-token"
                    .to_string(),
                "Check the active profile: snipctl profile show".to_string(),
            ],
            SnipCtlError::PermissionDenied { .. } => vec![
                "Check that the project id is correct".to_string(),
                "Check that the API is enabled and your account has the required role".to_string(),
            ],
            SnipCtlError::AlreadyExists { .. } => {
                vec!["Pick a different name or id for the new resource".to_string()]
            }
            SnipCtlError::QuotaExceeded { .. } => vec![
                "Request a quota increase or pick another zone/location".to_string(),
            ],
            SnipCtlError::ConnectionError { .. } => vec![
                "Check network connectivity".to_string(),
                "Check endpoint overrides in your profile: snipctl profile show".to_string(),
            ],
            SnipCtlError::Timeout { .. } => vec![
                "The operation may still complete; check the resource before retrying".to_string(),
                "Wait longer with --wait-timeout <seconds>".to_string(),
            ],
            SnipCtlError::InvalidInput { .. } => {
                vec!["Check the command syntax: snipctl <command> --help".to_string()]
            }
            SnipCtlError::FileError { path, .. } => vec![
                format!("Check that the directory for '{}' exists and is writable", path),
            ],
            _ => vec![],
        }
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        let mut diag = CliDiagnostic::error(&self.to_string());
        if let SnipCtlError::MissingCredentials {
            profile: Some(name),
        } = self
        {
            diag = diag.detail(&format!("Profile '{}' has no access_token set.", name));
        }

        for suggestion in self.suggestions() {
            diag = diag.tip(&suggestion, &[]);
        }

        diag.print();
    }
}

impl From<CoreError> for SnipCtlError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::Validation(msg) => SnipCtlError::InvalidInput { message: msg },
            CoreError::DeadlineExceeded(duration) => SnipCtlError::Timeout {
                message: format!("Operation did not finish within {} seconds", duration.as_secs()),
            },
            CoreError::Config(e) => SnipCtlError::from(e),
            CoreError::Io(e) => SnipCtlError::OutputError {
                message: format!("IO error: {}", e),
            },
            CoreError::Api(snipctl_core::ApiError::Request(e)) => SnipCtlError::ConnectionError {
                message: e.to_string(),
            },
            ref e if e.is_unauthenticated() => SnipCtlError::AuthenticationFailed { message },
            ref e if e.is_permission_denied() => SnipCtlError::PermissionDenied { message },
            ref e if e.is_already_exists() => SnipCtlError::AlreadyExists { message },
            ref e if e.is_not_found() => SnipCtlError::NotFound { message },
            ref e if e.is_quota_exceeded() => SnipCtlError::QuotaExceeded { message },
            ref e if e.is_timeout() => SnipCtlError::Timeout { message },
            _ => SnipCtlError::ApiError { message },
        }
    }
}

impl From<ConfigError> for SnipCtlError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name } => SnipCtlError::ProfileNotFound { name },
            other => SnipCtlError::Configuration(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for SnipCtlError {
    fn from(err: serde_json::Error) -> Self {
        SnipCtlError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<std::io::Error> for SnipCtlError {
    fn from(err: std::io::Error) -> Self {
        SnipCtlError::OutputError {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<anyhow::Error> for SnipCtlError {
    fn from(err: anyhow::Error) -> Self {
        SnipCtlError::Configuration(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipctl_core::{ApiError, Code};
    use std::time::Duration;

    fn api(code: Code) -> CoreError {
        CoreError::Api(ApiError::Status {
            http_status: 400,
            code,
            message: "boom".to_string(),
        })
    }

    #[test]
    fn test_core_error_mapping() {
        assert!(matches!(
            SnipCtlError::from(api(Code::AlreadyExists)),
            SnipCtlError::AlreadyExists { .. }
        ));
        assert!(matches!(
            SnipCtlError::from(api(Code::Unauthenticated)),
            SnipCtlError::AuthenticationFailed { .. }
        ));
        assert!(matches!(
            SnipCtlError::from(api(Code::Internal)),
            SnipCtlError::ApiError { .. }
        ));
        assert!(matches!(
            SnipCtlError::from(CoreError::DeadlineExceeded(Duration::from_secs(60))),
            SnipCtlError::Timeout { .. }
        ));
    }

    #[test]
    fn test_validation_keeps_message() {
        let err = SnipCtlError::from(CoreError::Validation("zone must not be empty".to_string()));
        assert_eq!(err.to_string(), "Invalid input: zone must not be empty");
    }

    #[test]
    fn test_missing_setting_suggests_flag() {
        let err = SnipCtlError::MissingSetting {
            setting: "zone",
            flag: "--zone <ZONE>",
        };
        assert!(err.suggestions()[0].contains("--zone"));
    }
}

//! Spinner for long-running operation waits

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use snipctl_core::{ProgressCallback, ProgressEvent};

use crate::cli::OutputFormat;

/// Spinner that follows [`ProgressEvent`]s. Hidden for machine-readable output
/// and when stderr is not a terminal.
pub struct WaitSpinner {
    pb: ProgressBar,
}

impl WaitSpinner {
    pub fn new(message: impl Into<String>, format: OutputFormat) -> Self {
        let pb = match format {
            OutputFormat::Auto | OutputFormat::Table => ProgressBar::new_spinner(),
            OutputFormat::Json | OutputFormat::Yaml => ProgressBar::hidden(),
        };
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed_precise}]")
        {
            pb.set_style(style);
        }
        pb.set_message(message.into());
        Self { pb }
    }

    /// A callback to hand to a wait; it updates this spinner
    pub fn callback(&self) -> ProgressCallback {
        let pb = self.pb.clone();
        Box::new(move |event: ProgressEvent| pb.set_message(describe(&event)))
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl Drop for WaitSpinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

fn describe(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::Started { operation } => format!("Operation {} started", short(operation)),
        ProgressEvent::Polling {
            operation, status, ..
        } => format!("Operation {}: {}", short(operation), status.yellow()),
        ProgressEvent::Completed { operation } => {
            format!("Operation {}: {}", short(operation), "done".green())
        }
        ProgressEvent::Failed { operation, error } => {
            format!("Operation {} failed: {}", short(operation), error.red())
        }
        ProgressEvent::TimedOut { operation, elapsed } => format!(
            "Operation {} still running after {}s",
            short(operation),
            elapsed.as_secs()
        ),
    }
}

/// Last path segment of an operation name
fn short(operation: &str) -> &str {
    operation.rsplit('/').next().unwrap_or(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_short_operation_name() {
        assert_eq!(
            short("projects/p/locations/l/operations/operation-123"),
            "operation-123"
        );
        assert_eq!(short("operation-123"), "operation-123");
    }

    #[test]
    fn test_describe_events() {
        colored::control::set_override(false);
        let polling = ProgressEvent::Polling {
            operation: "zones/z/operations/op-1".to_string(),
            status: "RUNNING".to_string(),
            elapsed: Duration::from_secs(3),
        };
        assert_eq!(describe(&polling), "Operation op-1: RUNNING");

        let timed_out = ProgressEvent::TimedOut {
            operation: "op-1".to_string(),
            elapsed: Duration::from_secs(60),
        };
        assert!(describe(&timed_out).contains("60s"));
    }

    #[test]
    fn test_hidden_for_json() {
        let spinner = WaitSpinner::new("Waiting", OutputFormat::Json);
        (spinner.callback())(ProgressEvent::Started {
            operation: "op".to_string(),
        });
        spinner.finish();
    }
}

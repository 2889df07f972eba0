//! `prompt` commands

use crate::cli::{Cli, PromptCommands};
use crate::connection::ConnectionManager;
use crate::error::SnipCtlError;
use crate::output::print_result;
use crate::progress::WaitSpinner;
use snipctl_core::vertexai::{PromptTemplate, generate_and_save, parse_bindings};
use snipctl_core::{ProjectContext, WaitOptions};
use tracing::debug;

/// Vertex AI location used when neither the flag nor the profile sets one
const DEFAULT_LOCATION: &str = "us-central1";

pub async fn handle_prompt_command(
    cmd: &PromptCommands,
    conn_mgr: &ConnectionManager,
    cli: &Cli,
) -> Result<(), SnipCtlError> {
    match cmd {
        PromptCommands::Generate {
            location,
            name,
            template,
            vars,
            model,
            system_instruction,
            no_save,
            wait,
        } => {
            let profile = cli.profile.as_deref();
            let project_id = conn_mgr.project_id(cli.project.as_deref(), profile)?;
            let location = conn_mgr.location(location.as_deref(), profile, Some(DEFAULT_LOCATION))?;
            let options = conn_mgr.wait_options(profile, WaitOptions::default(), wait)?;

            let prompt = build_prompt(
                name.as_deref(),
                template.as_deref(),
                vars,
                model.as_deref(),
                system_instruction.as_deref(),
            )?;
            debug!(
                "Prompt '{}' with {} variable set(s)",
                prompt.name,
                prompt.variables.len()
            );

            let ctx = ProjectContext::new(project_id, location);
            let client = conn_mgr.create_client(profile)?;
            let spinner = WaitSpinner::new(format!("Running prompt {}", prompt.name), cli.output);
            let callback = spinner.callback();
            let run = generate_and_save(&client, &ctx, &prompt, !no_save, options, Some(&callback))
                .await?;
            spinner.finish();

            print_result(&run, cli.output, cli.query.as_deref())
        }
    }
}

/// Start from the movie critic prompt and override what was given
///
/// A custom template without `--vars` runs once with no bindings.
fn build_prompt(
    name: Option<&str>,
    template: Option<&str>,
    vars: &[String],
    model: Option<&str>,
    system_instruction: Option<&str>,
) -> Result<PromptTemplate, SnipCtlError> {
    let mut prompt = PromptTemplate::default();
    if let Some(name) = name {
        prompt.name = name.to_string();
    }
    if let Some(model) = model {
        prompt.model = model.to_string();
    }
    if let Some(instruction) = system_instruction {
        prompt.system_instruction = Some(instruction.to_string());
    }
    if let Some(template) = template {
        prompt.template = template.to_string();
        prompt.variables = vec![Default::default()];
    }
    if !vars.is_empty() {
        prompt.variables = vars
            .iter()
            .map(|v| parse_bindings(v))
            .collect::<Result<Vec<_>, _>>()?;
    }
    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_defaults() {
        let prompt = build_prompt(None, None, &[], None, None).unwrap();
        assert_eq!(prompt, PromptTemplate::default());
    }

    #[test]
    fn test_build_prompt_overrides() {
        let vars = vec!["topic=Rust".to_string(), "topic=Go".to_string()];
        let prompt = build_prompt(
            Some("summary"),
            Some("Summarize {topic}."),
            &vars,
            Some("gemini-2.0-flash-001"),
            None,
        )
        .unwrap();
        assert_eq!(prompt.name, "summary");
        assert_eq!(prompt.variables.len(), 2);
        assert_eq!(prompt.variables[1]["topic"], "Go");
        assert_eq!(prompt.model, "gemini-2.0-flash-001");
    }

    #[test]
    fn test_build_prompt_custom_template_without_vars() {
        let prompt = build_prompt(None, Some("Say hi."), &[], None, None).unwrap();
        assert_eq!(prompt.variables.len(), 1);
        assert!(prompt.variables[0].is_empty());
    }

    #[test]
    fn test_build_prompt_bad_vars() {
        let vars = vec!["no-equals-sign".to_string()];
        assert!(matches!(
            build_prompt(None, None, &vars, None, None),
            Err(SnipCtlError::InvalidInput { .. })
        ));
    }
}

//! Prompt workflows: generate per variable set, then save a version

use tracing::info;

use crate::client::GoogleClient;
use crate::error::{ApiError, CoreError, Result};
use crate::operation::{ProgressCallback, WaitOptions, wait_for_completion};
use crate::resource::ProjectContext;

use super::handler::{DatasetsHandler, GenerativeHandler, model_path, prompt_dataset};
use super::model::{
    Content, Dataset, DatasetVersion, GenerateContentRequest, Generation, PromptRun, SavedPrompt,
};
use super::template::PromptTemplate;

/// Generate once per variable set, in order
///
/// All variable sets are assembled before the first request, so an unbound
/// placeholder in any of them fails without calling the model.
pub async fn generate_for_each_binding(
    client: &GoogleClient,
    ctx: &ProjectContext,
    prompt: &PromptTemplate,
) -> Result<Vec<Generation>> {
    prompt.validate()?;
    if prompt.variables.is_empty() {
        return Err(CoreError::validation(format!(
            "prompt '{}' has no variable sets to generate with",
            prompt.name
        )));
    }

    let assembled = prompt
        .variables
        .iter()
        .map(|bindings| prompt.assemble(bindings))
        .collect::<Result<Vec<_>>>()?;

    let handler = GenerativeHandler::new(client.clone());
    let system_instruction = prompt.system_instruction.clone().map(Content::system);
    let mut generations = Vec::with_capacity(assembled.len());

    for (bindings, assembled) in prompt.variables.iter().zip(assembled) {
        let request = GenerateContentRequest {
            contents: vec![Content::user(assembled.text.clone())],
            system_instruction: system_instruction.clone(),
            generation_config: None,
        };
        let response = handler
            .generate_content(ctx, &prompt.model, &request)
            .await?;
        generations.push(Generation {
            variables: bindings.clone(),
            prompt: assembled.text,
            text: response.text(),
            usage: response.usage_metadata,
        });
    }

    Ok(generations)
}

/// Save `prompt` as a new prompt resource with one version
///
/// 1. Creates the prompt dataset and waits for it
/// 2. Creates a dataset version and waits for it
/// 3. Returns the prompt id and version id
pub async fn save_prompt_version(
    client: &GoogleClient,
    ctx: &ProjectContext,
    prompt: &PromptTemplate,
    options: WaitOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SavedPrompt> {
    prompt.validate()?;
    let body = prompt_dataset(ctx, prompt)?;
    let handler = DatasetsHandler::new(client.clone());

    let operation = handler.create_dataset(ctx, &body).await?;
    let dataset: Dataset =
        wait_for_completion(&handler.operation_poller(ctx, &operation), options, on_progress)
            .await?;
    let prompt_id = last_segment(&dataset.name)?;
    info!("Created prompt resource with id {}", prompt_id);

    let version = DatasetVersion {
        display_name: Some(prompt.name.clone()),
        model_reference: Some(model_path(ctx, &prompt.model)?.into_string()),
        ..DatasetVersion::default()
    };
    let operation = handler
        .create_dataset_version(ctx, &dataset.name, &version)
        .await?;
    let version: DatasetVersion =
        wait_for_completion(&handler.operation_poller(ctx, &operation), options, on_progress)
            .await?;
    let version_id = last_segment(&version.name)?;
    info!("Created prompt {} version {}", prompt_id, version_id);

    Ok(SavedPrompt {
        prompt_id,
        version_id,
        name: version.name,
    })
}

/// Generate for every variable set, then save a version unless `save` is false
///
/// # Example
///
/// ```rust,ignore
/// let ctx = ProjectContext::new("my-project", "us-central1");
/// let run = generate_and_save(&client, &ctx, &PromptTemplate::default(), true, WaitOptions::default(), None).await?;
/// for generation in &run.generations {
///     println!("{}", generation.text);
/// }
/// ```
pub async fn generate_and_save(
    client: &GoogleClient,
    ctx: &ProjectContext,
    prompt: &PromptTemplate,
    save: bool,
    options: WaitOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<PromptRun> {
    let generations = generate_for_each_binding(client, ctx, prompt).await?;
    let saved = if save {
        Some(save_prompt_version(client, ctx, prompt, options, on_progress).await?)
    } else {
        None
    };
    Ok(PromptRun { generations, saved })
}

fn last_segment(name: &str) -> Result<String> {
    match name.rsplit('/').next() {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(CoreError::Api(ApiError::Decode(format!(
            "unexpected resource name '{}'",
            name
        )))),
    }
}

//! Vertex AI calls: `:generateContent` and prompt datasets
//!
//! Vertex AI is served from a regional host, so every call passes the
//! location along for host selection as well as in the path.

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::client::{GoogleClient, Service};
use crate::error::Result;
use crate::longrunning::{LroPoller, Operation};
use crate::resource::{ProjectContext, ResourcePath};

use super::model::{
    Content, Dataset, DatasetVersion, GenerateContentRequest, GenerateContentResponse,
};
use super::template::PromptTemplate;

/// Schema for datasets that hold a saved prompt
pub const PROMPT_METADATA_SCHEMA_URI: &str =
    "gs://google-cloud-aiplatform/schema/dataset/metadata/text_prompt_1.0.0.yaml";

/// Handler for publisher models
#[derive(Debug, Clone)]
pub struct GenerativeHandler {
    client: GoogleClient,
}

impl GenerativeHandler {
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }

    /// `POST {parent}/publishers/google/models/{model}:generateContent`
    pub async fn generate_content(
        &self,
        ctx: &ProjectContext,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let model_path = model_path(ctx, model)?;
        debug!("Generating content with {}", model_path);
        let response = self
            .client
            .post(
                Service::AiPlatform,
                Some(ctx.location.as_str()),
                &format!("{}:generateContent", model_path),
                &[],
                request,
            )
            .await?;
        Ok(response)
    }
}

/// `projects/{p}/locations/{l}/publishers/google/models/{model}`
pub fn model_path(ctx: &ProjectContext, model: &str) -> Result<ResourcePath> {
    ctx.parent()?
        .child("publishers", "google")?
        .child("models", model)
}

/// Handler for `projects/*/locations/*/datasets`
#[derive(Debug, Clone)]
pub struct DatasetsHandler {
    client: GoogleClient,
}

impl DatasetsHandler {
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }

    /// Start creating a dataset. Returns the long-running operation.
    pub async fn create_dataset(&self, ctx: &ProjectContext, dataset: &Dataset) -> Result<Operation> {
        let path = format!("{}/datasets", ctx.parent()?);
        debug!("Creating dataset {} in {}", dataset.display_name, path);
        let op = self
            .client
            .post(Service::AiPlatform, Some(ctx.location.as_str()), &path, &[], dataset)
            .await?;
        Ok(op)
    }

    /// Start creating a version of `dataset_name`
    pub async fn create_dataset_version(
        &self,
        ctx: &ProjectContext,
        dataset_name: &str,
        version: &DatasetVersion,
    ) -> Result<Operation> {
        let path = format!("{}/datasetVersions", dataset_name);
        debug!("Creating dataset version under {}", dataset_name);
        let op = self
            .client
            .post(Service::AiPlatform, Some(ctx.location.as_str()), &path, &[], version)
            .await?;
        Ok(op)
    }

    pub fn operation_poller<T>(&self, ctx: &ProjectContext, operation: &Operation) -> LroPoller<T> {
        LroPoller::new(&self.client, Service::AiPlatform, operation.name.clone())
            .in_location(ctx.location.clone())
    }
}

/// The dataset body that stores `prompt`
pub fn prompt_dataset(ctx: &ProjectContext, prompt: &PromptTemplate) -> Result<Dataset> {
    let model = model_path(ctx, &prompt.model)?;

    let mut message = json!({
        "model": model.as_str(),
        "contents": [Content::user(prompt.template.clone())],
    });
    if let Some(instruction) = &prompt.system_instruction {
        message["systemInstruction"] = json!(Content::system(instruction.clone()));
    }

    let executions: Vec<Value> = prompt
        .variables
        .iter()
        .map(|bindings| {
            let arguments: Map<String, Value> = bindings
                .iter()
                .map(|(k, v)| (k.clone(), json!({"partList": {"parts": [{"text": v}]}})))
                .collect();
            json!({ "arguments": arguments })
        })
        .collect();

    Ok(Dataset {
        display_name: prompt.name.clone(),
        metadata_schema_uri: PROMPT_METADATA_SCHEMA_URI.to_string(),
        metadata: json!({
            "promptType": "freeform",
            "promptApiSchema": {
                "apiSchemaVersion": "1.0.0",
                "multimodalPrompt": { "promptMessage": message },
                "executions": executions,
            }
        }),
        ..Dataset::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_path() {
        let ctx = ProjectContext::new("p", "us-central1");
        assert_eq!(
            model_path(&ctx, "gemini-1.5-pro-002").unwrap().as_str(),
            "projects/p/locations/us-central1/publishers/google/models/gemini-1.5-pro-002"
        );
    }

    #[test]
    fn test_prompt_dataset_metadata() {
        let ctx = ProjectContext::new("p", "us-central1");
        let dataset = prompt_dataset(&ctx, &PromptTemplate::default()).unwrap();

        assert_eq!(dataset.display_name, "movie-critic");
        let schema = &dataset.metadata["promptApiSchema"];
        assert_eq!(
            schema["multimodalPrompt"]["promptMessage"]["contents"][0]["parts"][0]["text"],
            "Compare the movies {movie1} and {movie2}."
        );
        assert_eq!(
            schema["executions"][1]["arguments"]["movie2"]["partList"]["parts"][0]["text"],
            "Interstellar"
        );
        assert!(
            schema["multimodalPrompt"]["promptMessage"]["systemInstruction"].is_object()
        );
    }
}

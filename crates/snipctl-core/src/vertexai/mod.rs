//! Vertex AI: prompt templates, content generation and prompt versions
//!
//! A [`PromptTemplate`] is assembled locally for each variable set and sent
//! to a publisher model. Saving a version stores the template as a prompt
//! dataset and then snapshots it as a dataset version.

pub mod handler;
pub mod model;
pub mod template;
pub mod workflows;

pub use handler::{DatasetsHandler, GenerativeHandler, PROMPT_METADATA_SCHEMA_URI};
pub use model::{
    Content, GenerateContentRequest, GenerateContentResponse, Generation, PromptRun, SavedPrompt,
};
pub use template::{AssembledPrompt, Bindings, PromptTemplate, bindings, parse_bindings};
pub use workflows::*;

//! Dataplex catalog calls

use tracing::{debug, info};

use crate::client::{GoogleClient, Service};
use crate::error::Result;
use crate::longrunning::{LroPoller, Operation};
use crate::operation::{ProgressCallback, WaitOptions, wait_for_completion};

use super::model::EntryType;
use super::params::{CreateEntryTypeParams, CreateEntryTypeRequest};

/// Handler for the catalog service
#[derive(Debug, Clone)]
pub struct CatalogHandler {
    client: GoogleClient,
}

impl CatalogHandler {
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }

    /// Start creating an entry type. Returns the long-running operation.
    pub async fn create_entry_type(&self, request: &CreateEntryTypeRequest) -> Result<Operation> {
        let path = format!("{}/entryTypes", request.parent);
        debug!("Creating entry type {} in {}", request.entry_type_id, request.parent);
        let op: Operation = self
            .client
            .post(
                Service::Dataplex,
                None,
                &path,
                &[("entryTypeId", request.entry_type_id.as_str())],
                &request.entry_type,
            )
            .await?;
        Ok(op)
    }

    pub fn operation_poller(&self, operation: &Operation) -> LroPoller<EntryType> {
        LroPoller::new(&self.client, Service::Dataplex, operation.name.clone())
    }
}

/// Create an entry type and wait for the operation to finish
///
/// `params` is validated first; nothing is sent when validation fails. The
/// returned entry type is the operation's response, unchanged.
///
/// # Example
///
/// ```rust,ignore
/// let params = CreateEntryTypeParams::new("my-project", "us-central1", "my-entry-type");
/// let created = create_entry_type_and_wait(&client, params, WaitOptions::default(), None).await?;
/// println!("Successfully created entry type: {}", created.name);
/// ```
pub async fn create_entry_type_and_wait(
    client: &GoogleClient,
    params: CreateEntryTypeParams,
    options: WaitOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<EntryType> {
    let request = params.into_request()?;
    let handler = CatalogHandler::new(client.clone());

    let operation = handler.create_entry_type(&request).await?;
    let poller = handler.operation_poller(&operation);
    let entry_type = wait_for_completion(&poller, options, on_progress).await?;

    info!("Created entry type {}", entry_type.name);
    Ok(entry_type)
}

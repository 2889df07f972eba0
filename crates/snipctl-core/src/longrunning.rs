//! `google.longrunning.Operation` support
//!
//! Dataplex and Vertex AI return this shape from create calls:
//!
//! ```json
//! {"name": "projects/p/locations/l/operations/op-1", "done": true,
//!  "response": {"@type": "...EntryType", "name": "..."}}
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

use crate::client::{GoogleClient, Service};
use crate::error::{ApiError, Code, CoreError, Result};
use crate::operation::{OperationPoller, PollState};

/// A long-running operation handle as returned by the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// `google.rpc.Status`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl Status {
    pub fn into_api_error(self) -> ApiError {
        ApiError::Status {
            http_status: 200,
            code: Code::from_rpc(self.code),
            message: self.message,
        }
    }
}

impl Operation {
    /// Interpret this snapshot, decoding the response into `T` when done
    pub fn state<T: DeserializeOwned>(self) -> Result<PollState<T>> {
        if !self.done {
            let status = self
                .metadata
                .as_ref()
                .and_then(|m| m.get("verb").or_else(|| m.get("state")))
                .and_then(Value::as_str)
                .map(|s| format!("RUNNING ({})", s))
                .unwrap_or_else(|| "RUNNING".to_string());
            return Ok(PollState::Pending { status });
        }

        if let Some(status) = self.error {
            return Ok(PollState::Failed(status.into_api_error()));
        }

        let response = self.response.ok_or_else(|| {
            CoreError::Api(ApiError::Decode(format!(
                "operation {} finished without a response",
                self.name
            )))
        })?;
        let value = serde_json::from_value(response)
            .map_err(|e| CoreError::Api(ApiError::Decode(e.to_string())))?;
        Ok(PollState::Done(value))
    }
}

/// Polls an [`Operation`] by name with `GET {base}/{name}`
pub struct LroPoller<T> {
    client: GoogleClient,
    service: Service,
    location: Option<String>,
    name: String,
    _output: PhantomData<fn() -> T>,
}

impl<T> LroPoller<T> {
    pub fn new(client: &GoogleClient, service: Service, name: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            service,
            location: None,
            name: name.into(),
            _output: PhantomData,
        }
    }

    /// Regional host selection for Vertex AI
    #[must_use]
    pub fn in_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send> OperationPoller for LroPoller<T> {
    type Output = T;

    fn operation(&self) -> &str {
        &self.name
    }

    async fn poll(&self) -> Result<PollState<T>> {
        let op: Operation = self
            .client
            .get(self.service, self.location.as_deref(), &self.name)
            .await?;
        op.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        name: String,
    }

    #[test]
    fn test_pending_operation() {
        let op: Operation = serde_json::from_value(json!({
            "name": "projects/p/locations/l/operations/op-1",
            "metadata": {"verb": "create"}
        }))
        .unwrap();

        match op.state::<Thing>().unwrap() {
            PollState::Pending { status } => assert_eq!(status, "RUNNING (create)"),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_done_operation_decodes_response() {
        let op: Operation = serde_json::from_value(json!({
            "name": "op-1",
            "done": true,
            "response": {"@type": "type.googleapis.com/Thing", "name": "things/a"}
        }))
        .unwrap();

        match op.state::<Thing>().unwrap() {
            PollState::Done(thing) => assert_eq!(thing.name, "things/a"),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_failed_operation_keeps_code() {
        let op: Operation = serde_json::from_value(json!({
            "name": "op-1",
            "done": true,
            "error": {"code": 6, "message": "Entry type already exists"}
        }))
        .unwrap();

        match op.state::<Thing>().unwrap() {
            PollState::Failed(err) => assert_eq!(err.code(), Some(&Code::AlreadyExists)),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_done_without_response_is_an_error() {
        let op = Operation {
            name: "op-1".to_string(),
            done: true,
            ..Operation::default()
        };
        assert!(op.state::<Thing>().is_err());
    }
}

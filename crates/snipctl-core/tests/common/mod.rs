//! Shared mock server for recipe tests

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use snipctl_core::{Endpoints, GoogleClient, WaitOptions};
use wiremock::MockServer;

pub const PROJECT: &str = "my-project";
pub const TOKEN: &str = "test-token";

/// Every service endpoint pointed at one mock server
pub struct MockGoogleServer {
    pub server: MockServer,
}

impl MockGoogleServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn client(&self) -> GoogleClient {
        GoogleClient::builder()
            .access_token(TOKEN)
            .endpoints(Endpoints::all(self.uri()))
            .build()
            .expect("client builds")
    }
}

/// Short waits so pending operations do not slow the suite down
pub fn fast_wait() -> WaitOptions {
    WaitOptions::new(Duration::from_secs(5), Duration::from_millis(10))
}

/// `{"error": {...}}` as the services return it
pub fn error_body(code: u16, status: &str, message: &str) -> Value {
    json!({"error": {"code": code, "status": status, "message": message}})
}

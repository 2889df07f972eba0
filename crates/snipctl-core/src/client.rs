//! HTTP client capability shared by every service handler
//!
//! [`GoogleClient`] is a thin wrapper over `reqwest` that knows the base URL
//! of each managed service, attaches the bearer token, and turns error
//! responses into [`ApiError`]. It issues exactly one HTTP request per call
//! and never retries.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

use crate::error::ApiError;

/// User agent string for snipctl HTTP requests
const USER_AGENT: &str = concat!("snipctl/", env!("CARGO_PKG_VERSION"));

const COMPUTE_URL: &str = "https://compute.googleapis.com/compute/v1";
const DATAPLEX_URL: &str = "https://dataplex.googleapis.com/v1";
const SECRET_MANAGER_URL: &str = "https://secretmanager.googleapis.com/v1";
const TEXT_TO_SPEECH_URL: &str = "https://texttospeech.googleapis.com/v1";

/// Managed services reachable through [`GoogleClient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Compute,
    Dataplex,
    SecretManager,
    TextToSpeech,
    /// Vertex AI; the default endpoint is regional
    AiPlatform,
}

/// Base URL overrides, one per service
///
/// Unset entries fall back to the public endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataplex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_to_speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aiplatform: Option<String>,
}

impl Endpoints {
    /// Point every service at the same base URL (mock servers, emulators)
    pub fn all(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            compute: Some(base.clone()),
            dataplex: Some(base.clone()),
            secret_manager: Some(base.clone()),
            text_to_speech: Some(base.clone()),
            aiplatform: Some(base),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Base URL for `service`; `location` picks the regional Vertex AI host
    pub fn base_url(&self, service: Service, location: Option<&str>) -> String {
        let overridden = match service {
            Service::Compute => self.compute.as_deref(),
            Service::Dataplex => self.dataplex.as_deref(),
            Service::SecretManager => self.secret_manager.as_deref(),
            Service::TextToSpeech => self.text_to_speech.as_deref(),
            Service::AiPlatform => self.aiplatform.as_deref(),
        };
        if let Some(url) = overridden {
            return url.trim_end_matches('/').to_string();
        }

        match service {
            Service::Compute => COMPUTE_URL.to_string(),
            Service::Dataplex => DATAPLEX_URL.to_string(),
            Service::SecretManager => SECRET_MANAGER_URL.to_string(),
            Service::TextToSpeech => TEXT_TO_SPEECH_URL.to_string(),
            Service::AiPlatform => format!(
                "https://{}-aiplatform.googleapis.com/v1",
                location.unwrap_or("us-central1")
            ),
        }
    }
}

/// Builder for [`GoogleClient`]
#[derive(Debug, Default)]
pub struct GoogleClientBuilder {
    access_token: Option<String>,
    endpoints: Endpoints,
    timeout: Option<std::time::Duration>,
}

impl GoogleClientBuilder {
    /// Bearer token sent with every request
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Per-request HTTP timeout
    #[must_use]
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<GoogleClient, ApiError> {
        let mut http = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        Ok(GoogleClient {
            http: http.build()?,
            access_token: self.access_token,
            endpoints: self.endpoints,
        })
    }
}

/// Authenticated client for the managed service REST APIs
#[derive(Debug, Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    access_token: Option<String>,
    endpoints: Endpoints,
}

impl GoogleClient {
    pub fn builder() -> GoogleClientBuilder {
        GoogleClientBuilder::default()
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Full URL for `path` under `service`, with query parameters appended
    pub fn url(
        &self,
        service: Service,
        location: Option<&str>,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Url, ApiError> {
        let base = self.endpoints.base_url(service, location);
        let mut url = Url::parse(&format!("{}/{}", base, path.trim_start_matches('/')))
            .map_err(|e| ApiError::Decode(format!("invalid URL for '{}': {}", path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }
        Ok(url)
    }

    /// GET a resource and decode the JSON body
    pub async fn get<T: DeserializeOwned>(
        &self,
        service: Service,
        location: Option<&str>,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(service, location, path, &[])?;
        self.send(Method::GET, url, None::<&()>).await
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        service: Service,
        location: Option<&str>,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(service, location, path, query)?;
        self.send(Method::POST, url, Some(body)).await
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            if tracing::enabled!(tracing::Level::TRACE) {
                trace!(
                    "Request body: {}",
                    serde_json::to_string(body).unwrap_or_default()
                );
            }
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        trace!("Response {}: {}", status, text);

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &text));
        }

        let text = if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            "{}"
        } else {
            text.as_str()
        };
        serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Empty JSON object, for requests and responses without fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Empty {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.base_url(Service::Compute, None),
            "https://compute.googleapis.com/compute/v1"
        );
        assert_eq!(
            endpoints.base_url(Service::AiPlatform, Some("europe-west4")),
            "https://europe-west4-aiplatform.googleapis.com/v1"
        );
        assert!(endpoints.is_empty());
    }

    #[test]
    fn test_endpoint_override_strips_trailing_slash() {
        let endpoints = Endpoints {
            secret_manager: Some("http://localhost:9000/v1/".to_string()),
            ..Endpoints::default()
        };
        assert_eq!(
            endpoints.base_url(Service::SecretManager, None),
            "http://localhost:9000/v1"
        );
        assert!(!endpoints.is_empty());
    }

    #[test]
    fn test_url_with_query() {
        let client = GoogleClient::builder()
            .endpoints(Endpoints::all("http://localhost:9000"))
            .build()
            .unwrap();
        let url = client
            .url(
                Service::SecretManager,
                None,
                "projects/p/secrets",
                &[("secretId", "my secret")],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/projects/p/secrets?secretId=my+secret"
        );
    }
}

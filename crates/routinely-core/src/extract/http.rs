//! HTTP client for an external text-understanding service.
//!
//! Protocol: `POST {endpoint}` with `{"text": "..."}`; the service answers
//! `{"tasks": [TaskRequest, ...]}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::collaborators::TaskExtractor;
use crate::error::ExtractionError;
use crate::task::TaskRequest;

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    tasks: Vec<TaskRequest>,
}

/// Extractor that delegates to an HTTP endpoint.
pub struct HttpTaskExtractor {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpTaskExtractor {
    /// # Errors
    ///
    /// Returns `Unavailable` if `endpoint` is not an http(s) URL.
    pub fn new(endpoint: &str) -> Result<Self, ExtractionError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ExtractionError::Unavailable(format!("invalid endpoint '{endpoint}': {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ExtractionError::Unavailable(format!(
                "unsupported endpoint scheme: {}",
                endpoint.scheme()
            )));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: None,
        })
    }

    /// Send `Authorization: Bearer <key>` with each request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TaskExtractor for HttpTaskExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<TaskRequest>, ExtractionError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&ExtractRequest { text });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Unavailable(format!(
                "extraction service returned {status}"
            )));
        }

        let body = response.text().await?;
        let parsed: ExtractResponse = serde_json::from_str(&body)
            .map_err(|e| ExtractionError::Malformed(e.to_string()))?;
        Ok(parsed.tasks)
    }
}

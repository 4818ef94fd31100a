//! Client for a small local text-generation runtime.
//!
//! The runtime is treated as a black box behind an Ollama-style HTTP
//! interface on localhost: a `/api/generate` endpoint taking a prompt plus
//! generation options, and a `/api/version` endpoint used as a liveness
//! probe at startup. The fixed seed keeps repeated runs deterministic.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::completion::{CompletionProvider, CompletionRequest, CompletionResponse};
use crate::error::LensError;

/// Client for the local text-generation runtime.
pub struct LocalModel {
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: Option<u64>,
    client: Client,
}

/// Request payload for the generate endpoint.
#[derive(Serialize, Debug)]
struct LocalGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: LocalGenerateOptions,
}

#[derive(Serialize, Debug)]
struct LocalGenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

/// Response payload from the generate endpoint.
#[derive(Deserialize, Debug)]
struct LocalGenerateResponse {
    response: Option<String>,
}

impl LocalModel {
    /// Creates a new client for the local runtime.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the runtime (e.g. "http://127.0.0.1:11434")
    /// * `model` - Model name to generate with
    /// * `timeout_seconds` - Request timeout in seconds
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Self {
            base_url: base_url.into(),
            model: model.into(),
            timeout_seconds,
            client: builder.build().expect("Failed to build reqwest Client"),
        }
    }

    /// Checks that the runtime is reachable. Used once at startup; a failure
    /// removes the local backend from the selectable list without aborting.
    pub async fn probe(&self) -> Result<(), LensError> {
        if self.base_url.is_empty() {
            return Err(LensError::InvalidRequest("Missing base_url".to_string()));
        }
        let url = format!("{}/api/version", self.base_url);
        let resp = self.client.get(&url).send().await?;
        log::debug!("Local runtime probe status: {}", resp.status());
        resp.error_for_status()
            .map(|_| ())
            .map_err(LensError::from)
    }
}

#[async_trait]
impl CompletionProvider for LocalModel {
    /// Sends a completion request to the local runtime.
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionResponse, LensError> {
        if self.base_url.is_empty() {
            return Err(LensError::InvalidRequest("Missing base_url".to_string()));
        }
        let url = format!("{}/api/generate", self.base_url);

        let req_body = LocalGenerateRequest {
            model: &self.model,
            prompt: &req.prompt,
            stream: false,
            options: LocalGenerateOptions {
                num_predict: req.max_tokens,
                temperature: req.temperature,
                seed: req.seed,
            },
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&req_body) {
                log::trace!("Local runtime request payload: {json}");
            }
        }

        let resp = self
            .client
            .post(&url)
            .json(&req_body)
            .send()
            .await?
            .error_for_status()?;
        let json_resp: LocalGenerateResponse = resp.json().await?;

        if let Some(answer) = json_resp.response {
            Ok(CompletionResponse { text: answer })
        } else {
            Err(LensError::ProviderError(
                "No answer returned by the local runtime".to_string(),
            ))
        }
    }
}

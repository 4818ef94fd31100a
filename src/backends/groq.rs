//! Groq API client implementation for chat functionality.
//!
//! Speaks the OpenAI-compatible `chat/completions` wire format against
//! Groq's endpoint. Used by the labeler (as a one-word classifier) and by
//! the chat assistant (as the remote backend).

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, ChatProvider, ChatRole};
use crate::error::LensError;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1/";
const CHAT_ENDPOINT: &str = "chat/completions";

/// Client for Groq's chat-completion API.
pub struct Groq {
    pub api_key: String,
    pub base_url: Url,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub system: Option<String>,
    pub timeout_seconds: Option<u64>,
    client: Client,
}

/// Message in an outgoing chat request.
#[derive(Serialize, Debug)]
struct GroqChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Request payload for the chat-completion endpoint.
#[derive(Serialize, Debug)]
struct GroqChatRequest<'a> {
    model: &'a str,
    messages: Vec<GroqChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

/// Response payload from the chat-completion endpoint.
#[derive(Deserialize, Debug)]
struct GroqChatResponse {
    choices: Vec<GroqChatChoice>,
}

#[derive(Deserialize, Debug)]
struct GroqChatChoice {
    message: GroqChatMsg,
}

#[derive(Deserialize, Debug)]
struct GroqChatMsg {
    content: Option<String>,
}

impl Groq {
    /// Creates a new Groq client with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for authentication
    /// * `base_url` - Override for the API base URL
    /// * `model` - Model identifier to use
    /// * `max_tokens` - Maximum tokens to generate
    /// * `temperature` - Sampling temperature
    /// * `timeout_seconds` - Request timeout in seconds
    /// * `system` - System prompt sent with every request
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: impl Into<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Self {
            api_key: api_key.into(),
            base_url: Url::parse(&base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()))
                .expect("Failed to parse base URL"),
            model: model.into(),
            max_tokens,
            temperature,
            system,
            timeout_seconds,
            client: builder.build().expect("Failed to build reqwest Client"),
        }
    }
}

#[async_trait]
impl ChatProvider for Groq {
    async fn chat_with_system(
        &self,
        system: Option<&str>,
        messages: &[ChatMessage],
    ) -> Result<String, LensError> {
        if self.api_key.is_empty() {
            return Err(LensError::AuthError("Missing Groq API key".to_string()));
        }

        let mut groq_msgs: Vec<GroqChatMessage> = messages
            .iter()
            .map(|msg| GroqChatMessage {
                role: match msg.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                },
                content: &msg.content,
            })
            .collect();

        if let Some(system) = system.or(self.system.as_deref()) {
            groq_msgs.insert(
                0,
                GroqChatMessage {
                    role: "system",
                    content: system,
                },
            );
        }

        let body = GroqChatRequest {
            model: &self.model,
            messages: groq_msgs,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("Groq request payload: {json}");
            }
        }

        let url = self
            .base_url
            .join(CHAT_ENDPOINT)
            .map_err(|e| LensError::HttpError(e.to_string()))?;

        let mut request = self.client.post(url).bearer_auth(&self.api_key).json(&body);

        if let Some(timeout) = self.timeout_seconds {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        let response = request.send().await?;

        log::debug!("Groq HTTP status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(LensError::ResponseFormatError {
                message: format!("Groq API returned error status: {status}"),
                raw_response: error_text,
            });
        }

        let resp_text = response.text().await?;
        let json_resp: GroqChatResponse =
            serde_json::from_str(&resp_text).map_err(|e| LensError::ResponseFormatError {
                message: format!("Failed to decode Groq API response: {e}"),
                raw_response: resp_text,
            })?;

        json_resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LensError::ProviderError("No answer returned by Groq".to_string()))
    }
}

//! Environment-derived settings, resolved once at process start.
//!
//! The absence of the remote API key is a soft-disable of the remote backend,
//! never a startup failure; the chat assistant decides what that means for
//! the set of selectable backends.

/// Environment variable holding the Groq API key.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Environment variable overriding the remote model identifier.
pub const GROQ_MODEL_ENV: &str = "GROQ_MODEL";

/// Environment variable overriding the local runtime base URL.
pub const LOCAL_MODEL_URL_ENV: &str = "LOCAL_MODEL_URL";

/// Environment variable overriding the local model name.
pub const LOCAL_MODEL_NAME_ENV: &str = "LOCAL_MODEL_NAME";

const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_LOCAL_MODEL_URL: &str = "http://127.0.0.1:11434";
const DEFAULT_LOCAL_MODEL_NAME: &str = "gpt2";

/// Settings shared by the labeler and the chat assistant.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Remote API credential; `None` disables the remote backend
    pub groq_api_key: Option<String>,
    /// Remote model identifier
    pub groq_model: String,
    /// Base URL of the local text-generation runtime
    pub local_model_url: String,
    /// Model name served by the local runtime
    pub local_model_name: String,
}

impl Settings {
    /// Resolve settings from the environment. Empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            groq_api_key: env_opt(GROQ_API_KEY_ENV),
            groq_model: env_opt(GROQ_MODEL_ENV).unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            local_model_url: env_opt(LOCAL_MODEL_URL_ENV)
                .unwrap_or_else(|| DEFAULT_LOCAL_MODEL_URL.to_string()),
            local_model_name: env_opt(LOCAL_MODEL_NAME_ENV)
                .unwrap_or_else(|| DEFAULT_LOCAL_MODEL_NAME.to_string()),
        }
    }
}

fn env_opt(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

use serde::{Deserialize, Serialize};

use crate::dataset::PreviewRow;

/// Request payload for the ask endpoint
#[derive(Deserialize)]
pub struct AskRequest {
    /// The user's free-text question
    pub question: String,
    /// Name of the backend to answer with ("groq" or "local")
    pub backend: String,
}

/// Response payload from the ask endpoint
#[derive(Serialize)]
pub struct AskResponse {
    /// Unique identifier for this turn
    pub id: String,
    /// Backend that produced the reply
    pub backend: String,
    /// Reply text, or the in-conversation diagnostic for a failed turn
    pub reply: String,
    /// Whether the turn failed and `reply` is a diagnostic
    pub failed: bool,
}

/// Response payload describing the session for the page
#[derive(Serialize)]
pub struct OverviewResponse {
    /// Names of the backends that initialized successfully
    pub backends: Vec<String>,
    /// Column names of the loaded table
    pub columns: Vec<String>,
    /// Read-only preview of the first labeled records
    pub preview: Vec<PreviewRow>,
}

/// Single turn in the transcript
#[derive(Serialize)]
pub struct Turn {
    /// Role of the sender ("user" or "assistant")
    pub role: String,
    /// Content of the turn
    pub content: String,
}

/// Response payload carrying the full transcript in order
#[derive(Serialize)]
pub struct TranscriptResponse {
    pub turns: Vec<Turn>,
}

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use uuid::Uuid;

use super::types::{AskRequest, AskResponse, OverviewResponse, TranscriptResponse, Turn};
use super::ServerState;
use crate::backends::BackendKind;

static INDEX_HTML: &str = include_str!("index.html");

/// Serves the built-in chat page
pub async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Describes the session: selectable backends, columns, and record preview
pub async fn handle_overview(State(state): State<ServerState>) -> Json<OverviewResponse> {
    let mut assistant = state.assistant.lock().await;
    Json(OverviewResponse {
        backends: assistant
            .available_backends()
            .iter()
            .map(|b| b.to_string())
            .collect(),
        columns: assistant.columns(),
        preview: assistant.preview(),
    })
}

/// Returns the transcript in insertion order
pub async fn handle_transcript(State(state): State<ServerState>) -> Json<TranscriptResponse> {
    let assistant = state.assistant.lock().await;
    Json(TranscriptResponse {
        turns: assistant
            .transcript()
            .turns()
            .iter()
            .map(|msg| Turn {
                role: msg.role.as_str().to_string(),
                content: msg.content.clone(),
            })
            .collect(),
    })
}

/// Handles one question/answer turn
///
/// # Returns
/// * `Ok(Json<AskResponse>)` - The reply, or an in-conversation diagnostic
///   for a failed turn (`failed: true`); either way the session continues
/// * `Err((StatusCode, String))` - Only for requests naming a backend that
///   is unknown or did not initialize
pub async fn handle_ask(
    State(state): State<ServerState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, String)> {
    let backend: BackendKind = req
        .backend
        .parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, format!("Unknown backend: {}", req.backend)))?;

    let mut assistant = state.assistant.lock().await;
    if !assistant.available_backends().contains(&backend) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Backend not available: {backend}"),
        ));
    }

    let reply = assistant.ask(backend, &req.question).await;

    Ok(Json(AskResponse {
        id: format!("turn-{}", Uuid::new_v4()),
        backend: backend.to_string(),
        failed: reply.is_failed(),
        reply: reply.text().to_string(),
    }))
}

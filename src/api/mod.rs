//! Server module exposing the chat assistant as a chat-style web page.
//!
//! Serves a built-in single page plus JSON endpoints for the backend list,
//! the record preview, the transcript, and question submission. Supports
//! CORS so the page can also be replaced by an external front end.

mod handlers;
mod types;

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use crate::assistant::Assistant;
use handlers::{handle_ask, handle_index, handle_overview, handle_transcript};

pub use types::{AskRequest, AskResponse, OverviewResponse, TranscriptResponse, Turn};

/// Main server struct that owns the assistant session
pub struct Server {
    assistant: Arc<Mutex<Assistant>>,
}

/// Internal server state shared between request handlers
#[derive(Clone)]
struct ServerState {
    /// Shared reference to the single interactive session
    assistant: Arc<Mutex<Assistant>>,
}

impl Server {
    /// Creates a new server instance around one assistant session
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant: Arc::new(Mutex::new(assistant)),
        }
    }

    /// Starts the server and listens for requests on the specified address
    ///
    /// # Arguments
    /// * `addr` - Address to bind to (e.g. "127.0.0.1:3000")
    pub async fn run(self, addr: &str) -> Result<(), crate::error::LensError> {
        let app = Router::new()
            .route("/", get(handle_index))
            .route("/api/overview", get(handle_overview))
            .route("/api/transcript", get(handle_transcript))
            .route("/api/ask", post(handle_ask))
            .layer(CorsLayer::permissive())
            .with_state(ServerState {
                assistant: self.assistant,
            });

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| crate::error::LensError::InvalidRequest(e.to_string()))?;

        log::info!("Chat assistant listening on http://{addr}");

        axum::serve(listener, app)
            .await
            .map_err(|e| crate::error::LensError::InvalidRequest(e.to_string()))?;

        Ok(())
    }
}

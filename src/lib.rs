//! reviewlens couples a batch sentiment labeler with an interactive chat
//! assistant for exploring the labeled data.
//!
//! # Overview
//! The crate is split in two halves that only share a CSV file on disk:
//!
//! - The labeler reads a table of product reviews, classifies each row's
//!   free-text feedback through a remote chat-completion call, and writes the
//!   table back with a `Sentiment_Label` column appended.
//! - The chat assistant loads the labeled table and answers free-form
//!   questions about it over a small web surface, dispatching each question
//!   to either a remote chat-completion backend or a local text-generation
//!   runtime.
//!
//! Both halves talk to their generation backends through the [`chat`] and
//! [`completion`] provider traits, so tests can substitute stubs for the real
//! HTTP clients.

// Re-export for convenience
pub use async_trait::async_trait;

/// Chat assistant session: transcript, backend dispatch, prompt building
pub mod assistant;

/// HTTP clients for the supported generation backends
pub mod backends;

/// Chat message types and the chat provider trait
pub mod chat;

/// Prompt-completion types and the completion provider trait
pub mod completion;

/// Environment-derived settings resolved once at startup
pub mod config;

/// Loading, saving and memoized caching of the review table
pub mod dataset;

/// Error types and handling
pub mod error;

/// Sequential sentiment labeling over review texts
pub mod labeler;

/// Web surface exposing the assistant as a chat-style page
pub mod api;

#[inline]
/// Initialize logging using env_logger. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

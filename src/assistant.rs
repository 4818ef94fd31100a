//! Chat assistant session: transcript, backend dispatch, prompt building.
//!
//! The assistant owns everything mutable for one interactive session: the
//! transcript, the memoized table, and whichever backends initialized at
//! startup. Backends are held as trait objects so tests can drive the
//! session with stubs.

use crate::backends::BackendKind;
use crate::chat::{ChatMessage, ChatProvider, Transcript};
use crate::completion::{CompletionProvider, CompletionRequest};
use crate::dataset::{CachedTable, PreviewRow, ReviewTable, FEEDBACK_COL, LABEL_COL, PRODUCT_COL};
use crate::error::LensError;

/// Number of records embedded in the remote system prompt and shown in the
/// page preview.
pub const PREVIEW_ROWS: usize = 5;

/// Output budget for remote answers.
pub const REMOTE_MAX_TOKENS: u32 = 400;

/// Output budget for local answers.
pub const LOCAL_MAX_TOKENS: u32 = 80;

/// Fixed seed so local answers are deterministic across runs.
pub const LOCAL_SEED: u64 = 42;

/// Prefix attached to every local answer. The local model is deliberately
/// context-free: it cannot reliably use structured context, so no data sample
/// is passed and the reader is told as much.
pub const LOCAL_DISCLAIMER: &str =
    "Note: the local model answers from general knowledge and cannot see the review data. ";

const LOCAL_PRIMING_MARKER: &str = "Answer:";

/// Outcome of one assistant turn. Failures carry the reason as data so the
/// caller decides between display and logging; they are never swallowed.
#[derive(Debug, Clone)]
pub enum Reply {
    /// The backend's answer, verbatim
    Answer(String),
    /// In-conversation diagnostic for a failed turn
    Failed(String),
}

impl Reply {
    /// Text to render in the conversation, for either outcome.
    pub fn text(&self) -> &str {
        match self {
            Reply::Answer(text) => text,
            Reply::Failed(diagnostic) => diagnostic,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Reply::Failed(_))
    }
}

/// One interactive chat session over the labeled review table.
pub struct Assistant {
    remote: Option<Box<dyn ChatProvider>>,
    local: Option<Box<dyn CompletionProvider>>,
    table: CachedTable,
    transcript: Transcript,
}

impl Assistant {
    /// Creates a session from whichever backends initialized. Either may be
    /// absent; the session only refuses questions aimed at an absent one.
    pub fn new(
        remote: Option<Box<dyn ChatProvider>>,
        local: Option<Box<dyn CompletionProvider>>,
        table: CachedTable,
    ) -> Self {
        Self {
            remote,
            local,
            table,
            transcript: Transcript::new(),
        }
    }

    /// Backends a user may select, in fixed presentation order.
    pub fn available_backends(&self) -> Vec<BackendKind> {
        let mut kinds = Vec::new();
        if self.remote.is_some() {
            kinds.push(BackendKind::Groq);
        }
        if self.local.is_some() {
            kinds.push(BackendKind::Local);
        }
        kinds
    }

    /// Column names of the loaded table.
    pub fn columns(&mut self) -> Vec<String> {
        self.table.get().headers().to_vec()
    }

    /// First records of the loaded table, for the read-only preview.
    pub fn preview(&mut self) -> Vec<PreviewRow> {
        self.table.get().head(PREVIEW_ROWS)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Answers one question on the selected backend.
    ///
    /// The question and the reply are appended to the transcript in that
    /// order, whether or not the turn succeeded; a failed turn yields an
    /// in-conversation diagnostic and the session continues.
    pub async fn ask(&mut self, backend: BackendKind, question: &str) -> Reply {
        self.transcript.push_user(question);

        let result = match backend {
            BackendKind::Groq => {
                let system = data_system_prompt(self.table.get());
                match &self.remote {
                    Some(remote) => {
                        let messages = [ChatMessage::user().content(question).build()];
                        remote.chat_with_system(Some(&system), &messages).await
                    }
                    None => Err(LensError::AuthError(
                        "The remote backend is not configured".to_string(),
                    )),
                }
            }
            BackendKind::Local => match &self.local {
                Some(local) => {
                    let req = CompletionRequest::builder(local_prompt(question))
                        .max_tokens(LOCAL_MAX_TOKENS)
                        .seed(LOCAL_SEED)
                        .build();
                    local.complete(&req).await.map(|resp| {
                        format!("{LOCAL_DISCLAIMER}{}", strip_priming(&resp.text))
                    })
                }
                None => Err(LensError::ProviderError(
                    "The local backend is not available".to_string(),
                )),
            },
        };

        let reply = match result {
            Ok(text) => Reply::Answer(text),
            Err(e) => {
                log::warn!("{backend} turn failed: {e}");
                Reply::Failed(format!("The {backend} backend could not answer: {e}"))
            }
        };
        self.transcript.push_assistant(reply.text());
        reply
    }
}

/// System instruction for the remote backend: the full column list plus a
/// fixed small sample of the labeled records.
fn data_system_prompt(table: &ReviewTable) -> String {
    let mut prompt = String::from(
        "You are a helpful data analyst answering questions about a table of \
         labeled product reviews. Answer from the information given.\n",
    );
    prompt.push_str(&format!("Columns: {}\n", table.headers().join(", ")));
    prompt.push_str(&format!(
        "First {} records:\n",
        PREVIEW_ROWS.min(table.len())
    ));
    for i in 0..PREVIEW_ROWS.min(table.len()) {
        prompt.push_str(&format!(
            "- {PRODUCT_COL}: {} | {LABEL_COL}: {} | {FEEDBACK_COL}: {}\n",
            table.cell(i, PRODUCT_COL).unwrap_or_default(),
            table.cell(i, LABEL_COL).unwrap_or_default(),
            table.cell(i, FEEDBACK_COL).unwrap_or_default(),
        ));
    }
    prompt
}

/// Fixed priming template for the local model. No data sample is embedded.
fn local_prompt(question: &str) -> String {
    format!("Question: {question}\n{LOCAL_PRIMING_MARKER}")
}

/// Takes the continuation after the priming marker. Local runtimes may or
/// may not echo the prompt back, so the marker is optional in the output.
fn strip_priming(output: &str) -> &str {
    output
        .rsplit_once(LOCAL_PRIMING_MARKER)
        .map(|(_, rest)| rest)
        .unwrap_or(output)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ReviewTable;

    fn labeled_table() -> ReviewTable {
        ReviewTable::new(
            vec![
                PRODUCT_COL.to_string(),
                FEEDBACK_COL.to_string(),
                LABEL_COL.to_string(),
            ],
            vec![
                vec!["Widget".into(), "Love it".into(), "POSITIVE".into()],
                vec!["Gadget".into(), "Broke fast".into(), "NEGATIVE".into()],
            ],
        )
    }

    #[test]
    fn system_prompt_lists_columns_and_sample_rows() {
        let prompt = data_system_prompt(&labeled_table());
        assert!(prompt.contains("product_name, Customer_Feedback, Sentiment_Label"));
        assert!(prompt.contains("Widget"));
        assert!(prompt.contains("NEGATIVE"));
        assert!(prompt.contains("First 2 records"));
    }

    #[test]
    fn priming_marker_is_stripped_when_echoed() {
        let out = "Question: why?\nAnswer: because.";
        assert_eq!(strip_priming(out), "because.");
    }

    #[test]
    fn continuation_without_marker_is_only_trimmed() {
        assert_eq!(strip_priming("  because.  "), "because.");
    }

    #[test]
    fn local_prompt_embeds_the_question() {
        let prompt = local_prompt("why?");
        assert!(prompt.starts_with("Question: why?"));
        assert!(prompt.ends_with(LOCAL_PRIMING_MARKER));
    }
}

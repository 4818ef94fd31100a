use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use reviewlens::assistant::{Assistant, LOCAL_DISCLAIMER};
use reviewlens::async_trait;
use reviewlens::backends::BackendKind;
use reviewlens::chat::{ChatMessage, ChatProvider, ChatRole};
use reviewlens::completion::{CompletionProvider, CompletionRequest, CompletionResponse};
use reviewlens::dataset::CachedTable;
use reviewlens::error::LensError;

/// Remote stub that records the system prompt it was given.
struct RecordingRemote {
    seen_system: Arc<Mutex<Option<String>>>,
    reply: Option<String>,
}

impl RecordingRemote {
    fn replying(reply: &str) -> (Self, Arc<Mutex<Option<String>>>) {
        let seen = Arc::new(Mutex::new(None));
        (
            Self {
                seen_system: seen.clone(),
                reply: Some(reply.to_string()),
            },
            seen,
        )
    }

    fn failing() -> Self {
        Self {
            seen_system: Arc::new(Mutex::new(None)),
            reply: None,
        }
    }
}

#[async_trait]
impl ChatProvider for RecordingRemote {
    async fn chat_with_system(
        &self,
        system: Option<&str>,
        _messages: &[ChatMessage],
    ) -> Result<String, LensError> {
        *self.seen_system.lock().unwrap() = system.map(str::to_string);
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LensError::HttpError("simulated outage".into())),
        }
    }
}

/// Local stub that echoes the priming template back with a continuation.
struct EchoingLocal;

#[async_trait]
impl CompletionProvider for EchoingLocal {
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionResponse, LensError> {
        assert_eq!(req.seed, Some(42), "local turns must use the fixed seed");
        assert!(req.max_tokens.is_some(), "local turns must bound the output");
        Ok(CompletionResponse {
            text: format!("{} it depends on the product. ", req.prompt),
        })
    }
}

fn labeled_table(dir: &tempfile::TempDir) -> (PathBuf, CachedTable) {
    let path = dir.path().join("labeled_reviews.csv");
    std::fs::write(
        &path,
        "product_name,Customer_Feedback,Sentiment_Label\n\
         Product X,Love it,POSITIVE\n\
         Product Y,Broke fast,NEGATIVE\n",
    )
    .unwrap();
    let table = CachedTable::load(&path).unwrap();
    (path, table)
}

#[tokio::test]
async fn without_credential_only_local_is_selectable_and_answers() {
    let dir = tempfile::tempdir().unwrap();
    let (_path, table) = labeled_table(&dir);
    let mut assistant = Assistant::new(None, Some(Box::new(EchoingLocal)), table);

    assert_eq!(assistant.available_backends(), vec![BackendKind::Local]);

    let reply = assistant.ask(BackendKind::Local, "Is Product X any good?").await;
    assert!(!reply.is_failed());
    assert!(!reply.text().is_empty());
    assert!(reply.text().starts_with(LOCAL_DISCLAIMER));
    // The priming template is stripped from the continuation.
    assert!(!reply.text().contains("Question:"));
}

#[tokio::test]
async fn full_turn_cycle_appends_question_then_reply() {
    let dir = tempfile::tempdir().unwrap();
    let (_path, table) = labeled_table(&dir);
    let (remote, _seen) = RecordingRemote::replying("Mostly positive.");
    let mut assistant = Assistant::new(Some(Box::new(remote)), None, table);

    let question = "What do people think of Product X?";
    let reply = assistant.ask(BackendKind::Groq, question).await;
    assert_eq!(reply.text(), "Mostly positive.");

    let turns = assistant.transcript().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, ChatRole::User);
    assert_eq!(turns[0].content, question);
    assert_eq!(turns[1].role, ChatRole::Assistant);
    assert!(!turns[1].content.is_empty());
}

#[tokio::test]
async fn remote_system_prompt_carries_columns_and_sample() {
    let dir = tempfile::tempdir().unwrap();
    let (_path, table) = labeled_table(&dir);
    let (remote, seen) = RecordingRemote::replying("ok");
    let mut assistant = Assistant::new(Some(Box::new(remote)), None, table);

    let _ = assistant.ask(BackendKind::Groq, "anything").await;

    let system = seen.lock().unwrap().clone().expect("system prompt was sent");
    assert!(system.contains("product_name, Customer_Feedback, Sentiment_Label"));
    assert!(system.contains("Product X"));
    assert!(system.contains("NEGATIVE"));
}

#[tokio::test]
async fn failed_turn_is_a_diagnostic_and_session_continues() {
    let dir = tempfile::tempdir().unwrap();
    let (_path, table) = labeled_table(&dir);
    let mut assistant = Assistant::new(
        Some(Box::new(RecordingRemote::failing())),
        Some(Box::new(EchoingLocal)),
        table,
    );

    let reply = assistant.ask(BackendKind::Groq, "first question").await;
    assert!(reply.is_failed());
    assert!(!reply.text().is_empty());

    // The failed turn still lands in the transcript, and the session keeps
    // accepting questions on another backend.
    assert_eq!(assistant.transcript().len(), 2);
    let reply = assistant.ask(BackendKind::Local, "second question").await;
    assert!(!reply.is_failed());
    assert_eq!(assistant.transcript().len(), 4);
}

#[tokio::test]
async fn asking_an_absent_backend_fails_without_touching_the_other() {
    let dir = tempfile::tempdir().unwrap();
    let (_path, table) = labeled_table(&dir);
    let mut assistant = Assistant::new(None, Some(Box::new(EchoingLocal)), table);

    let reply = assistant.ask(BackendKind::Groq, "hello").await;
    assert!(reply.is_failed());
    assert!(reply.text().contains("not configured"));
}

#[tokio::test]
async fn preview_shows_the_first_labeled_records() {
    let dir = tempfile::tempdir().unwrap();
    let (_path, table) = labeled_table(&dir);
    let mut assistant = Assistant::new(None, Some(Box::new(EchoingLocal)), table);

    let preview = assistant.preview();
    assert_eq!(preview.len(), 2);
    assert_eq!(preview[0].product_name, "Product X");
    assert_eq!(preview[0].sentiment, "POSITIVE");
    assert_eq!(
        assistant.columns(),
        vec!["product_name", "Customer_Feedback", "Sentiment_Label"]
    );
}

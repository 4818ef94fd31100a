//! Sequential sentiment labeling over review texts.
//!
//! One remote classification call per record, no retry, no batching. A
//! single record's failure never aborts the batch: transport failures become
//! the `API_ERROR` sentinel and the fold continues.

use crate::chat::{ChatMessage, ChatProvider};

/// Instruction given to the classifier for every record.
pub const SENTIMENT_SYSTEM_PROMPT: &str = "You are a sentiment classifier, analyze the given \
customer reviews. Your responses should be only one word, and it should be one of these three: \
'POSITIVE', 'NEGATIVE', 'NEUTRAL'. Do not include any other text or symbols. Do not change the \
capitalization";

/// Sampling temperature for classification calls.
pub const CLASSIFIER_TEMPERATURE: f32 = 0.01;

/// Output budget for classification calls; one word is all we need.
pub const CLASSIFIER_MAX_TOKENS: u32 = 5;

/// Sentiment assigned to one review record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    /// Sentinel for a failed classification call, distinct from the
    /// ambiguous-result default of `Neutral`.
    ApiError,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::ApiError => "API_ERROR",
        }
    }

    /// Normalizes a raw classifier reply: trim, uppercase, and fall back to
    /// `Neutral` for anything that is not one of the three accepted literals.
    /// The fallback is the ambiguous-result policy, not an error.
    pub fn from_classifier_response(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "POSITIVE" => Sentiment::Positive,
            "NEGATIVE" => Sentiment::Negative,
            "NEUTRAL" => Sentiment::Neutral,
            _ => Sentiment::Neutral,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies one review text.
pub async fn classify(classifier: &dyn ChatProvider, text: &str) -> Sentiment {
    let messages = [ChatMessage::user().content(text).build()];
    match classifier.chat(&messages).await {
        Ok(raw) => Sentiment::from_classifier_response(&raw),
        Err(e) => {
            log::warn!("Classification call failed: {e}");
            Sentiment::ApiError
        }
    }
}

/// Classifies every review text in order, producing exactly one label per
/// input. A pure sequential fold; output length always equals input length.
pub async fn label_all(classifier: &dyn ChatProvider, texts: &[String]) -> Vec<Sentiment> {
    let mut labels = Vec::with_capacity(texts.len());
    for (i, text) in texts.iter().enumerate() {
        if i % 10 == 0 {
            log::info!("Processing review {} of {}...", i + 1, texts.len());
        }
        labels.push(classify(classifier, text).await);
    }
    labels
}

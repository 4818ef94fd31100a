use async_trait::async_trait;

use crate::error::LensError;

/// Role of a participant in a chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// The user/human participant in the conversation
    User,
    /// The AI assistant participant in the conversation
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// A single message in a chat conversation.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// The role of who sent this message (user or assistant)
    pub role: ChatRole,
    /// The text content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new builder for a user message
    pub fn user() -> ChatMessageBuilder {
        ChatMessageBuilder::new(ChatRole::User)
    }

    /// Create a new builder for an assistant message
    pub fn assistant() -> ChatMessageBuilder {
        ChatMessageBuilder::new(ChatRole::Assistant)
    }
}

/// Builder for ChatMessage
#[derive(Debug)]
pub struct ChatMessageBuilder {
    role: ChatRole,
    content: String,
}

impl ChatMessageBuilder {
    /// Create a new ChatMessageBuilder with specified role
    pub fn new(role: ChatRole) -> Self {
        Self {
            role,
            content: String::new(),
        }
    }

    /// Set the message content
    pub fn content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = content.into();
        self
    }

    /// Build the ChatMessage
    pub fn build(self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content,
        }
    }
}

/// Ordered, append-only conversation history for one interactive session.
///
/// Held entirely in memory and discarded when the session ends.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ChatMessage::user().content(content).build());
    }

    /// Append an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns
            .push(ChatMessage::assistant().content(content).build());
    }

    /// All turns in insertion order.
    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Trait for providers that support chat-style interactions.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Sends a chat request using the provider's own system prompt, if any.
    ///
    /// # Arguments
    ///
    /// * `messages` - The conversation as a slice of chat messages
    ///
    /// # Returns
    ///
    /// The provider's response text or an error
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LensError> {
        self.chat_with_system(None, messages).await
    }

    /// Sends a chat request with an explicit system instruction.
    ///
    /// `system` overrides any system prompt configured on the provider; pass
    /// `None` to fall back to the configured one.
    async fn chat_with_system(
        &self,
        system: Option<&str>,
        messages: &[ChatMessage],
    ) -> Result<String, LensError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_preserves_order_and_roles() {
        let mut transcript = Transcript::new();
        transcript.push_user("What do people think of Product X?");
        transcript.push_assistant("Mostly positive.");

        let turns = transcript.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, ChatRole::User);
        assert_eq!(turns[0].content, "What do people think of Product X?");
        assert_eq!(turns[1].role, ChatRole::Assistant);
        assert_eq!(turns[1].content, "Mostly positive.");
    }

    #[test]
    fn message_builder_sets_role_and_content() {
        let msg = ChatMessage::assistant().content("hi").build();
        assert_eq!(msg.role, ChatRole::Assistant);
        assert_eq!(msg.content, "hi");
        assert_eq!(msg.role.as_str(), "assistant");
    }
}

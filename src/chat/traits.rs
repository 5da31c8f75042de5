use async_trait::async_trait;

use crate::error::DebateError;

use super::message::ChatMessage;

/// A single generation result returned by a provider.
pub trait ChatResponse: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn text(&self) -> Option<String>;
}

/// Trait for providers that support chat-style interactions.
///
/// The debate core only ever needs one operation from the outside
/// world: take an ordered message history and produce the next reply.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, DebateError>;
}

/// Plain text response used by providers without richer payloads.
#[derive(Debug, Clone)]
pub struct TextResponse {
    pub text: String,
}

impl std::fmt::Display for TextResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl ChatResponse for TextResponse {
    fn text(&self) -> Option<String> {
        Some(self.text.clone())
    }
}

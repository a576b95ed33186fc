//! Chat-completion request/response types and the `ChatModel` trait.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    #[serde(rename = "user")]
    Human,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Create a message with the given role.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message.
    pub fn human(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Human, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// A request to a chat model containing messages and sampling parameters.
///
/// ```rust,ignore
/// let request = ChatRequest::new(vec![
///     Message::system("You are an expert SQL query evaluator."),
///     Message::human("Evaluate this SQL query generation: ..."),
/// ])
/// .with_temperature(0.1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    /// The conversation messages to send to the model.
    pub messages: Vec<Message>,

    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Create a new chat request with the given messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    /// Set the temperature for generation.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Token usage reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub reasoning_tokens: Option<usize>,
    pub total_tokens: usize,
}

impl UsageMetadata {
    pub fn new(input_tokens: usize, output_tokens: usize) -> Self {
        Self {
            input_tokens,
            output_tokens,
            reasoning_tokens: None,
            total_tokens: input_tokens + output_tokens,
        }
    }

    pub fn with_reasoning(input_tokens: usize, output_tokens: usize, reasoning: usize) -> Self {
        Self {
            reasoning_tokens: Some(reasoning),
            ..Self::new(input_tokens, output_tokens)
        }
    }
}

/// A complete response from a chat model.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// The assistant's reply.
    pub message: Message,

    /// Token usage, when the provider reports it.
    pub usage: Option<UsageMetadata>,

    /// Model that actually served the request.
    pub model: String,

    /// Why generation stopped (`stop`, `length`, ...).
    pub finish_reason: Option<String>,
}

impl ChatResponse {
    /// Text of the assistant's reply.
    pub fn text(&self) -> &str {
        &self.message.content
    }
}

/// A model that answers chat conversations.
///
/// Implementations must be `Send + Sync`; share them as `Arc<dyn ChatModel>`.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a complete chat response from messages.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct EchoModel;

    #[async_trait]
    impl ChatModel for EchoModel {
        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
            let last = request.messages.last().cloned().unwrap_or_else(|| Message::human(""));
            Ok(ChatResponse {
                message: Message::assistant(last.content),
                usage: Some(UsageMetadata::new(3, 3)),
                model: "echo".to_string(),
                finish_reason: Some("stop".to_string()),
            })
        }
    }

    #[tokio::test]
    async fn test_trait_object() {
        let model: Arc<dyn ChatModel> = Arc::new(EchoModel);
        let request = ChatRequest::new(vec![Message::system("sys"), Message::human("Hi")]);

        let response = model.chat(request).await.unwrap();
        assert_eq!(response.text(), "Hi");
        assert_eq!(response.usage.unwrap().total_tokens, 6);
    }

    #[test]
    fn test_request_builder() {
        let request = ChatRequest::new(vec![Message::human("x")]).with_temperature(0.1);

        assert_eq!(request.temperature, Some(0.1));
        assert_eq!(request.messages.len(), 1);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&MessageRole::Human).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&MessageRole::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&MessageRole::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn test_usage_with_reasoning() {
        let usage = UsageMetadata::with_reasoning(10, 40, 30);
        assert_eq!(usage.total_tokens, 50);
        assert_eq!(usage.reasoning_tokens, Some(30));
    }
}

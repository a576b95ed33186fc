//! LLM provider clients for sqlgen.
//!
//! This crate exposes two model seams:
//! - [`ChatModel`] for ordinary chat completions (used to judge queries)
//! - [`GrammarModel`] for generation constrained by a grammar definition
//!   (used to produce SQL)
//!
//! [`remote::OpenAiClient`] implements both.
//!
//! # Example Usage
//!
//! ## Chat completion
//!
//! ```rust,ignore
//! use llm::remote::OpenAiClient;
//! use llm::{ChatModel, ChatRequest, Message, RemoteLlmConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("OPENAI_API_KEY")?;
//!     let config = RemoteLlmConfig::new(api_key, "https://api.openai.com/v1", "gpt-4o-mini");
//!     let client = OpenAiClient::new(config)?;
//!
//!     let request = ChatRequest::new(vec![
//!         Message::human("Explain window functions briefly")
//!     ]).with_temperature(0.1);
//!
//!     let response = client.chat(request).await?;
//!     println!("Response: {}", response.text());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Grammar-constrained generation
//!
//! ```rust,ignore
//! use llm::remote::OpenAiClient;
//! use llm::{ConstrainedRequest, GrammarModel, GrammarTool, RemoteLlmConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("OPENAI_API_KEY")?;
//!     let config = RemoteLlmConfig::new(api_key, "https://api.openai.com/v1", "gpt-5");
//!     let client = OpenAiClient::new(config)?;
//!
//!     let tool = GrammarTool::lark("digits", "Emit digits only", "start: /[0-9]+/");
//!     let response = client.generate(ConstrainedRequest::new("Count to three", tool)).await?;
//!     println!("{}", response.text);
//!
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod grammar;

#[cfg(feature = "remote")]
pub mod remote;

// Re-export commonly used types
pub use chat::{ChatModel, ChatRequest, ChatResponse, Message, MessageRole, UsageMetadata};
pub use config::RemoteLlmConfig;
pub use error::{LlmError, Result};
pub use grammar::{
    ConstrainedRequest, ConstrainedResponse, GrammarModel, GrammarSyntax, GrammarTool,
    OutputSource,
};

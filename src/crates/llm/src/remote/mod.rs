//! Remote LLM provider implementations.
//!
//! # Providers
//!
//! - **OpenAI** - Chat Completions for free-form chat, and the Responses API
//!   for grammar-constrained generation via custom tools

pub mod openai;
mod openai_responses;

pub use openai::OpenAiClient;

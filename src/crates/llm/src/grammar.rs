//! Grammar-constrained generation.
//!
//! A [`GrammarTool`] carries a grammar definition that the provider uses to
//! constrain decoding. The grammar is opaque here: it is forwarded verbatim and
//! never parsed locally.

use crate::chat::UsageMetadata;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Grammar dialects understood by constrained-decoding providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarSyntax {
    Lark,
}

/// A custom tool whose free-form input must match a grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarTool {
    pub name: String,
    pub description: String,
    pub syntax: GrammarSyntax,
    pub definition: String,
}

impl GrammarTool {
    pub fn lark(
        name: impl Into<String>,
        description: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            syntax: GrammarSyntax::Lark,
            definition: definition.into(),
        }
    }
}

/// Input for a single constrained generation call.
#[derive(Debug, Clone)]
pub struct ConstrainedRequest {
    /// Free-form model input.
    pub input: String,

    /// The grammar tool the output must conform to.
    pub tool: GrammarTool,
}

impl ConstrainedRequest {
    pub fn new(input: impl Into<String>, tool: GrammarTool) -> Self {
        Self {
            input: input.into(),
            tool,
        }
    }
}

/// Where the generated text was found in the provider's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSource {
    /// Input of a call to the grammar tool.
    ToolCall,
    /// Plain assistant text.
    Message,
}

/// Result of a constrained generation call.
#[derive(Debug, Clone)]
pub struct ConstrainedResponse {
    pub text: String,
    pub source: OutputSource,
    pub model: String,
    pub usage: Option<UsageMetadata>,
}

/// A model that can generate text under a grammar constraint.
#[async_trait]
pub trait GrammarModel: Send + Sync {
    async fn generate(&self, request: ConstrainedRequest) -> Result<ConstrainedResponse>;
}

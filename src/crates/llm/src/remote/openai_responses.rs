//! Grammar-constrained generation over the OpenAI Responses API.
//!
//! The grammar travels as a `custom` tool:
//!
//! ```json
//! {"type": "custom", "name": "...", "description": "...",
//!  "format": {"type": "grammar", "syntax": "lark", "definition": "..."}}
//! ```
//!
//! The model answers either with a `custom_tool_call` output item carrying the
//! constrained text in `input`, or with a plain assistant `message`.

use super::openai::OpenAiClient;
use crate::chat::UsageMetadata;
use crate::error::{LlmError, Result};
use crate::grammar::{
    ConstrainedRequest, ConstrainedResponse, GrammarModel, GrammarSyntax, GrammarTool,
    OutputSource,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
impl GrammarModel for OpenAiClient {
    async fn generate(&self, request: ConstrainedRequest) -> Result<ConstrainedResponse> {
        let body = ResponsesRequest::new(&self.config.model, &request);
        let resp: ResponsesResponse = self.post_json("responses", &body).await?;

        if let Some(error) = resp.error {
            return Err(LlmError::ProviderError(error.message));
        }

        let (text, source) = extract_output(&request.tool.name, resp.output)?;
        tracing::debug!(source = ?source, status = ?resp.status, "Constrained generation finished");

        Ok(ConstrainedResponse {
            text,
            source,
            model: resp.model,
            usage: resp.usage.map(ResponsesUsage::into_metadata),
        })
    }
}

/// Pick the generated text out of the response output items.
///
/// A call to the grammar tool wins over assistant text; an assistant refusal
/// or an output with neither is an error.
fn extract_output(tool_name: &str, output: Vec<OutputItem>) -> Result<(String, OutputSource)> {
    let mut message_text = None;

    for item in output {
        match item {
            OutputItem::CustomToolCall { name, input } if name == tool_name => {
                return Ok((input, OutputSource::ToolCall));
            }
            OutputItem::Message { content } if message_text.is_none() => {
                for part in content {
                    match part {
                        OutputContent::OutputText { text } => {
                            message_text = Some(text);
                            break;
                        }
                        OutputContent::Refusal { refusal } => {
                            return Err(LlmError::Refusal(refusal));
                        }
                        OutputContent::Other => {}
                    }
                }
            }
            _ => {}
        }
    }

    message_text
        .map(|text| (text, OutputSource::Message))
        .ok_or_else(|| {
            LlmError::InvalidResponse(format!(
                "no '{}' tool call or assistant text in model output",
                tool_name
            ))
        })
}

// Responses API types
#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    text: TextConfig,
    tools: Vec<CustomTool<'a>>,
    parallel_tool_calls: bool,
}

impl<'a> ResponsesRequest<'a> {
    fn new(model: &'a str, request: &'a ConstrainedRequest) -> Self {
        Self {
            model,
            input: &request.input,
            text: TextConfig {
                format: TextFormat { kind: "text" },
            },
            tools: vec![CustomTool::from_grammar(&request.tool)],
            parallel_tool_calls: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct TextConfig {
    format: TextFormat,
}

#[derive(Debug, Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct CustomTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    description: &'a str,
    format: ToolFormat<'a>,
}

impl<'a> CustomTool<'a> {
    fn from_grammar(tool: &'a GrammarTool) -> Self {
        Self {
            kind: "custom",
            name: &tool.name,
            description: &tool.description,
            format: ToolFormat {
                kind: "grammar",
                syntax: tool.syntax,
                definition: &tool.definition,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ToolFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    syntax: GrammarSyntax,
    definition: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    model: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<ResponsesError>,
    #[serde(default)]
    output: Vec<OutputItem>,
    #[serde(default)]
    usage: Option<ResponsesUsage>,
}

#[derive(Debug, Deserialize)]
struct ResponsesError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<OutputContent>,
    },
    CustomToolCall {
        name: String,
        input: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputContent {
    OutputText { text: String },
    Refusal { refusal: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ResponsesUsage {
    input_tokens: usize,
    output_tokens: usize,
    #[serde(default)]
    output_tokens_details: Option<OutputTokensDetails>,
}

#[derive(Debug, Deserialize)]
struct OutputTokensDetails {
    reasoning_tokens: Option<usize>,
}

impl ResponsesUsage {
    fn into_metadata(self) -> UsageMetadata {
        match self.output_tokens_details.and_then(|d| d.reasoning_tokens) {
            Some(reasoning) => {
                UsageMetadata::with_reasoning(self.input_tokens, self.output_tokens, reasoning)
            }
            None => UsageMetadata::new(self.input_tokens, self.output_tokens),
        }
    }
}

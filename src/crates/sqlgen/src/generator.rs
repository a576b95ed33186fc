//! Natural language to SQL under the grammar constraint.

use crate::error::{Result, SqlGenError};
use crate::grammar::sql_grammar_tool;
use crate::prompt::generation_input;
use llm::{ConstrainedRequest, GrammarModel, GrammarTool};
use serde::Serialize;
use std::sync::Arc;
use warehouse::SchemaSource;

/// A query produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedSql {
    pub sql: String,
    pub model: String,
}

/// Looks up the table schema, assembles the prompt and asks the model for
/// one grammar-conforming statement.
pub struct SqlGenerator {
    schema: Arc<dyn SchemaSource>,
    model: Arc<dyn GrammarModel>,
    tool: GrammarTool,
}

impl SqlGenerator {
    /// Generator using the built-in orders grammar.
    pub fn new(schema: Arc<dyn SchemaSource>, model: Arc<dyn GrammarModel>) -> Self {
        Self::with_tool(schema, model, sql_grammar_tool())
    }

    pub fn with_tool(
        schema: Arc<dyn SchemaSource>,
        model: Arc<dyn GrammarModel>,
        tool: GrammarTool,
    ) -> Self {
        Self {
            schema,
            model,
            tool,
        }
    }

    pub async fn generate(&self, prompt: &str, table_name: &str) -> Result<GeneratedSql> {
        let schema = self.schema.table_schema(table_name).await?;
        tracing::info!(table = %table_name, columns = schema.len(), "Schema: {:?}", schema);

        let input = generation_input(table_name, &schema, prompt);
        let response = self
            .model
            .generate(ConstrainedRequest::new(input, self.tool.clone()))
            .await?;

        let sql = response.text.trim().to_string();
        if sql.is_empty() {
            return Err(SqlGenError::EmptyGeneration);
        }

        tracing::info!(model = %response.model, source = ?response.source, "Generated SQL: {}", sql);
        Ok(GeneratedSql {
            sql,
            model: response.model,
        })
    }
}

//! Prompt assembly for SQL generation and judging.

use warehouse::ColumnInfo;

/// Rubric given to the judge model as its system prompt.
pub const JUDGE_SYSTEM_PROMPT: &str = r#"You are an expert SQL query evaluator. Your task is to compare a generated SQL query against a ground truth query and provide a detailed assessment.

You should evaluate on multiple dimensions:
1. **Semantic Equivalence**: Do both queries accomplish the same goal?
2. **Syntactic Similarity**: How similar is the structure and syntax?
3. **Correctness**: Would the generated query produce the correct results?
4. **Efficiency**: Is the generated query reasonably efficient?

Provide your response in the following format:
SCORE: [A decimal number between 0.0 and 1.0]
SEMANTIC_MATCH: [YES or NO - are they functionally equivalent?]
REASONING: [Detailed explanation of your evaluation]

Scoring guidelines:
- 1.0: Queries are functionally identical or semantically equivalent
- 0.8-0.9: Minor differences (e.g., column order, aliases) but produces same results
- 0.6-0.7: Mostly correct but may have minor logic issues
- 0.4-0.5: Partially correct, captures some intent but has significant issues
- 0.2-0.3: Incorrect but shows some understanding
- 0.0-0.1: Completely wrong or invalid SQL"#;

/// Model input for constrained SQL generation.
pub fn generation_input(table_name: &str, schema: &[ColumnInfo], prompt: &str) -> String {
    format!(
        "Here is the full table information:\n\n\
         Table Name:\n<table_name>\n{table_name}\n</table_name>\n\n\
         Table Schema:\n<table_schema>\n{schema}\n</table_schema>\n\n\
         Natural Language Prompt:\n<prompt>\n{prompt}\n</prompt>\n\n\
         You must only output the **single** resulting SQL query, nothing else\n",
        table_name = table_name,
        schema = render_schema(schema),
        prompt = prompt,
    )
}

/// One column per line, or a marker when the table has no known columns.
pub fn render_schema(schema: &[ColumnInfo]) -> String {
    if schema.is_empty() {
        return "(no columns found)".to_string();
    }
    schema
        .iter()
        .map(ColumnInfo::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// User message for the judge. The original request is included only when
/// it is non-empty.
pub fn judge_user_prompt(generated_query: &str, ground_truth_query: &str, prompt: &str) -> String {
    let mut message = format!(
        "Evaluate this SQL query generation:\n\n\
         GROUND TRUTH QUERY:\n```sql\n{}\n```\n\n\
         GENERATED QUERY:\n```sql\n{}\n```\n",
        ground_truth_query, generated_query
    );

    if !prompt.is_empty() {
        message.push_str(&format!("\nORIGINAL REQUEST:\n{}\n", prompt));
    }

    message.push_str("\nPlease provide your evaluation following the specified format.");
    message
}

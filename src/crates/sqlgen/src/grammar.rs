//! The SQL grammar handed to the model for constrained decoding.
//!
//! The grammar is Lark syntax and is only ever forwarded to the provider;
//! nothing in this crate parses SQL with it. It admits exactly one statement
//! of the shape
//!
//! ```text
//! SELECT <col>(, <col>)* FROM <table>
//! WHERE total_amount > <n> AND order_date > '<yyyy-mm-dd>'
//! ORDER BY order_date DESC LIMIT <n>;
//! ```

use llm::GrammarTool;

/// Name of the custom tool carrying the grammar.
pub const SQL_TOOL_NAME: &str = "sql_grammar";

/// Instructions attached to the grammar tool.
pub const SQL_TOOL_DESCRIPTION: &str = "Executes read-only SQL queries. \
YOU MUST REASON HEAVILY ABOUT THE QUERY AND MAKE SURE IT OBEYS THE GRAMMAR. \
ONLY OUTPUT THE RESULTING SQL QUERY, NOTHING ELSE.";

/// Lark grammar for filtered, date-ordered order queries.
pub const ORDERS_SQL_GRAMMAR: &str = r#"// ---------- Punctuation & operators ----------
SP: " "
COMMA: ","
GT: ">"
EQ: "="
SEMI: ";"

// ---------- Start ----------
start: "SELECT" SP select_list SP "FROM" SP table SP "WHERE" SP amount_filter SP "AND" SP date_filter SP "ORDER" SP "BY" SP sort_cols SP "LIMIT" SP NUMBER SEMI

// ---------- Projections ----------
select_list: column (COMMA SP column)*
column: IDENTIFIER

// ---------- Tables ----------
table: IDENTIFIER

// ---------- Filters ----------
amount_filter: "total_amount" SP GT SP NUMBER
date_filter: "order_date" SP GT SP DATE

// ---------- Sorting ----------
sort_cols: "order_date" SP "DESC"

// ---------- Terminals ----------
IDENTIFIER: /[A-Za-z_][A-Za-z0-9_]*/
NUMBER: /[0-9]+/
DATE: /'[0-9]{4}-[0-9]{2}-[0-9]{2}'/
"#;

/// The grammar packaged as a custom tool.
pub fn sql_grammar_tool() -> GrammarTool {
    GrammarTool::lark(SQL_TOOL_NAME, SQL_TOOL_DESCRIPTION, ORDERS_SQL_GRAMMAR)
}

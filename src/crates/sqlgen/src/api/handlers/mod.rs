//! HTTP request handlers for the API endpoints

pub mod execute;
pub mod generate;
pub mod health;
pub mod judge;

pub use execute::execute_sql;
pub use generate::generate_sql;
pub use health::{health, health_detailed};
pub use judge::{judge_batch, judge_query};

//! ClickHouse access for sqlgen.
//!
//! Talks to ClickHouse through its HTTP interface: statements go in the POST
//! body, results come back as `JSONCompact`, and table names for schema
//! lookups are bound as server-side query parameters.
//!
//! Two traits form the seam used by the service layer:
//! - [`QueryExecutor`] runs a statement
//! - [`SchemaSource`] lists the columns of a table
//!
//! [`ClickHouseClient`] implements both.

pub mod client;
pub mod config;
pub mod error;
pub mod result;
pub mod schema;

pub use client::{ClickHouseClient, QueryExecutor, SchemaSource};
pub use config::{infer_secure, normalize_host, ConnectionConfig};
pub use error::{Result, WarehouseError};
pub use result::{ColumnMeta, QueryResult, QueryStatistics};
pub use schema::ColumnInfo;

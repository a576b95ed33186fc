//! API middleware layer
//!
//! CORS, request logging, timeouts and request validation helpers.

pub mod cors;
pub mod logging;
pub mod timeout;
pub mod validation;

pub use cors::cors_layer;
pub use logging::logging_layer;
pub use timeout::handle_timeout_error;
pub use validation::{validate_not_blank, validate_table_name};

//! HTTP handlers for the advisor service.

pub mod analyze;
pub mod health;
pub mod search;

pub use analyze::analyze;
pub use health::{health_check, not_found, test_endpoint};
pub use search::search;

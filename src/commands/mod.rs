//! CLI command implementations.
//!
//! - **analyze**: turn an incident CSV export into a report
//! - **init**: write a default `.incident-trends.toml`

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;

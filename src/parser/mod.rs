//! Placeholder parsing for domain templates

pub mod config;
mod extract;
mod field;

pub use config::ParserConfig;
pub use extract::{extract_fields, extract_fields_with_config, extract_fields_with_diagnostics};
pub use field::PlaceholderField;

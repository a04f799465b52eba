//! Dynamic Filter - placeholder templates for filter domains
//!
//! This library extracts `/field/` placeholders from a domain template and
//! substitutes them with values from a record, and expands dynamic filter
//! declarations into one child filter per record.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use dynamic_filter::render;
//!
//! let record = HashMap::from([("name", "Ann"), ("pet", "Cat")]);
//! assert_eq!(render("/name/ likes /pet/", &record), "Ann likes Cat");
//! ```

pub mod error;
pub mod evaluator;
pub mod filter;
pub mod parser;
pub mod slug;

pub use error::{FieldError, FilterError, Span};
pub use evaluator::{Evaluator, FieldValue, Record};
pub use filter::{group_children, ChildFilter, DynamicFilter, FilterGroup, FilterSet, SearchRequest};
pub use parser::{
    extract_fields, extract_fields_with_config, extract_fields_with_diagnostics, ParserConfig,
    PlaceholderField,
};
pub use slug::{slug, slugify};

/// Evaluate a single template against a record with a throwaway evaluator
///
/// Use an [`Evaluator`] directly when the same template is evaluated
/// against many records.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use dynamic_filter::render;
///
/// let record = HashMap::from([("id", 7)]);
/// assert_eq!(render("[('partner_id', '=', /id/)]", &record), "[('partner_id', '=', 7)]");
/// ```
pub fn render(template: &str, record: &dyn Record) -> String {
    Evaluator::new().parse(template, Some(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_render_simple_template() {
        let record = HashMap::from([("name", "Ann")]);
        assert_eq!(render("hello /name/", &record), "hello Ann");
    }

    #[test]
    fn test_render_without_placeholders() {
        let record = HashMap::from([("name", "Ann")]);
        assert_eq!(render("[('active', '=', True)]", &record), "[('active', '=', True)]");
    }

    #[test]
    fn test_render_empty_template() {
        let record = HashMap::from([("name", "Ann")]);
        assert_eq!(render("", &record), "");
    }
}

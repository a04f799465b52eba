//! Domain template evaluation
//!
//! The [`Evaluator`] keeps the last template it saw together with its
//! extracted placeholders, so evaluating one template against many records
//! only scans the template once.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use dynamic_filter::Evaluator;
//!
//! let mut evaluator = Evaluator::new();
//! let record = HashMap::from([("id", "7")]);
//!
//! let domain = evaluator.parse("[('partner_id', '=', /id/)]", Some(&record));
//! assert_eq!(domain, "[('partner_id', '=', 7)]");
//! ```

mod record;

pub use record::{FieldValue, Record};

use tracing::{debug, trace};

use crate::parser::{extract_fields_with_config, ParserConfig, PlaceholderField};

/// Substitutes placeholders in a domain template with record values
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: ParserConfig,
    current_template: String,
    fields: Vec<PlaceholderField>,
    revision: u64,
}

impl Evaluator {
    /// Create an evaluator with the default marker and separator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with a custom parser configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Marker and separator used for extraction and substitution
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The template the cached fields were extracted from
    pub fn template(&self) -> &str {
        &self.current_template
    }

    /// Fields extracted from [`Evaluator::template`], in document order
    pub fn fields(&self) -> &[PlaceholderField] {
        &self.fields
    }

    /// Number of times fields have been extracted by this evaluator
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Evaluate `template` against `record`
    ///
    /// An empty template yields an empty string and leaves the cache alone.
    /// Without a record (or with an empty one) the template comes back as is.
    /// Otherwise each field whose name is a key of the record replaces the
    /// first remaining `/name/` in the output. Unknown names stay literal.
    pub fn parse(&mut self, template: &str, record: Option<&dyn Record>) -> String {
        if template.is_empty() {
            return String::new();
        }

        if self.current_template != template {
            self.current_template = template.to_string();
            self.fields = extract_fields_with_config(&self.current_template, &self.config);
            self.revision += 1;
            debug!(
                fields = self.fields.len(),
                revision = self.revision,
                "extracted template fields"
            );
        }

        match record {
            Some(record) if !record.is_empty() => self.substitute(record),
            _ => self.current_template.clone(),
        }
    }

    fn substitute(&self, record: &dyn Record) -> String {
        let mut result = self.current_template.clone();
        for field in &self.fields {
            let Some(value) = record.value_text(field.name()) else {
                continue;
            };
            let pattern = self.config.search_pattern(field.name());
            if let Some(pos) = result.find(&pattern) {
                trace!(field = field.name(), value = %value, "substituting field");
                result.replace_range(pos..pos + pattern.len(), &value);
            }
        }
        result
    }
}

//! Placeholder fields found inside a domain template

use crate::error::{FieldError, Span};
use crate::slug::slug;

use super::config::ParserConfig;

/// A placeholder occurrence inside a template
///
/// `start` and `end` are the byte offsets of the opening and closing markers.
/// `name` is the slug of the text between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderField {
    start: usize,
    end: usize,
    name: String,
}

impl PlaceholderField {
    /// Build a field from two marker positions in `template`
    ///
    /// The positions may be given in either order. Fails when the enclosed
    /// text does not normalize to a usable name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_filter::PlaceholderField;
    ///
    /// let field = PlaceholderField::new(11, 0, "/Partner Id/").unwrap();
    /// assert_eq!(field.start(), 0);
    /// assert_eq!(field.name(), "partner_id");
    /// ```
    pub fn new(start: usize, end: usize, template: &str) -> Result<Self, FieldError> {
        Self::with_config(start, end, template, &ParserConfig::default())
    }

    /// Build a field using a custom parser configuration
    pub fn with_config(
        start: usize,
        end: usize,
        template: &str,
        config: &ParserConfig,
    ) -> Result<Self, FieldError> {
        let (start, end) = if start > end { (end, start) } else { (start, end) };

        let raw = start
            .checked_add(config.marker.len_utf8())
            .and_then(|inner_start| template.get(inner_start..end))
            .unwrap_or("");
        let name = slug(raw, config.separator);

        if name.is_empty() || name.chars().eq(std::iter::once(config.separator)) {
            return Err(FieldError::invalid_name(start..end, name));
        }

        Ok(Self { start, end, name })
    }

    /// Offset of the opening marker
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset of the closing marker
    pub fn end(&self) -> usize {
        self.end
    }

    /// Normalized field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Span from the opening marker up to the closing marker
    pub fn span(&self) -> Span {
        self.start..self.end
    }
}

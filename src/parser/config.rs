//! Configuration for placeholder extraction

/// Configuration options for placeholder extraction and substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Character that opens and closes a placeholder
    pub marker: char,

    /// Separator used when slugifying placeholder names
    pub separator: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            marker: '/',
            separator: '_',
        }
    }
}

impl ParserConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder marker
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    /// Set the slug separator for field names
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Literal text a field named `name` occupies in a template
    pub fn search_pattern(&self, name: &str) -> String {
        let mut pattern = String::with_capacity(name.len() + 2 * self.marker.len_utf8());
        pattern.push(self.marker);
        pattern.push_str(name);
        pattern.push(self.marker);
        pattern
    }
}

//! Error types for placeholder extraction and filter loading

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in a template string
pub type Span = std::ops::Range<usize>;

/// Errors raised while building a placeholder field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Detected field name is invalid at {span:?}: {name:?}")]
    InvalidFieldName { span: Span, name: String },
}

impl FieldError {
    /// Create an invalid field name error
    pub fn invalid_name(span: Span, name: impl Into<String>) -> Self {
        Self::InvalidFieldName {
            span,
            name: name.into(),
        }
    }

    /// Span of the offending placeholder, markers included
    pub fn span(&self) -> &Span {
        match self {
            Self::InvalidFieldName { span, .. } => span,
        }
    }

    /// Format the error with template context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            FieldError::InvalidFieldName { span, name } => {
                let detail = if name.is_empty() {
                    "placeholder has no usable characters".to_string()
                } else {
                    format!("placeholder normalizes to {:?}", name)
                };

                // ariadne expects a span that covers at least one character
                let end = span.end.saturating_add(1).min(source.len()).max(span.start);
                let label_span = span.start..end;

                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message("invalid field name")
                    .with_label(
                        Label::new((filename, label_span))
                            .with_message(detail)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Errors that can occur when loading filter definitions or records
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse filter TOML: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Failed to parse records JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("records for filter '{filter}' must be an array of objects")]
    InvalidRecords { filter: String },
}

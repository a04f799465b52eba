//! Placeholder extraction
//!
//! Scans a template for `/name/` spans, left to right. Each pair of
//! consecutive markers yields one candidate. Candidates that normalize to an
//! unusable name are logged and skipped without stopping the scan.

use tracing::warn;

use crate::error::FieldError;

use super::config::ParserConfig;
use super::field::PlaceholderField;

/// Extract every placeholder field from `template`
///
/// # Example
///
/// ```rust
/// use dynamic_filter::extract_fields;
///
/// let fields = extract_fields("/name/ is /age/");
/// let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["name", "age"]);
/// ```
pub fn extract_fields(template: &str) -> Vec<PlaceholderField> {
    extract_fields_with_config(template, &ParserConfig::default())
}

/// Extract placeholder fields using a custom parser configuration
pub fn extract_fields_with_config(template: &str, config: &ParserConfig) -> Vec<PlaceholderField> {
    let (fields, errors) = extract_fields_with_diagnostics(template, config);
    for err in &errors {
        warn!(error = %err, "skipping placeholder while extracting fields");
    }
    fields
}

/// Extract placeholder fields, returning the rejected occurrences alongside
pub fn extract_fields_with_diagnostics(
    template: &str,
    config: &ParserConfig,
) -> (Vec<PlaceholderField>, Vec<FieldError>) {
    let marker = config.marker;
    let marker_len = marker.len_utf8();

    let mut fields = Vec::new();
    let mut errors = Vec::new();

    let mut start = template.find(marker);
    while let Some(open) = start {
        // A marker in last position cannot open a placeholder
        if open + marker_len >= template.len() {
            break;
        }

        let Some(close) = find_from(template, marker, open + marker_len) else {
            break;
        };

        match PlaceholderField::with_config(open, close, template, config) {
            Ok(field) => fields.push(field),
            Err(err) => errors.push(err),
        }

        start = find_from(template, marker, close + marker_len);
    }

    (fields, errors)
}

/// Find `marker` in `text` at or after byte offset `from`
fn find_from(text: &str, marker: char, from: usize) -> Option<usize> {
    text.get(from..)?.find(marker).map(|i| from + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(fields: &[PlaceholderField]) -> Vec<&str> {
        fields.iter().map(|f| f.name()).collect()
    }

    #[test]
    fn test_extract_two_fields() {
        let fields = extract_fields("/name/ is /age/");
        assert_eq!(names(&fields), ["name", "age"]);
        assert_eq!((fields[0].start(), fields[0].end()), (0, 5));
        assert_eq!((fields[1].start(), fields[1].end()), (10, 14));
    }

    #[test]
    fn test_extract_no_marker() {
        assert!(extract_fields("[('state', '=', 'done')]").is_empty());
        assert!(extract_fields("").is_empty());
    }

    #[test]
    fn test_extract_marker_in_last_position() {
        assert!(extract_fields("partner/").is_empty());
        assert!(extract_fields("/").is_empty());
    }

    #[test]
    fn test_extract_drops_unterminated_placeholder() {
        let fields = extract_fields("/a/ and /b");
        assert_eq!(names(&fields), ["a"]);
    }

    #[test]
    fn test_extract_empty_name_is_skipped() {
        assert!(extract_fields("/ /").is_empty());
    }

    #[test]
    fn test_extract_continues_after_invalid_placeholder() {
        let fields = extract_fields("/?/ then /id/");
        assert_eq!(names(&fields), ["id"]);
        assert_eq!(fields[0].start(), 9);
    }

    #[test]
    fn test_extract_keeps_duplicates() {
        let fields = extract_fields("/x/ and /x/");
        assert_eq!(names(&fields), ["x", "x"]);
        assert_eq!(fields[1].span(), 8..10);
    }

    #[test]
    fn test_extract_consumes_markers_pairwise() {
        // The closing marker of one field never opens the next
        let fields = extract_fields("/a//b/");
        assert_eq!(names(&fields), ["a", "b"]);
    }

    #[test]
    fn test_extract_in_domain_expression() {
        let template = "[('partner_id', '=', /id/), ('user_id.name', 'ilike', '/User Name/')]";
        let fields = extract_fields(template);
        assert_eq!(names(&fields), ["id", "user_name"]);
    }

    #[test]
    fn test_extract_with_diagnostics_reports_rejects() {
        let (fields, errors) = extract_fields_with_diagnostics("/ / /ok/ /!/", &ParserConfig::default());
        assert_eq!(names(&fields), ["ok"]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].span(), &(0..2));
        assert_eq!(errors[1].span(), &(9..11));
    }

    #[test]
    fn test_extract_with_custom_marker() {
        let config = ParserConfig::new().with_marker('%');
        let fields = extract_fields_with_config("%a% / %b%", &config);
        assert_eq!(names(&fields), ["a", "b"]);
    }

    #[test]
    fn test_extract_after_multibyte_text() {
        let fields = extract_fields("café = /name/");
        assert_eq!(names(&fields), ["name"]);
        assert_eq!(fields[0].start(), 8);
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_extract_logs_skipped_placeholder() {
        let fields = extract_fields("/ / /ok/");
        assert_eq!(names(&fields), ["ok"]);
        assert!(logs_contain("skipping placeholder"));
    }
}

//! Slug generation for field names and filter identifiers
//!
//! Turns arbitrary text into a lowercase identifier made only of ASCII word
//! characters joined by a single separator.

/// Separator used by [`slugify`]
pub const DEFAULT_SEPARATOR: char = '-';

/// Slugify `text` using [`DEFAULT_SEPARATOR`]
pub fn slugify(text: &str) -> String {
    slug(text, DEFAULT_SEPARATOR)
}

/// Convert `text` into a slug joined by `separator`
///
/// The text is lowercased, whitespace runs become the separator, accented
/// Latin letters are folded to ASCII (`&` becomes the separator), and every
/// other character outside `[a-z0-9_-]` is dropped. Finally, runs of
/// whitespace, `_`, `-` or the separator collapse into one separator and
/// separators are trimmed from both ends.
///
/// # Example
///
/// ```rust
/// use dynamic_filter::slug;
///
/// assert_eq!(slug("Café de Paris", '-'), "cafe-de-paris");
/// assert_eq!(slug("  Partner Name ", '_'), "partner_name");
/// ```
pub fn slug(text: &str, separator: char) -> String {
    let lowered = text.to_lowercase();

    let mut kept = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                kept.push(separator);
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        let c = match transliterate(c) {
            Some('&') => separator,
            Some(folded) => folded,
            None => c,
        };
        if is_word_char(c) || c == '-' || c == separator {
            kept.push(c);
        }
    }

    collapse_separators(&kept, separator)
}

/// Fold an accented letter (or `&`) to its plain ASCII counterpart
fn transliterate(c: char) -> Option<char> {
    let folded = match c {
        'à' | 'á' | 'ä' | 'â' | 'æ' => 'a',
        'è' | 'é' | 'ë' | 'ê' => 'e',
        'ì' | 'í' | 'ï' | 'î' => 'i',
        'ò' | 'ó' | 'ö' | 'ô' | 'œ' => 'o',
        'ù' | 'ú' | 'ü' | 'û' | 'ǘ' => 'u',
        'ñ' | 'ń' | 'ǹ' => 'n',
        'ç' => 'c',
        'ß' | 'ś' => 's',
        'ÿ' => 'y',
        'ŕ' => 'r',
        'ṕ' => 'p',
        'ẃ' => 'w',
        'ǵ' => 'g',
        'ḿ' => 'm',
        'ẍ' => 'x',
        'ź' => 'z',
        'ḧ' => 'h',
        '&' => '&',
        _ => return None,
    };
    Some(folded)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Collapse joiner runs into one separator and trim them from both ends
fn collapse_separators(text: &str, separator: char) -> String {
    let is_joiner = |c: char| c.is_whitespace() || c == '_' || c == '-' || c == separator;

    let mut out = String::with_capacity(text.len());
    let mut pending = false;
    for c in text.chars() {
        if is_joiner(c) {
            pending = true;
            continue;
        }
        if pending && !out.is_empty() {
            out.push(separator);
        }
        pending = false;
        out.push(c);
    }
    out
}

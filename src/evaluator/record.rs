//! Record sources for placeholder substitution

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use serde_json::Value;

/// A read-only key/value source that placeholders are resolved against
pub trait Record {
    /// Text to insert for `key`, or `None` when the record has no such key
    fn value_text(&self, key: &str) -> Option<String>;

    /// Whether the record holds no keys at all
    fn is_empty(&self) -> bool;

    /// Like [`Record::value_text`], but blank values (`null`, `false`, `""`)
    /// count as missing
    fn filled_text(&self, key: &str) -> Option<String> {
        self.value_text(key).filter(|s| !s.is_empty())
    }
}

/// A value that can be inserted into a template
pub trait FieldValue {
    fn to_text(&self) -> String;

    /// Whether the value stands for "no value" in a record
    fn is_blank(&self) -> bool {
        false
    }
}

impl FieldValue for str {
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for String {
    fn to_text(&self) -> String {
        self.clone()
    }

    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn to_text(&self) -> String {
        (**self).to_text()
    }

    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

macro_rules! display_field_value {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn to_text(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_field_value!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// JSON values render the way record values are shown in a domain:
/// strings without quotes, `null` as `null`, and arrays as their
/// comma-joined elements (a many2one `[7, "Azure"]` becomes `7,Azure`).
impl FieldValue for Value {
    fn to_text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => other.to_text(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => self.to_string(),
        }
    }

    /// Empty fields come back from a record search as `false`
    fn is_blank(&self) -> bool {
        match self {
            Value::Null | Value::Bool(false) => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn value_text(&self, key: &str) -> Option<String> {
        (**self).value_text(key)
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn filled_text(&self, key: &str) -> Option<String> {
        (**self).filled_text(key)
    }
}

impl<K, V, S> Record for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: FieldValue,
    S: BuildHasher,
{
    fn value_text(&self, key: &str) -> Option<String> {
        self.get(key).map(FieldValue::to_text)
    }

    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }

    fn filled_text(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|v| !v.is_blank())
            .map(FieldValue::to_text)
    }
}

impl<K, V> Record for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: FieldValue,
{
    fn value_text(&self, key: &str) -> Option<String> {
        self.get(key).map(FieldValue::to_text)
    }

    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }

    fn filled_text(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|v| !v.is_blank())
            .map(FieldValue::to_text)
    }
}

impl Record for serde_json::Map<String, Value> {
    fn value_text(&self, key: &str) -> Option<String> {
        self.get(key).map(FieldValue::to_text)
    }

    fn is_empty(&self) -> bool {
        serde_json::Map::is_empty(self)
    }

    fn filled_text(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|v| !v.is_blank())
            .map(FieldValue::to_text)
    }
}

//! Dynamic filter definitions loaded from TOML

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Value of the `type` attribute that marks a filter as dynamic
pub const DYNAMIC_TYPE: &str = "dynamic";

/// A filter declaration, possibly dynamic
///
/// A dynamic filter fetches records from `model` and turns each one into a
/// child filter whose domain is `format_domain` evaluated against the record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DynamicFilter {
    pub name: Option<String>,
    pub string: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub model: Option<String>,
    /// Domain selecting the records to fetch
    pub domain: Option<String>,
    pub context: Option<String>,
    /// Domain template evaluated for each fetched record
    pub format_domain: Option<String>,
    /// Record field used as the child filter label
    pub name_field: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub fields: Option<FieldList>,
    pub order_by: Option<String>,
}

/// Record fields to fetch, as a comma separated string or a list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldList {
    Csv(String),
    List(Vec<String>),
}

impl FieldList {
    /// Field names with surrounding whitespace and empty entries removed
    pub fn names(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            FieldList::Csv(csv) => csv.split(',').collect(),
            FieldList::List(list) => list.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Description of the record query a dynamic filter needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub model: String,
    pub method: String,
    pub domain: String,
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(rename = "orderBy", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

impl DynamicFilter {
    /// Whether this filter expands into per-record child filters
    pub fn is_dynamic(&self) -> bool {
        self.kind.as_deref() == Some(DYNAMIC_TYPE)
    }

    /// Label shown for the group of child filters
    ///
    /// `index` is the position of this filter among the dynamic filters and
    /// only matters when the filter has neither a string nor a name.
    pub fn parent_name(&self, index: usize) -> String {
        non_empty(&self.string)
            .or_else(|| non_empty(&self.name))
            .map(str::to_string)
            .unwrap_or_else(|| fallback_name(index))
    }

    /// Build the `search_read` request that fetches this filter's records
    ///
    /// `default_model` is used when the filter does not name a model.
    pub fn search_request(&self, default_model: &str) -> SearchRequest {
        SearchRequest {
            model: non_empty(&self.model).unwrap_or(default_model).to_string(),
            method: "search_read".to_string(),
            domain: non_empty(&self.domain).unwrap_or("[]").to_string(),
            context: non_empty(&self.context).unwrap_or("{}").to_string(),
            limit: self.limit.filter(|&n| n > 0),
            offset: self.offset.filter(|&n| n > 0),
            fields: self.fields.as_ref().map(FieldList::names),
            order_by: non_empty(&self.order_by)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

/// A set of filter declarations, as found in a search view
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterSet {
    /// Model used by filters that do not name one
    pub model: Option<String>,
    #[serde(default)]
    pub filters: Vec<DynamicFilter>,
}

impl FilterSet {
    /// Load a filter set from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, FilterError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a filter set from a TOML string
    pub fn from_str(content: &str) -> Result<Self, FilterError> {
        Ok(toml::from_str(content)?)
    }

    /// Dynamic filters in declaration order
    pub fn dynamic_filters(&self) -> impl Iterator<Item = &DynamicFilter> {
        self.filters.iter().filter(|f| f.is_dynamic())
    }

    /// Filters that are used as they are
    pub fn static_filters(&self) -> impl Iterator<Item = &DynamicFilter> {
        self.filters.iter().filter(|f| !f.is_dynamic())
    }

    /// Search requests for every dynamic filter, in declaration order
    pub fn search_requests(&self) -> Vec<SearchRequest> {
        let default_model = self.model.as_deref().unwrap_or_default();
        self.dynamic_filters()
            .map(|f| f.search_request(default_model))
            .collect()
    }
}

pub(crate) fn fallback_name(index: usize) -> String {
    format!("Parent Name {}", index)
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

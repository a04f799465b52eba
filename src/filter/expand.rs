//! Expansion of dynamic filters into per-record child filters

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FilterError;
use crate::evaluator::{Evaluator, Record};
use crate::slug::slug;

use super::definition::{fallback_name, non_empty, DynamicFilter, FilterSet, DYNAMIC_TYPE};

/// Prefix of every child filter identifier
pub const CHILD_PREFIX: &str = "o_dynamic_filter_";

/// A concrete filter generated from one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildFilter {
    pub name: String,
    pub string: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub parent_name: String,
    /// Identifier shared by all children of one dynamic filter
    pub element_class: String,
}

/// Consecutive child filters that belong to the same dynamic filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterGroup {
    pub parent_name: String,
    pub element_class: String,
    pub filters: Vec<ChildFilter>,
}

impl DynamicFilter {
    /// Identifier shared by the children of this filter
    pub fn element_class(&self, index: usize) -> String {
        let base = non_empty(&self.name)
            .or_else(|| non_empty(&self.string))
            .map(str::to_string)
            .unwrap_or_else(|| fallback_name(index));
        format!("{}{}", CHILD_PREFIX, slug(&base, '_'))
    }

    /// Turn each fetched record into a child filter
    ///
    /// The child's domain is `format_domain` evaluated against the record.
    /// Records without an `id` are numbered by their position instead.
    pub fn expand<R: Record>(
        &self,
        index: usize,
        records: &[R],
        evaluator: &mut Evaluator,
    ) -> Vec<ChildFilter> {
        let element_class = self.element_class(index);
        let parent_name = self.parent_name(index);
        let format_domain = self.format_domain.as_deref().unwrap_or_default();

        records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let id = record
                    .value_text("id")
                    .unwrap_or_else(|| position.to_string());
                ChildFilter {
                    name: format!("{}_{}", element_class, id),
                    string: self.child_string(record),
                    domain: evaluator.parse(format_domain, Some(record)),
                    kind: DYNAMIC_TYPE.to_string(),
                    parent_name: parent_name.clone(),
                    element_class: element_class.clone(),
                }
            })
            .collect()
    }

    /// Label of a child filter: the configured name field, else `name`,
    /// else `display_name`
    fn child_string(&self, record: &dyn Record) -> String {
        if let Some(value) = non_empty(&self.name_field).and_then(|f| record.value_text(f)) {
            return value;
        }
        record
            .filled_text("name")
            .or_else(|| record.filled_text("display_name"))
            .unwrap_or_default()
    }
}

impl FilterSet {
    /// Expand every dynamic filter using the records fetched for it
    ///
    /// `records` maps a filter's name (or string, when unnamed) to the array
    /// of record objects its search returned. Filters with no entry expand
    /// to nothing.
    pub fn expand_all(
        &self,
        records: &serde_json::Map<String, Value>,
    ) -> Result<Vec<ChildFilter>, FilterError> {
        let mut evaluator = Evaluator::new();
        let mut children = Vec::new();

        for (index, filter) in self.dynamic_filters().enumerate() {
            let key = non_empty(&filter.name)
                .or_else(|| non_empty(&filter.string))
                .map(str::to_string)
                .unwrap_or_else(|| fallback_name(index));

            let Some(entry) = records.get(&key) else {
                warn!(filter = %key, "no records supplied for dynamic filter");
                continue;
            };
            let rows = record_rows(&key, entry)?;
            let expanded = filter.expand(index, &rows, &mut evaluator);
            debug!(filter = %key, children = expanded.len(), "expanded dynamic filter");
            children.extend(expanded);
        }

        Ok(children)
    }
}

fn record_rows<'a>(
    filter: &str,
    entry: &'a Value,
) -> Result<Vec<&'a serde_json::Map<String, Value>>, FilterError> {
    let invalid = || FilterError::InvalidRecords {
        filter: filter.to_string(),
    };
    entry
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|row| row.as_object().ok_or_else(invalid))
        .collect()
}

/// Group consecutive children that share a parent
pub fn group_children(children: Vec<ChildFilter>) -> Vec<FilterGroup> {
    let mut groups: Vec<FilterGroup> = Vec::new();
    for child in children {
        match groups.last_mut() {
            Some(group) if group.parent_name == child.parent_name => group.filters.push(child),
            _ => groups.push(FilterGroup {
                parent_name: child.parent_name.clone(),
                element_class: child.element_class.clone(),
                filters: vec![child],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn partner_filter() -> DynamicFilter {
        DynamicFilter {
            name: Some("By Partner".to_string()),
            string: Some("Partners".to_string()),
            kind: Some(DYNAMIC_TYPE.to_string()),
            format_domain: Some("[('partner_id', '=', /id/)]".to_string()),
            ..Default::default()
        }
    }

    fn rows(value: Value) -> Vec<serde_json::Map<String, Value>> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn test_element_class_is_slugged() {
        assert_eq!(partner_filter().element_class(0), "o_dynamic_filter_by_partner");
        assert_eq!(
            DynamicFilter::default().element_class(3),
            "o_dynamic_filter_parent_name_3"
        );
    }

    #[test]
    fn test_expand_records() {
        let records = rows(json!([
            {"id": 7, "name": "Azure Interior"},
            {"id": 9, "name": "", "display_name": "Deco Addict"},
        ]));
        let mut evaluator = Evaluator::new();
        let children = partner_filter().expand(0, &records, &mut evaluator);

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name, "o_dynamic_filter_by_partner_7");
        assert_eq!(children[0].string, "Azure Interior");
        assert_eq!(children[0].domain, "[('partner_id', '=', 7)]");
        assert_eq!(children[0].parent_name, "Partners");
        assert_eq!(children[1].string, "Deco Addict");
        assert_eq!(children[1].domain, "[('partner_id', '=', 9)]");
        assert_eq!(evaluator.revision(), 1);
    }

    #[test]
    fn test_expand_falls_back_on_blank_name() {
        let records = rows(json!([
            {"id": 1, "name": false, "display_name": "Deco"},
            {"id": 2, "name": null, "display_name": "Azure"},
            {"id": 3, "name": false, "display_name": false},
        ]));
        let children = partner_filter().expand(0, &records, &mut Evaluator::new());
        let strings: Vec<&str> = children.iter().map(|c| c.string.as_str()).collect();
        assert_eq!(strings, ["Deco", "Azure", ""]);
    }

    #[test]
    fn test_expand_uses_name_field() {
        let mut filter = partner_filter();
        filter.name_field = Some("ref".to_string());
        let records = rows(json!([{"id": 1, "name": "Azure", "ref": "AZ-1"}, {"id": 2, "name": "Deco"}]));
        let children = filter.expand(0, &records, &mut Evaluator::new());
        assert_eq!(children[0].string, "AZ-1");
        assert_eq!(children[1].string, "Deco");
    }

    #[test]
    fn test_expand_without_id_uses_position() {
        let records = rows(json!([{"name": "a"}, {"name": "b"}]));
        let children = partner_filter().expand(0, &records, &mut Evaluator::new());
        assert_eq!(children[1].name, "o_dynamic_filter_by_partner_1");
        assert_eq!(children[1].domain, "[('partner_id', '=', /id/)]");
    }

    #[test]
    fn test_expand_all_and_group() {
        let set = FilterSet::from_str(
            r#"
[[filters]]
name = "static"

[[filters]]
name = "by_partner"
string = "Partner"
type = "dynamic"
format_domain = "[('partner_id', '=', /id/)]"

[[filters]]
name = "by_stage"
string = "Stage"
type = "dynamic"
format_domain = "[('stage_id', '=', /id/)]"
"#,
        )
        .unwrap();
        let records = json!({
            "by_partner": [{"id": 1, "name": "Azure"}, {"id": 2, "name": "Deco"}],
            "by_stage": [{"id": 5, "name": "New"}],
        });
        let children = set.expand_all(records.as_object().unwrap()).unwrap();
        let domains: Vec<&str> = children.iter().map(|c| c.domain.as_str()).collect();
        assert_eq!(
            domains,
            [
                "[('partner_id', '=', 1)]",
                "[('partner_id', '=', 2)]",
                "[('stage_id', '=', 5)]"
            ]
        );

        let groups = group_children(children);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].parent_name, "Partner");
        assert_eq!(groups[0].filters.len(), 2);
        assert_eq!(groups[1].element_class, "o_dynamic_filter_by_stage");
    }

    #[test]
    fn test_expand_all_rejects_non_array() {
        let set = FilterSet::from_str(
            r#"
[[filters]]
name = "by_partner"
type = "dynamic"
"#,
        )
        .unwrap();
        let records = json!({"by_partner": {"id": 1}});
        let err = set.expand_all(records.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, FilterError::InvalidRecords { .. }));
    }

    #[test]
    fn test_child_filter_json() {
        let records = rows(json!([{"id": 3, "name": "Gemini"}]));
        let children = partner_filter().expand(0, &records, &mut Evaluator::new());
        let json = serde_json::to_string(&children[0]).unwrap();
        insta::assert_snapshot!(json, @r#"{"name":"o_dynamic_filter_by_partner_3","string":"Gemini","domain":"[('partner_id', '=', 3)]","type":"dynamic","parent_name":"Partners","element_class":"o_dynamic_filter_by_partner"}"#);
    }
}

//! Dynamic filters
//!
//! A dynamic filter declares a record query and a domain template. Each
//! record the query returns becomes a child filter whose domain is the
//! template evaluated against that record.

mod definition;
mod expand;

pub use definition::{DynamicFilter, FieldList, FilterSet, SearchRequest, DYNAMIC_TYPE};
pub use expand::{group_children, ChildFilter, FilterGroup, CHILD_PREFIX};

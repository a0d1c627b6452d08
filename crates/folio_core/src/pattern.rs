//! Relation resolution patterns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `component.field` pair naming a field that holds references.
///
/// # Examples
///
/// ```
/// use folio_core::RelationPattern;
///
/// let pattern = RelationPattern::parse("article.author").unwrap();
/// assert_eq!(pattern.component(), "article");
/// assert_eq!(pattern.field(), "author");
/// assert_eq!(pattern.to_string(), "article.author");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_more::Display,
)]
#[display("{}.{}", component, field)]
pub struct RelationPattern {
    component: String,
    field: String,
}

impl RelationPattern {
    /// Build a pattern from its parts.
    pub fn new(component: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            field: field.into(),
        }
    }

    /// Parse `component.field`. Returns `None` without a dot or with an empty side.
    pub fn parse(raw: &str) -> Option<Self> {
        let (component, field) = raw.trim().split_once('.')?;
        if component.is_empty() || field.is_empty() {
            return None;
        }
        Some(Self::new(component, field))
    }

    /// Parse a `resolve_relations` parameter: comma separated string or array of strings.
    ///
    /// ```
    /// use folio_core::RelationPattern;
    /// use serde_json::json;
    ///
    /// let patterns = RelationPattern::parse_list(&json!("page.hero, article.author"));
    /// assert_eq!(patterns.len(), 2);
    /// let patterns = RelationPattern::parse_list(&json!(["page.hero", "broken"]));
    /// assert_eq!(patterns.len(), 1);
    /// ```
    pub fn parse_list(value: &Value) -> Vec<Self> {
        match value {
            Value::String(s) => s.split(',').filter_map(Self::parse).collect(),
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .flat_map(|s| s.split(','))
                .filter_map(Self::parse)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether this pattern targets `field` on a node of type `component`.
    pub fn matches(&self, component: &str, field: &str) -> bool {
        self.component == component && self.field == field
    }
}

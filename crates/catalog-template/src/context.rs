/*
 * context.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Template value and context types.
//!
//! Contexts are insertion-ordered. The renderer walks the context once per
//! pass, so the order in which keys were inserted is the order in which their
//! sections are expanded.

use indexmap::IndexMap;

/// Ordered field map used for contexts and for mapping values.
pub type ValueMap = IndexMap<String, TemplateValue>;

/// A value that can be used in template evaluation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TemplateValue {
    /// A string value. The only kind `{{name}}` substitutes.
    String(String),

    /// A boolean value, consumed by `{{#name}}` and `{{^name}}` sections.
    Bool(bool),

    /// A list of values, consumed by repeated `{{#name}}` sections.
    List(Vec<TemplateValue>),

    /// A map of string keys to values.
    ///
    /// As a list item, a map is the item-local context for its rendering of
    /// the item template. At the top level, maps are only reachable through
    /// dotted paths (see [`TemplateContext::get_path`]).
    Map(ValueMap),

    /// A null/missing value. Ignored by every pass.
    #[default]
    Null,
}

impl TemplateValue {
    /// The string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TemplateValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get a nested field by path.
    ///
    /// For example, `get_path(&["compatibility", "performance_impact"])` on a
    /// Map containing `{"compatibility": {"performance_impact": "low"}}`
    /// returns the `"low"` value.
    pub fn get_path(&self, path: &[&str]) -> Option<&TemplateValue> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };

        match self {
            TemplateValue::Map(m) => m.get(*first).and_then(|v| v.get_path(rest)),
            _ => None,
        }
    }

    /// Text used when this value is a scalar list item (`{{.}}`).
    ///
    /// - String: returned as-is
    /// - Bool: "true" or "false"
    /// - List: concatenation of the item texts
    /// - Map, Null: ""
    pub fn item_text(&self) -> String {
        match self {
            TemplateValue::String(s) => s.clone(),
            TemplateValue::Bool(b) => b.to_string(),
            TemplateValue::List(items) => items.iter().map(|v| v.item_text()).collect(),
            TemplateValue::Map(_) | TemplateValue::Null => String::new(),
        }
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::String(value)
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::String(value.to_string())
    }
}

impl From<bool> for TemplateValue {
    fn from(value: bool) -> Self {
        TemplateValue::Bool(value)
    }
}

impl From<ValueMap> for TemplateValue {
    fn from(value: ValueMap) -> Self {
        TemplateValue::Map(value)
    }
}

impl<T: Into<TemplateValue>> From<Vec<T>> for TemplateValue {
    fn from(items: Vec<T>) -> Self {
        TemplateValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Conversion from parsed JSON metadata.
///
/// Numbers become their decimal text so that fields like
/// `min_screen_width: 320` can still be interpolated.
impl From<serde_json::Value> for TemplateValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TemplateValue::Null,
            serde_json::Value::Bool(b) => TemplateValue::Bool(b),
            serde_json::Value::Number(n) => TemplateValue::String(n.to_string()),
            serde_json::Value::String(s) => TemplateValue::String(s),
            serde_json::Value::Array(items) => {
                TemplateValue::List(items.into_iter().map(TemplateValue::from).collect())
            }
            serde_json::Value::Object(entries) => TemplateValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, TemplateValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// A context for template evaluation containing variable bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    variables: ValueMap,
}

impl TemplateContext {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    ///
    /// Re-inserting an existing key replaces its value but keeps its
    /// original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TemplateValue>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Get a variable from the context.
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.variables.get(key)
    }

    /// Whether a variable is bound at the top level.
    pub fn contains_key(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// Get a variable by dotted path (e.g., "compatibility.performance_impact").
    ///
    /// A top-level key spelled exactly like the path wins over a walk through
    /// nested maps.
    pub fn get_path(&self, path: &str) -> Option<&TemplateValue> {
        if let Some(value) = self.variables.get(path) {
            return Some(value);
        }

        let segments: Vec<&str> = path.split('.').collect();
        let (first, rest) = segments.split_first()?;
        self.variables.get(*first).and_then(|v| v.get_path(rest))
    }

    /// The underlying ordered map.
    pub fn variables(&self) -> &ValueMap {
        &self.variables
    }
}

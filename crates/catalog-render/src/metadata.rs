/*
 * metadata.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Per-project metadata (`project.json`).
//!
//! Hand-edited metadata is read leniently: a field that is `null` or has the
//! wrong shape falls back to its default instead of failing the project.
//! Only a file that is not JSON at all is an error.

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Minimum screen width assumed when a project does not declare one.
pub const DEFAULT_MIN_SCREEN_WIDTH: u32 = 320;

/// Performance impact assumed when a project does not declare one.
pub const DEFAULT_PERFORMANCE_IMPACT: &str = "medium";

/// Parsed `project.json`.
///
/// Every field is optional in the file. Fields this struct does not name are
/// kept in [`ProjectMeta::extra`] in file order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectMeta {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub last_updated: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub tags: Vec<String>,
    /// `None` when the file has no feature list, so the site default applies.
    #[serde(deserialize_with = "lenient")]
    pub features: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub dependencies: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub changelog: Vec<ChangelogEntry>,
    #[serde(deserialize_with = "lenient")]
    pub compatibility: Compatibility,
    #[serde(deserialize_with = "lenient")]
    pub author: Author,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChangelogEntry {
    #[serde(deserialize_with = "lenient")]
    pub version: String,
    #[serde(deserialize_with = "lenient")]
    pub date: String,
    #[serde(deserialize_with = "lenient")]
    pub changes: Vec<String>,
}

/// Device support and cost of running the demo.
///
/// Unset fields read through the accessors, which apply the catalog
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Compatibility {
    #[serde(deserialize_with = "lenient")]
    pub mobile: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub desktop: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub min_screen_width: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub performance_impact: Option<String>,
}

impl Compatibility {
    pub fn mobile(&self) -> bool {
        self.mobile.unwrap_or(true)
    }

    pub fn desktop(&self) -> bool {
        self.desktop.unwrap_or(true)
    }

    pub fn min_screen_width(&self) -> u32 {
        self.min_screen_width.unwrap_or(DEFAULT_MIN_SCREEN_WIDTH)
    }

    pub fn performance_impact(&self) -> &str {
        self.performance_impact
            .as_deref()
            .unwrap_or(DEFAULT_PERFORMANCE_IMPACT)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
}

impl ProjectMeta {
    /// Load and parse a `project.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project metadata: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid project metadata: {}", path.display()))
    }
}

/// Deserialize a field without failing the document.
///
/// `null` reads as the default. Numbers are accepted where text is expected
/// (`"version": 2` reads as `"2"`) and `null` list items are dropped. Any
/// other mismatch falls back to the default.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    if let Ok(parsed) = T::deserialize(&value) {
        return Ok(parsed);
    }

    match T::deserialize(&coerce_text(value)) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            tracing::warn!("Ignoring malformed metadata value: {}", err);
            Ok(T::default())
        }
    }
}

fn coerce_text(value: Value) -> Value {
    match value {
        Value::Number(n) => Value::String(n.to_string()),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|item| !item.is_null())
                .map(coerce_text)
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ProjectMeta {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_full_metadata() {
        let meta = parse(
            r#"{
                "title": "Wooden Fish",
                "description": "Tap for merit",
                "tags": ["audio"],
                "status": "stable",
                "category": "music",
                "order": 3,
                "version": "1.1.0",
                "changelog": [
                    {"version": "1.1.0", "date": "2025-02-01", "changes": ["Combo counter"]}
                ],
                "compatibility": {"mobile": true, "desktop": false, "performance_impact": "low"},
                "author": {"name": "Ada", "contributors": ["Grace"]}
            }"#,
        );

        assert_eq!(meta.title.as_deref(), Some("Wooden Fish"));
        assert_eq!(meta.changelog[0].changes, vec!["Combo counter"]);
        assert!(!meta.compatibility.desktop());
        // Unspecified compatibility fields keep their defaults
        assert_eq!(meta.compatibility.min_screen_width(), 320);
        assert_eq!(meta.author.name.as_deref(), Some("Ada"));

        let extra: Vec<&str> = meta.extra.keys().map(String::as_str).collect();
        assert_eq!(extra, vec!["category", "order"]);
    }

    #[test]
    fn test_empty_metadata() {
        let meta = parse("{}");
        assert_eq!(meta, ProjectMeta::default());
        assert_eq!(meta.features, None);
        assert!(meta.compatibility.mobile());
        assert_eq!(meta.compatibility.performance_impact(), "medium");
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let meta = parse(
            r#"{
                "title": "Ink",
                "description": null,
                "tags": null,
                "compatibility": {"mobile": null, "min_screen_width": null},
                "author": null
            }"#,
        );

        assert_eq!(meta.title.as_deref(), Some("Ink"));
        assert_eq!(meta.description, None);
        assert!(meta.tags.is_empty());
        assert!(meta.compatibility.mobile());
        assert_eq!(meta.compatibility.min_screen_width(), 320);
        assert_eq!(meta.author, Author::default());
    }

    #[test]
    fn test_numbers_read_as_text() {
        let meta = parse(
            r#"{
                "version": 2,
                "tags": ["webgl", 3, null],
                "changelog": [{"version": 1.5, "date": "2025-01-01", "changes": []}]
            }"#,
        );

        assert_eq!(meta.version.as_deref(), Some("2"));
        assert_eq!(meta.tags, vec!["webgl", "3"]);
        assert_eq!(meta.changelog[0].version, "1.5");
    }

    #[test]
    fn test_mistyped_fields_fall_back() {
        let meta = parse(
            r#"{
                "title": ["not", "text"],
                "features": "one feature",
                "compatibility": "everywhere",
                "changelog": {"1.0.0": "first"}
            }"#,
        );

        assert_eq!(meta.title, None);
        assert_eq!(meta.features, None);
        assert_eq!(meta.compatibility, Compatibility::default());
        assert!(meta.changelog.is_empty());
    }

    #[test]
    fn test_load_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("project.json");
        std::fs::write(&path, "{ broken").unwrap();

        let err = ProjectMeta::load(&path).unwrap_err();
        assert!(err.to_string().contains("project.json"));
    }
}

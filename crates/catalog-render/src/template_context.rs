/*
 * template_context.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Template context building.
//!
//! This module turns a project's metadata into the context its pages are
//! rendered with. Defaults for missing fields come from [`SiteConfig`] and
//! from the date of the run.

use catalog_template::{TemplateContext, TemplateValue, ValueMap};
use chrono::NaiveDate;

use crate::config::SiteConfig;
use crate::discover::ProjectEntry;
use crate::metadata::{ChangelogEntry, Compatibility, ProjectMeta};

/// Date format used for `last_updated`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build the rendering context for one project.
///
/// Keys are inserted in a fixed order (scalars, then lists, then the
/// compatibility flags), followed by any extra metadata fields that do not
/// collide with an assembled key.
pub fn build_context(
    project: &ProjectEntry,
    meta: &ProjectMeta,
    site: &SiteConfig,
    today: NaiveDate,
) -> TemplateContext {
    let mut context = TemplateContext::new();

    let status = meta
        .status
        .clone()
        .unwrap_or_else(|| site.default_status.clone());

    context.insert(
        "title",
        meta.title.clone().unwrap_or_else(|| project.name.clone()),
    );
    context.insert("description", meta.description.clone().unwrap_or_default());
    context.insert(
        "version",
        meta.version
            .clone()
            .unwrap_or_else(|| site.default_version.clone()),
    );
    context.insert(
        "last_updated",
        meta.last_updated
            .clone()
            .unwrap_or_else(|| today.format(DATE_FORMAT).to_string()),
    );
    context.insert("status_text", site.status_label(&status));
    context.insert("status", status);
    context.insert("project_dir", project.name.clone());
    context.insert("category", project.category.clone());
    context.insert(
        "author_name",
        meta.author
            .name
            .clone()
            .unwrap_or_else(|| site.default_author.clone()),
    );

    context.insert("tags", meta.tags.clone());
    context.insert(
        "features",
        meta.features
            .clone()
            .unwrap_or_else(|| site.default_features.clone()),
    );
    context.insert("dependencies", meta.dependencies.clone());
    context.insert(
        "changelog",
        TemplateValue::List(meta.changelog.iter().map(changelog_value).collect()),
    );

    insert_compatibility(&mut context, &meta.compatibility);

    for (key, value) in &meta.extra {
        if context.contains_key(key) {
            tracing::trace!(key = %key, "Metadata field shadowed by assembled key");
            continue;
        }
        context.insert(key.clone(), TemplateValue::from(value.clone()));
    }

    context
}

fn changelog_value(entry: &ChangelogEntry) -> TemplateValue {
    let mut fields = ValueMap::new();
    fields.insert("version".to_string(), entry.version.clone().into());
    fields.insert("date".to_string(), entry.date.clone().into());
    fields.insert("changes".to_string(), entry.changes.clone().into());
    TemplateValue::Map(fields)
}

/// Insert `compatibility` both as a nested map (for enum descriptors) and as
/// flattened `compatibility.*` keys (for sections).
fn insert_compatibility(context: &mut TemplateContext, compatibility: &Compatibility) {
    let min_width = compatibility.min_screen_width().to_string();

    let mut fields = ValueMap::new();
    fields.insert("mobile".to_string(), compatibility.mobile().into());
    fields.insert("desktop".to_string(), compatibility.desktop().into());
    fields.insert("min_screen_width".to_string(), min_width.clone().into());
    fields.insert(
        "performance_impact".to_string(),
        compatibility.performance_impact().into(),
    );
    context.insert("compatibility", TemplateValue::Map(fields));

    context.insert("compatibility.mobile", compatibility.mobile());
    context.insert("compatibility.desktop", compatibility.desktop());
    context.insert("compatibility.min_screen_width", min_width);
}

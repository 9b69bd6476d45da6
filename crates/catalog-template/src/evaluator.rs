/*
 * evaluator.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Template evaluation engine.
//!
//! Each pass rewrites the whole text and hands the result to the next one.
//! The order is observable: a list section whose item template contains a
//! boolean section only sees that section after the boolean pass has left it
//! alone, which is what lets item-local booleans work.

use crate::context::{TemplateContext, TemplateValue, ValueMap};
use crate::error::{TemplateError, TemplateResult};
use crate::options::{EnumFlags, RenderOptions};
use crate::tags::{self, ITEM_PLACEHOLDER, Sigil, VARIABLE_TAG};

/// Render `template` against `context` with default options.
///
/// This never fails: directives that cannot be resolved are left in the
/// output as literal text.
pub fn render(template: &str, context: &TemplateContext) -> String {
    expand(template, context.variables())
}

/// Render `template` against `context` with enum descriptors and strict mode.
pub fn render_with_options(
    template: &str,
    context: &TemplateContext,
    options: &RenderOptions,
) -> TemplateResult<String> {
    let mut output = expand(template, context.variables());

    for flags in &options.enum_flags {
        output = apply_enum_flags(output, flags, context);
    }

    if options.strict_mode || tracing::enabled!(tracing::Level::DEBUG) {
        let unresolved = unresolved_directives(template, &output);
        if !unresolved.is_empty() {
            if options.strict_mode {
                return Err(TemplateError::UnresolvedDirectives { names: unresolved });
            }
            tracing::debug!(names = ?unresolved, "Leaving unresolved directives as literal text");
        }
    }

    Ok(output)
}

/// Directives written in `template` that are still present in `output`.
///
/// Tags that only reach the output inside a substituted value are not
/// counted, since no directive in the template produced them unresolved.
fn unresolved_directives(template: &str, output: &str) -> Vec<String> {
    let declared = tags::directive_names(template);
    tags::directive_names(output)
        .into_iter()
        .filter(|name| declared.contains(name))
        .collect()
}

/// Passes 1 to 3 over one namespace. List items recurse through here with
/// their own map.
fn expand(template: &str, variables: &ValueMap) -> String {
    let text = substitute_scalars(template, variables);
    let text = apply_boolean_sections(text, variables);
    apply_list_sections(text, variables)
}

/// Pass 1: replace `{{name}}` with string values.
///
/// One scan over the input, so replacement text is never expanded again.
fn substitute_scalars(template: &str, variables: &ValueMap) -> String {
    VARIABLE_TAG
        .replace_all(template, |caps: &regex::Captures| {
            match variables.get(&caps[1]) {
                Some(TemplateValue::String(value)) => value.clone(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Pass 2: open or drop sections for every boolean value.
fn apply_boolean_sections(mut text: String, variables: &ValueMap) -> String {
    for (name, value) in variables {
        if let TemplateValue::Bool(flag) = value {
            text = apply_flag(&text, name, *flag);
        }
    }
    text
}

/// Resolve `{{#name}}` and `{{^name}}` regions for one boolean.
fn apply_flag(text: &str, name: &str, flag: bool) -> String {
    let text = tags::replace_sections(text, Sigil::Positive, name, |body, out| {
        if flag {
            out.push_str(body);
        }
    });
    tags::replace_sections(&text, Sigil::Negative, name, |body, out| {
        if !flag {
            out.push_str(body);
        }
    })
}

/// Pass 3: repeat sections for every list value.
///
/// Empty lists delete both the section and its `.length` gate.
fn apply_list_sections(mut text: String, variables: &ValueMap) -> String {
    for (name, value) in variables {
        let TemplateValue::List(items) = value else {
            continue;
        };
        let length_gate = format!("{name}.length");

        text = tags::replace_sections(&text, Sigil::Positive, name, |item_template, out| {
            for item in items {
                render_item(item_template, item, out);
            }
        });
        text = tags::replace_sections(&text, Sigil::Positive, &length_gate, |body, out| {
            if !items.is_empty() {
                out.push_str(body);
            }
        });
    }
    text
}

/// Render one list item against the item template.
fn render_item(item_template: &str, item: &TemplateValue, out: &mut String) {
    match item {
        TemplateValue::Map(fields) => out.push_str(&expand(item_template, fields)),
        scalar => out.push_str(&item_template.replace(ITEM_PLACEHOLDER, &scalar.item_text())),
    }
}

/// Pass 4: derive one boolean per allowed value and re-run pass 2 for each.
fn apply_enum_flags(text: String, flags: &EnumFlags, context: &TemplateContext) -> String {
    let Some(TemplateValue::String(actual)) = context.get_path(&flags.field) else {
        tracing::trace!(field = %flags.field, "Enum field not set, leaving its sections");
        return text;
    };

    flags
        .derive_flags(actual)
        .fold(text, |text, (name, flag)| apply_flag(&text, &name, flag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ctx() -> TemplateContext {
        TemplateContext::new()
    }

    fn list(items: &[&str]) -> TemplateValue {
        TemplateValue::List(items.iter().map(|s| TemplateValue::from(*s)).collect())
    }

    #[test]
    fn test_literal_text() {
        let mut ctx = ctx();
        ctx.insert("name", "unused");
        ctx.insert("flag", true);
        assert_eq!(render("Hello, world!", &ctx), "Hello, world!");
    }

    #[test]
    fn test_simple_variable() {
        let mut ctx = ctx();
        ctx.insert("title", "Foo");
        assert_eq!(render("Hello {{title}}!", &ctx), "Hello Foo!");
    }

    #[test]
    fn test_missing_variable_is_literal() {
        // Unlike empty-string interpolation, missing names stay in the output.
        assert_eq!(render("Hello, {{name}}!", &ctx()), "Hello, {{name}}!");
    }

    #[test]
    fn test_variable_is_not_escaped() {
        let mut ctx = ctx();
        ctx.insert("body", "<b>&</b>");
        assert_eq!(render("{{body}}", &ctx), "<b>&</b>");
    }

    #[test]
    fn test_replacement_is_not_expanded_again() {
        let mut ctx = ctx();
        ctx.insert("a", "{{b}}");
        ctx.insert("b", "B");
        assert_eq!(render("{{a}}|{{b}}", &ctx), "{{b}}|B");
    }

    #[test]
    fn test_non_string_values_are_not_interpolated() {
        let mut ctx = ctx();
        ctx.insert("flag", true);
        ctx.insert("items", list(&["a"]));
        ctx.insert("nothing", TemplateValue::Null);
        assert_eq!(
            render("{{flag}} {{items}} {{nothing}}", &ctx),
            "{{flag}} {{items}} {{nothing}}"
        );
    }

    #[test]
    fn test_boolean_symmetry() {
        let template = "{{#x}}A{{/x}}{{^x}}B{{/x}}";

        let mut on = ctx();
        on.insert("x", true);
        assert_eq!(render(template, &on), "A");

        let mut off = ctx();
        off.insert("x", false);
        assert_eq!(render(template, &off), "B");

        assert_eq!(render(template, &ctx()), template);
    }

    #[test]
    fn test_boolean_section_keeps_inner_directives() {
        let mut ctx = ctx();
        ctx.insert("show", true);
        assert_eq!(
            render("{{#show}}[{{unknown}}]{{/show}}", &ctx),
            "[{{unknown}}]"
        );
    }

    #[test]
    fn test_boolean_every_occurrence() {
        let mut ctx = ctx();
        ctx.insert("mobile", false);
        assert_eq!(
            render("{{#mobile}}a{{/mobile}}-{{^mobile}}b{{/mobile}}-{{#mobile}}c{{/mobile}}", &ctx),
            "-b-"
        );
    }

    #[test]
    fn test_list_of_strings() {
        let mut ctx = ctx();
        ctx.insert("items", list(&["a", "b", "c"]));
        assert_eq!(render("{{#items}}[{{.}}]{{/items}}", &ctx), "[a][b][c]");
    }

    #[test]
    fn test_empty_list() {
        let mut ctx = ctx();
        ctx.insert("items", list(&[]));
        assert_eq!(
            render("x{{#items}}[{{.}}]{{/items}}{{#items.length}}has{{/items.length}}y", &ctx),
            "xy"
        );
    }

    #[test]
    fn test_absent_list_is_literal() {
        let template = "{{#items}}[{{.}}]{{/items}}";
        assert_eq!(render(template, &ctx()), template);
    }

    #[test]
    fn test_list_of_maps() {
        let mut ctx = ctx();
        ctx.insert("items", TemplateValue::from(json!([{"n": "x"}, {"n": "y"}])));
        assert_eq!(render("{{#items}}<{{n}}>{{/items}}", &ctx), "<x><y>");
    }

    #[test]
    fn test_length_gate() {
        let mut ctx = ctx();
        ctx.insert("deps", list(&["three.js"]));
        assert_eq!(
            render("{{#deps.length}}Deps:{{#deps}} {{.}}{{/deps}}{{/deps.length}}", &ctx),
            "Deps: three.js"
        );
    }

    #[test]
    fn test_item_local_booleans() {
        let mut ctx = ctx();
        ctx.insert(
            "projects",
            TemplateValue::from(json!([
                {"name": "ink", "featured": true},
                {"name": "sand", "featured": false},
            ])),
        );
        assert_eq!(
            render(
                "{{#projects}}{{name}}{{#featured}}*{{/featured}}{{^featured}}-{{/featured}};{{/projects}}",
                &ctx
            ),
            "ink*;sand-;"
        );
    }

    #[test]
    fn test_nested_list_in_item() {
        let mut ctx = ctx();
        ctx.insert(
            "changelog",
            TemplateValue::from(json!([
                {"version": "1.1.0", "changes": ["fix", "speed"]},
                {"version": "1.0.0", "changes": ["initial"]},
            ])),
        );
        assert_eq!(
            render(
                "{{#changelog}}{{version}}:{{#changes}} {{.}}{{/changes}}\n{{/changelog}}",
                &ctx
            ),
            "1.1.0: fix speed\n1.0.0: initial\n"
        );
    }

    #[test]
    fn test_item_fields_do_not_see_outer_context() {
        let mut ctx = ctx();
        ctx.insert("items", TemplateValue::from(json!([{"n": "x"}])));
        ctx.insert("title", TemplateValue::Null);
        assert_eq!(
            render("{{#items}}{{n}}{{title}}{{/items}}", &ctx),
            "x{{title}}"
        );
    }

    #[test]
    fn test_outer_scalar_resolved_before_items() {
        // Pass 1 runs over the whole template, including item templates.
        let mut ctx = ctx();
        ctx.insert("site", "S");
        ctx.insert("items", list(&["a", "b"]));
        assert_eq!(render("{{#items}}{{site}}{{.}}{{/items}}", &ctx), "SaSb");
    }

    #[test]
    fn test_scalar_pass_runs_before_sections() {
        let mut ctx = ctx();
        ctx.insert("x", "text");
        ctx.insert("show", true);
        assert_eq!(render("{{#show}}{{x}}{{/show}}", &ctx), "text");
    }

    #[test]
    fn test_unterminated_section_is_literal() {
        let mut ctx = ctx();
        ctx.insert("show", true);
        assert_eq!(render("{{#show}}never closed", &ctx), "{{#show}}never closed");
    }

    #[test]
    fn test_enum_flags_are_exclusive() {
        let template = "{{#impact_low}}L{{/impact_low}}{{#impact_medium}}M{{/impact_medium}}{{#impact_high}}H{{/impact_high}}";
        let options =
            RenderOptions::new().with_enum_flags(EnumFlags::new("impact", ["low", "medium", "high"]));

        let mut ctx = ctx();
        ctx.insert("impact", "medium");
        assert_eq!(render_with_options(template, &ctx, &options).unwrap(), "M");
    }

    #[test]
    fn test_enum_flags_nested_field() {
        let template = "{{#compat.level_high}}heavy{{/compat.level_high}}{{^compat.level_high}}light{{/compat.level_high}}";
        let options =
            RenderOptions::new().with_enum_flags(EnumFlags::new("compat.level", ["low", "high"]));

        let mut ctx = ctx();
        ctx.insert("compat", TemplateValue::from(json!({"level": "low"})));
        assert_eq!(render_with_options(template, &ctx, &options).unwrap(), "light");
    }

    #[test]
    fn test_enum_flags_missing_field_is_literal() {
        let template = "{{#impact_low}}L{{/impact_low}}";
        let options = RenderOptions::new().with_enum_flags(EnumFlags::new("impact", ["low"]));
        assert_eq!(
            render_with_options(template, &ctx(), &options).unwrap(),
            template
        );
    }

    #[test]
    fn test_tolerant_mode_passes_unknown_through() {
        let options = RenderOptions::new();
        assert_eq!(
            render_with_options("{{#ghost}}x{{/ghost}}", &ctx(), &options).unwrap(),
            "{{#ghost}}x{{/ghost}}"
        );
    }

    #[test]
    fn test_strict_mode_reports_unresolved() {
        let options = RenderOptions::new().with_strict_mode(true);
        let mut ctx = ctx();
        ctx.insert("title", "T");

        assert_eq!(
            render_with_options("{{title}}", &ctx, &options).unwrap(),
            "T"
        );

        let err = render_with_options("{{title}} {{author}} {{#tags}}{{/tags}}", &ctx, &options)
            .unwrap_err();
        match err {
            TemplateError::UnresolvedDirectives { names } => {
                assert_eq!(names, vec!["author", "tags"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_mode_ignores_tags_from_values() {
        let options = RenderOptions::new().with_strict_mode(true);
        let mut ctx = ctx();
        ctx.insert("description", "Type {{x}} to start");

        assert_eq!(
            render_with_options("<p>{{description}}</p>", &ctx, &options).unwrap(),
            "<p>Type {{x}} to start</p>"
        );
    }
}

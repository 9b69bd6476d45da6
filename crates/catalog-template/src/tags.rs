/*
 * tags.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Directive tag scanning.
//!
//! Sections are located textually: an open tag pairs with the nearest close
//! tag of the same name that follows it. There is no nesting of same-named
//! sections and no escaping of literal `{{`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder for the current scalar item inside a list section.
pub const ITEM_PLACEHOLDER: &str = "{{.}}";

/// Matches a variable tag: `{{name}}`. Section tags (`#`, `^`, `/`) are
/// excluded. Captures the name in group 1.
pub(crate) static VARIABLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^\{\}#^/][^\{\}]*)\}\}").unwrap());

/// Matches any directive tag. Captures the sigil (possibly empty) in group 1
/// and the name in group 2.
static DIRECTIVE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([#^/]?)([^\{\}#^/][^\{\}]*)\}\}").unwrap());

/// Which flavor of section opens a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sigil {
    /// `{{#name}}`
    Positive,
    /// `{{^name}}`
    Negative,
}

impl Sigil {
    fn as_char(self) -> char {
        match self {
            Sigil::Positive => '#',
            Sigil::Negative => '^',
        }
    }
}

/// `{{#name}}` or `{{^name}}`.
pub fn open_tag(sigil: Sigil, name: &str) -> String {
    format!("{{{{{}{}}}}}", sigil.as_char(), name)
}

/// `{{/name}}`.
pub fn close_tag(name: &str) -> String {
    format!("{{{{/{}}}}}", name)
}

/// Replace every `open ... {{/name}}` region in `text`.
///
/// Regions are found left to right. For each one, `expand` receives the body
/// between the tags and appends whatever should take the region's place.
/// Scanning resumes after the region's close tag, so the appended text is
/// never rescanned. An open tag without a following close tag ends the scan
/// and everything from it onward is kept verbatim.
pub fn replace_sections<F>(text: &str, sigil: Sigil, name: &str, mut expand: F) -> String
where
    F: FnMut(&str, &mut String),
{
    let open = open_tag(sigil, name);
    let close = close_tag(name);

    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(&open) {
        let body_start = start + open.len();
        let Some(body_len) = rest[body_start..].find(&close) else {
            break;
        };
        let body_end = body_start + body_len;

        output.push_str(&rest[..start]);
        expand(&rest[body_start..body_end], &mut output);
        rest = &rest[body_end + close.len()..];
    }

    output.push_str(rest);
    output
}

/// Names of the directives in `text`, in order of first appearance and
/// without duplicates.
pub fn directive_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in DIRECTIVE_TAG.captures_iter(text) {
        let name = &caps[2];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/*
 * options.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Render configuration.
//!
//! [`RenderOptions`] carries everything about a render call that is not part
//! of the context itself:
//!
//! 1. **Enum descriptors**: fields whose value selects one of a fixed set of
//!    alternatives (see [`EnumFlags`])
//! 2. **Strict mode**: report directives left unresolved instead of passing
//!    them through

use serde::{Deserialize, Serialize};

/// A closed enumeration over one context field.
///
/// For a descriptor with field `compatibility.performance_impact` and values
/// `low`, `medium`, `high`, rendering derives three booleans:
/// `compatibility.performance_impact_low`, `..._medium` and `..._high`.
/// Exactly the one matching the field's actual value is true, so a template
/// can write one section per alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumFlags {
    /// Field name, or a dotted path into nested maps.
    pub field: String,
    /// Allowed values, in the order their flags are applied.
    pub values: Vec<String>,
}

impl EnumFlags {
    pub fn new<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Name of the derived flag for `value`: `<field>_<value>`.
    pub fn flag_name(&self, value: &str) -> String {
        format!("{}_{}", self.field, value)
    }

    /// Derived `(flag name, flag value)` pairs for the field's actual value.
    ///
    /// A value outside the allowed set yields all-false flags.
    pub fn derive_flags<'a>(&'a self, actual: &'a str) -> impl Iterator<Item = (String, bool)> + 'a {
        self.values
            .iter()
            .map(move |value| (self.flag_name(value), value == actual))
    }
}

/// Options for a render call.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Enum descriptors, applied in order after all other passes.
    pub enum_flags: Vec<EnumFlags>,

    /// Strict mode: directives left in the output become an error.
    pub strict_mode: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enum descriptor.
    pub fn with_enum_flags(mut self, flags: EnumFlags) -> Self {
        self.enum_flags.push(flags);
        self
    }

    /// Enable or disable strict mode.
    ///
    /// In strict mode, any `{{...}}` directive of the template that survives
    /// rendering is reported as
    /// [`TemplateError::UnresolvedDirectives`](crate::TemplateError). Tags
    /// inside substituted values are not checked. Literal `{{...}}` text in
    /// the template itself (inline script or style code, for instance) is
    /// indistinguishable from a directive and is reported too.
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }
}

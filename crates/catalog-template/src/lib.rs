/*
 * lib.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Section template renderer for demo catalog pages.
//!
//! Templates use a small mustache-like directive set:
//!
//! - Variable interpolation: `{{title}}`
//! - Boolean sections: `{{#mobile}}...{{/mobile}}`
//! - Negated sections: `{{^mobile}}...{{/mobile}}`
//! - List sections: `{{#features}}<li>{{.}}</li>{{/features}}`
//! - List length gates: `{{#features.length}}...{{/features.length}}`
//! - Derived enum flags: `{{#level_high}}...{{/level_high}}`, configured with
//!   [`EnumFlags`]
//!
//! Rendering is tolerant: directives that name nothing in the context, or that
//! have no matching close tag, stay in the output as literal text. Strict mode
//! ([`RenderOptions::with_strict_mode`]) turns leftovers into an error.
//!
//! # Passes
//!
//! The renderer works on text, not on a syntax tree. It runs four passes in a
//! fixed order and each pass sees the output of the previous one:
//!
//! 1. string values replace `{{name}}`
//! 2. boolean values open or drop `{{#name}}` / `{{^name}}` sections
//! 3. list values repeat `{{#name}}` sections once per item
//! 4. enum descriptors derive `<field>_<value>` booleans and re-run pass 2
//!
//! # Example
//!
//! ```
//! use catalog_template::{TemplateContext, TemplateValue, render};
//!
//! let mut ctx = TemplateContext::new();
//! ctx.insert("title", "Ripples");
//! ctx.insert("mobile", true);
//! ctx.insert(
//!     "tags",
//!     TemplateValue::List(vec!["audio".into(), "canvas".into()]),
//! );
//!
//! let output = render(
//!     "{{title}}{{#mobile}} (mobile){{/mobile}}: {{#tags}}[{{.}}]{{/tags}}",
//!     &ctx,
//! );
//! assert_eq!(output, "Ripples (mobile): [audio][canvas]");
//! ```

pub mod context;
pub mod error;
pub mod evaluator;
pub mod options;
pub mod tags;
pub mod template;

// Re-export main types at crate root
pub use context::{TemplateContext, TemplateValue, ValueMap};
pub use error::{TemplateError, TemplateResult};
pub use evaluator::{render, render_with_options};
pub use options::{EnumFlags, RenderOptions};
pub use tags::ITEM_PLACEHOLDER;
pub use template::Template;

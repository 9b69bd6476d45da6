/*
 * error.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Error types for template loading and rendering.

use thiserror::Error;

/// Errors that can occur during template operations.
///
/// Rendering itself never fails in the default (tolerant) mode. These errors
/// come from strict mode and from reading template files.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Strict mode found directives that nothing in the context resolved.
    #[error("Unresolved template directives: {}", names.join(", "))]
    UnresolvedDirectives { names: Vec<String> },

    /// I/O error (e.g., reading a template file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

//! Typed errors for the template engine.

use super::cache::TransientSlot;
use std::fmt;
use thiserror::Error;

/// Which index a template name was resolved against.
///
/// Keeping the role explicit means a failed lookup reports *what kind* of
/// template was missing, not just a string that happened to miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateRole {
    /// Outer page shell selected by front-matter.
    Layout,
    /// Reusable fragment registered at startup.
    Include,
    /// Render-scoped compiled template.
    Transient(TransientSlot),
}

impl fmt::Display for TemplateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout => f.write_str("layout"),
            Self::Include => f.write_str("include"),
            Self::Transient(slot) => write!(f, "transient {}", slot.name()),
        }
    }
}

/// Template resolution and expansion errors.
///
/// All of these are authoring mistakes and abort the whole build.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("{role} template `{name}` is not registered")]
    NotFound { role: TemplateRole, name: String },

    #[error("include `{name}` nests deeper than {limit} levels")]
    NestingTooDeep { name: String, limit: usize },
}

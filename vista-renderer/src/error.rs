//! Error types for vista-renderer.

use std::path::PathBuf;

use thiserror::Error;

use vista_core::types::{Format, TemplateName};

/// No template or partial matched the requested name and format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("can't find template {} for {} format", quoted(.name), quoted(.format))]
pub struct MissingTemplateError {
    /// Name that was attempted, if any.
    pub name: Option<TemplateName>,
    /// Format that was requested, if any.
    pub format: Option<Format>,
}

impl MissingTemplateError {
    pub fn new(name: Option<TemplateName>, format: Option<Format>) -> Self {
        Self { name, format }
    }
}

fn quoted<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => format!("\"{v}\""),
        None => "<none>".to_owned(),
    }
}

/// All errors that can arise from template lookup and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    MissingTemplate(#[from] MissingTemplateError),

    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while searching for or reading templates.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// Nested `render(...)` calls went deeper than allowed.
    #[error("maximum render depth {depth} exceeded; templates likely render each other in a cycle")]
    RecursionLimit { depth: usize },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

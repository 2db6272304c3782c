//! Renderable templates — the [`Template`] trait and its Tera-backed file implementation.

use std::fmt;
use std::path::{Path, PathBuf};

use tera::Tera;

use vista_core::types::{Format, TemplateName};

use crate::error::{io_err, RenderError};
use crate::scope::Scope;

/// Engine-side names ending in one of these get HTML escaping of interpolated values.
const ESCAPED_SUFFIXES: &[&str] = &[".html", ".htm", ".xml"];

/// Something that can turn a [`Scope`] into output.
pub trait Template: Send + Sync + fmt::Debug {
    fn render(&self, scope: &Scope) -> Result<String, RenderError>;
}

/// A template file on disk, named `<stem>.<format>.<engine>`.
#[derive(Debug, Clone)]
pub struct FileTemplate {
    path: PathBuf,
    name: TemplateName,
    format: Format,
    source: String,
}

impl FileTemplate {
    /// Read the template at `path`.
    pub fn load(path: &Path, name: TemplateName, format: Format) -> Result<Self, RenderError> {
        let source = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Ok(Self::from_source(path, name, format, source))
    }

    pub fn from_source(
        path: impl Into<PathBuf>,
        name: TemplateName,
        format: Format,
        source: impl Into<String>,
    ) -> Self {
        FileTemplate {
            path: path.into(),
            name,
            format,
            source: source.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &TemplateName {
        &self.name
    }

    pub fn format(&self) -> &Format {
        &self.format
    }
}

impl Template for FileTemplate {
    fn render(&self, scope: &Scope) -> Result<String, RenderError> {
        // Fresh engine per render so the nested `render` function can capture this scope.
        let key = format!("{}.{}", self.name, self.format);
        let mut tera = Tera::default();
        tera.autoescape_on(ESCAPED_SUFFIXES.to_vec());
        tera.add_raw_template(&key, &self.source)?;
        if let Some(function) = scope.render_function(&self.format) {
            tera.register_function("render", function);
        }

        let context = scope.to_context()?;
        tracing::debug!(
            template = %self.name,
            format = %self.format,
            path = %self.path.display(),
            "rendering template"
        );
        Ok(tera.render(&key, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use vista_core::{Locals, StaticView, ViewClass};

    fn scope(locals: serde_json::Value) -> Scope {
        let view = Arc::new(StaticView::new(ViewClass::new("Test", "/nowhere")));
        let locals: Locals = serde_json::from_value(locals).unwrap();
        Scope::new(view, Some(locals))
    }

    #[test]
    fn html_output_is_escaped() {
        let t = FileTemplate::from_source("x.html.tera", "x".into(), Format::html(), "<p>{{ body }}</p>");
        let out = t.render(&scope(json!({ "body": "<b>hi</b>" }))).unwrap();
        assert_eq!(out, "<p>&lt;b&gt;hi&lt;&#x2F;b&gt;</p>");
    }

    #[test]
    fn text_output_is_not_escaped() {
        let t = FileTemplate::from_source("x.txt.tera", "x".into(), "txt".into(), "{{ body }}");
        let out = t.render(&scope(json!({ "body": "<b>hi</b>" }))).unwrap();
        assert_eq!(out, "<b>hi</b>");
    }

    #[test]
    fn syntax_error_surfaces_as_tera_error() {
        let t = FileTemplate::from_source("x.txt.tera", "x".into(), "txt".into(), "{{ unclosed");
        let err = t.render(&scope(json!({}))).unwrap_err();
        assert!(matches!(err, RenderError::Tera(_)), "got: {err}");
    }

    #[test]
    fn load_reads_source_and_keeps_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("show.txt.tera");
        std::fs::write(&path, "{{ title }}!").unwrap();

        let t = FileTemplate::load(&path, "articles/show".into(), "txt".into()).unwrap();
        assert_eq!(t.path(), path.as_path());
        assert_eq!(t.name().as_str(), "articles/show");
        assert_eq!(t.format().as_str(), "txt");
        assert_eq!(t.render(&scope(json!({ "title": "Hi" }))).unwrap(), "Hi!");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = FileTemplate::load(Path::new("/definitely/not/here.html.tera"), "x".into(), Format::html())
            .unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }), "got: {err}");
    }
}

//! Rendering scope — the variables one template render can see.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use vista_core::types::{Format, Locals, RenderOptions, TemplateName};
use vista_core::view::View;

use crate::error::RenderError;
use crate::finder::TemplateFinder;
use crate::renderer::TemplateRenderer;

/// Variables bound for a single render: the view's exposures overlaid with
/// the call's locals. Lives for exactly one render call.
pub struct Scope {
    view: Arc<dyn View>,
    locals: Locals,
    nesting: Option<Nesting>,
}

/// What a scope needs to let its template render other templates.
#[derive(Clone)]
struct Nesting {
    finder: Arc<dyn TemplateFinder>,
    depth: usize,
}

impl Scope {
    /// Build a scope; absent locals are an empty map.
    pub fn new(view: Arc<dyn View>, locals: Option<Locals>) -> Self {
        Scope {
            view,
            locals: locals.unwrap_or_default(),
            nesting: None,
        }
    }

    /// Enable the template-side `render(...)` function, resolving through `finder`.
    pub(crate) fn with_nesting(mut self, finder: Arc<dyn TemplateFinder>, depth: usize) -> Self {
        self.nesting = Some(Nesting { finder, depth });
        self
    }

    pub fn view(&self) -> &Arc<dyn View> {
        &self.view
    }

    pub fn locals(&self) -> &Locals {
        &self.locals
    }

    /// Look up a variable: locals first, then the view's exposures.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self.locals.get(key) {
            Some(value) => Some(value.clone()),
            None => self.view.exposures().remove(key),
        }
    }

    /// Tera context with every visible variable.
    pub fn to_context(&self) -> Result<tera::Context, RenderError> {
        let mut values = self.view.exposures();
        values.extend(self.locals.clone());
        Ok(tera::Context::from_value(Value::Object(values))?)
    }

    /// Tera function rendering another template for the same view.
    ///
    /// Usage: `{{ render(partial="shared/header", title=heading) | safe }}`.
    /// Arguments other than `template`, `partial`, `format` and `locals` become
    /// locals, overriding entries of the same name in a `locals` map.
    /// `format` defaults to `current`, the format of the calling template.
    pub(crate) fn render_function(&self, current: &Format) -> Option<impl tera::Function + 'static> {
        let nesting = self.nesting.clone()?;
        let view = Arc::clone(&self.view);
        let current = current.clone();
        Some(move |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let options = options_from_args(args, &current)?;
            let output = TemplateRenderer::new(Arc::clone(&view), options, Arc::clone(&nesting.finder))
                .at_depth(nesting.depth + 1)
                .render()
                .map_err(|e| tera::Error::chain("nested render failed", e))?;
            Ok(Value::String(output))
        })
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("view", &self.view.class().name)
            .field("locals", &self.locals)
            .field("depth", &self.nesting.as_ref().map(|n| n.depth))
            .finish()
    }
}

fn options_from_args(args: &HashMap<String, Value>, current: &Format) -> tera::Result<RenderOptions> {
    let mut options = RenderOptions::default();
    let mut extra = Locals::new();
    for (key, value) in args {
        match key.as_str() {
            "template" => options.template = Some(TemplateName::from(string_arg(key, value)?)),
            "partial" => options.partial = Some(TemplateName::from(string_arg(key, value)?)),
            "format" => options.format = Some(Format::from(string_arg(key, value)?)),
            "locals" => match value {
                Value::Object(map) => options.locals = Some(map.clone()),
                _ => return Err(tera::Error::msg("render: `locals` must be a map")),
            },
            _ => {
                extra.insert(key.clone(), value.clone());
            }
        }
    }
    if !extra.is_empty() {
        options.locals.get_or_insert_with(Locals::new).extend(extra);
    }
    if options.format.is_none() {
        options.format = Some(current.clone());
    }
    Ok(options)
}

fn string_arg<'a>(key: &str, value: &'a Value) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("render: `{key}` must be a string")))
}

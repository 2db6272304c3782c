//! `vista render` — find a template and print its rendered output.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use vista_core::{Locals, RenderOptions, StaticView};
use vista_renderer::{FileSystemFinder, TemplateRenderer};

use super::RootArgs;

/// Arguments for `vista render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Logical template name, e.g. `articles/show`.
    pub name: String,

    /// Look NAME up as a partial (`shared/header` → `shared/_header.<format>.tera`).
    #[arg(long)]
    pub partial: bool,

    /// Output format, e.g. `html` or `json`.
    #[arg(long)]
    pub format: Option<String>,

    /// Local variable as KEY=VALUE; VALUE is parsed as JSON when possible.
    #[arg(long = "local", value_name = "KEY=VALUE", value_parser = parse_local)]
    pub locals: Vec<(String, Value)>,

    /// JSON file with an object of local variables; `--local` entries win.
    #[arg(long)]
    pub locals_file: Option<PathBuf>,

    #[command(flatten)]
    pub root: RootArgs,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let config = self.root.resolve()?;

        let mut locals = match &self.locals_file {
            Some(path) => read_locals_file(path)?,
            None => Locals::new(),
        };
        locals.extend(self.locals);

        let mut options = if self.partial {
            RenderOptions::partial(self.name.as_str())
        } else {
            RenderOptions::template(self.name.as_str())
        };
        if let Some(format) = self.format {
            options = options.with_format(format);
        }
        if !locals.is_empty() {
            options = options.with_locals(locals);
        }

        let view = Arc::new(StaticView::new(config.view_class()));
        let finder = Arc::new(FileSystemFinder::from_config(&config));
        let output = TemplateRenderer::new(view, options, finder)
            .render()
            .with_context(|| format!("render failed for '{}'", self.name))?;

        print!("{output}");
        if !output.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}

fn read_locals_file(path: &Path) -> Result<Locals> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} must contain a JSON object", path.display()))
}

fn parse_local(raw: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((key.to_owned(), value))
}

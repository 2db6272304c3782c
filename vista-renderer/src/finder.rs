//! Template lookup — [`TemplateFinder`] and the on-disk [`FileSystemFinder`].
//!
//! # File naming
//!
//! | On disk (under the view root)        | Name             | Format |
//! |--------------------------------------|------------------|--------|
//! | `articles/show.html.tera`            | `articles/show`  | `html` |
//! | `articles/show.json.tera`            | `articles/show`  | `json` |
//! | `shared/_header.html.tera` (partial) | `shared/_header` | `html` |

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use walkdir::WalkDir;

use vista_core::config::{ViewConfig, DEFAULT_ENGINE};
use vista_core::types::{Format, RenderOptions, TemplateName};
use vista_core::view::ViewClass;

use crate::error::{io_err, RenderError};
use crate::template::{FileTemplate, Template};

/// Resolves rendering options to a template for a given view class.
pub trait TemplateFinder: Send + Sync {
    /// Returns `Ok(None)` when nothing matches; errors are reserved for
    /// failures while searching.
    fn find(
        &self,
        class: &ViewClass,
        options: &RenderOptions,
    ) -> Result<Option<Arc<dyn Template>>, RenderError>;
}

/// A template file discovered under a view root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    pub name: TemplateName,
    pub format: Format,
    pub engine: String,
    pub path: PathBuf,
}

/// Finds `<name>.<format>.<engine>` files under the view class root.
///
/// A template matches when its name equals the requested one, or ends with
/// `/<requested>` (recursive search). Exact matches win, then shallower
/// paths, then lexicographic order.
#[derive(Debug, Clone)]
pub struct FileSystemFinder {
    engines: Vec<String>,
    default_format: Option<Format>,
}

impl Default for FileSystemFinder {
    fn default() -> Self {
        FileSystemFinder {
            engines: vec![DEFAULT_ENGINE.to_owned()],
            default_format: None,
        }
    }
}

impl FileSystemFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finder configured with the engines and default format of `config`.
    pub fn from_config(config: &ViewConfig) -> Self {
        FileSystemFinder {
            engines: config.engines.clone(),
            default_format: config.default_format.clone(),
        }
    }

    pub fn with_engines<I, S>(mut self, engines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.engines = engines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_format(mut self, format: impl Into<Format>) -> Self {
        self.default_format = Some(format.into());
        self
    }

    /// Every parseable template under `root`, sorted by path.
    ///
    /// A missing root yields an empty list.
    pub fn templates_in(&self, root: &Path) -> Result<Vec<TemplateEntry>, RenderError> {
        if !root.exists() {
            return Ok(vec![]);
        }
        let mut files = collect_template_files(root)?;
        files.sort();

        let mut entries = Vec::new();
        for path in files {
            let rel = path.strip_prefix(root).unwrap_or(path.as_path());
            match self.parse_entry(rel) {
                Some((name, format, engine)) => entries.push(TemplateEntry {
                    name,
                    format,
                    engine,
                    path,
                }),
                None => tracing::trace!(path = %path.display(), "skipping non-template file"),
            }
        }
        Ok(entries)
    }

    /// Split `dir/stem.format.engine` into its parts; `None` for anything else.
    fn parse_entry(&self, rel: &Path) -> Option<(TemplateName, Format, String)> {
        let rel = rel.to_string_lossy().replace('\\', "/");
        let (logical, engine) = rel.rsplit_once('.')?;
        if !self.engines.iter().any(|e| e == engine) {
            return None;
        }
        let (name, format) = logical.rsplit_once('.')?;
        let stem = name.rsplit('/').next().unwrap_or(name);
        if stem.is_empty() || format.is_empty() || stem.contains('.') {
            return None;
        }
        Some((TemplateName::from(name), Format::from(format), engine.to_owned()))
    }
}

impl TemplateFinder for FileSystemFinder {
    fn find(
        &self,
        class: &ViewClass,
        options: &RenderOptions,
    ) -> Result<Option<Arc<dyn Template>>, RenderError> {
        let Some(wanted) = options.lookup_name() else {
            return Ok(None);
        };
        let format = options.format.as_ref().or(self.default_format.as_ref());
        let nested_suffix = format!("/{wanted}");

        let entries = self.templates_in(&class.root)?;
        let hit = entries
            .into_iter()
            .filter(|e| format.map_or(true, |f| &e.format == f))
            .filter(|e| e.name == wanted || e.name.as_str().ends_with(&nested_suffix))
            .min_by(|a, b| {
                let rank = |e: &TemplateEntry| (e.name != wanted, e.name.as_str().matches('/').count());
                rank(a).cmp(&rank(b)).then_with(|| a.path.cmp(&b.path))
            });

        match hit {
            Some(entry) => {
                tracing::debug!(
                    view = %class.name,
                    template = %wanted,
                    path = %entry.path.display(),
                    "template found"
                );
                let template: Arc<dyn Template> =
                    Arc::new(FileTemplate::load(&entry.path, entry.name, entry.format)?);
                Ok(Some(template))
            }
            None => {
                tracing::debug!(
                    view = %class.name,
                    template = %wanted,
                    format = ?format.map(Format::as_str),
                    root = %class.root.display(),
                    "no template matched"
                );
                Ok(None)
            }
        }
    }
}

/// Every regular file under `root`, following symlinks.
///
/// Symlink loops and dangling links are skipped.
fn collect_template_files(root: &Path) -> Result<Vec<PathBuf>, RenderError> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_some() || is_dangling(&e) => {
                tracing::trace!(error = %e, "skipping unreadable link");
                continue;
            }
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                return Err(io_err(path, e.into()));
            }
        };
        if entry.file_type().is_file() {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

fn is_dangling(e: &walkdir::Error) -> bool {
    e.io_error()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

//! # vista-renderer
//!
//! Resolves templates for a view and renders them with Tera.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use vista_core::{RenderOptions, StaticView, ViewClass};
//! use vista_renderer::{FileSystemFinder, RenderError, TemplateRenderer};
//!
//! fn show_article() -> Result<String, RenderError> {
//!     let view = Arc::new(StaticView::new(ViewClass::new("Articles::Show", "templates")));
//!     let options = RenderOptions::template("articles/show")
//!         .with_format("html")
//!         .with_local("title", "Hello");
//!     TemplateRenderer::new(view, options, Arc::new(FileSystemFinder::new())).render()
//! }
//! ```
//!
//! Templates can render other templates of the same view:
//!
//! ```text
//! {{ render(partial="shared/header", title=heading) | safe }}
//! ```

pub mod error;
pub mod finder;
pub mod renderer;
pub mod scope;
pub mod template;

pub use error::{MissingTemplateError, RenderError};
pub use finder::{FileSystemFinder, TemplateEntry, TemplateFinder};
pub use renderer::{TemplateRenderer, MAX_RENDER_DEPTH};
pub use scope::Scope;
pub use template::{FileTemplate, Template};

//! Vista core library — domain types, view configuration, errors.
//!
//! - [`types`] — rendering options and newtypes
//! - [`view`] — [`View`] trait and [`ViewClass`]
//! - [`config`] — load / discover `vista.yaml`
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;
pub mod view;

pub use config::ViewConfig;
pub use error::ConfigError;
pub use types::{Format, Locals, RenderOptions, TemplateName};
pub use view::{StaticView, View, ViewClass};

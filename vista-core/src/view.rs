//! Views — the owners of a template root and the values they expose.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::Locals;

/// Identifies a kind of view and where its templates live.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewClass {
    /// Human-readable class name, e.g. `Articles::Show`.
    pub name: String,
    /// Directory searched for this view's templates.
    pub root: PathBuf,
}

impl ViewClass {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }
}

/// A view currently rendering.
///
/// Templates see every value in [`View::exposures`]; explicit locals passed
/// with a render call shadow exposures of the same name.
pub trait View: Send + Sync {
    fn class(&self) -> &ViewClass;

    fn exposures(&self) -> Locals {
        Locals::new()
    }
}

/// A [`View`] with a fixed set of exposures.
#[derive(Debug, Clone)]
pub struct StaticView {
    class: ViewClass,
    exposures: Locals,
}

impl StaticView {
    pub fn new(class: ViewClass) -> Self {
        Self {
            class,
            exposures: Locals::new(),
        }
    }

    pub fn with_exposures(mut self, exposures: Locals) -> Self {
        self.exposures = exposures;
        self
    }
}

impl View for StaticView {
    fn class(&self) -> &ViewClass {
        &self.class
    }

    fn exposures(&self) -> Locals {
        self.exposures.clone()
    }
}

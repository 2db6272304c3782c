//! Domain types for template lookup and rendering.
//!
//! All types are serializable/deserializable via serde so rendering options
//! can come from YAML config, JSON files or the command line alike.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Variables made available to a template, keyed by name.
pub type Locals = serde_json::Map<String, Value>;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Logical path of a template or partial, relative to a view's template root
/// and without format or engine extensions (e.g. `articles/show`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateName(pub String);

impl TemplateName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File stem a partial with this name is stored under: the last path
    /// segment gets a leading underscore (`shared/header` → `shared/_header`).
    pub fn as_partial(&self) -> TemplateName {
        let (dir, base) = match self.0.rsplit_once('/') {
            Some((dir, base)) => (Some(dir), base),
            None => (None, self.0.as_str()),
        };
        let base = if base.starts_with('_') {
            base.to_owned()
        } else {
            format!("_{base}")
        };
        match dir {
            Some(dir) => TemplateName(format!("{dir}/{base}")),
            None => TemplateName(base),
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TemplateName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TemplateName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Output format of a rendered template (`html`, `json`, `txt`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Format(pub String);

impl Format {
    pub fn html() -> Self {
        Self::from("html")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Format {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Format {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// RenderOptions
// ---------------------------------------------------------------------------

/// What to render and with which variables.
///
/// Every key is optional. `template` names a full template; `partial` is
/// consulted only when `template` is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial: Option<TemplateName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locals: Option<Locals>,
}

impl RenderOptions {
    /// Options targeting the full template `name`.
    pub fn template(name: impl Into<TemplateName>) -> Self {
        Self {
            template: Some(name.into()),
            ..Self::default()
        }
    }

    /// Options targeting the partial `name`.
    pub fn partial(name: impl Into<TemplateName>) -> Self {
        Self {
            partial: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<Format>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_locals(mut self, locals: Locals) -> Self {
        self.locals = Some(locals);
        self
    }

    /// Add a single local, creating the locals map if needed.
    pub fn with_local(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.locals
            .get_or_insert_with(Locals::new)
            .insert(key.into(), value.into());
        self
    }

    /// Name reported when nothing could be found: `template`, else `partial`.
    pub fn missing_name(&self) -> Option<&TemplateName> {
        match &self.template {
            Some(name) => Some(name),
            None => self.partial.as_ref(),
        }
    }

    /// Logical file name to search for: the template name as-is, else the
    /// partial's underscore-prefixed stem.
    pub fn lookup_name(&self) -> Option<TemplateName> {
        match (&self.template, &self.partial) {
            (Some(template), _) => Some(template.clone()),
            (None, Some(partial)) => Some(partial.as_partial()),
            (None, None) => None,
        }
    }

    pub fn locals_or_empty(&self) -> Locals {
        self.locals.clone().unwrap_or_default()
    }
}

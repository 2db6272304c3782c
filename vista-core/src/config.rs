//! View configuration — where templates live and how they are looked up.
//!
//! Config is a small YAML file:
//!
//! ```yaml
//! root: templates        # relative to this file
//! view: Articles::Show   # optional, defaults to "Application"
//! default_format: html   # optional
//! engines: [tera]        # optional, defaults to [tera]
//! ```
//!
//! Discovery order: `<cwd>/vista.yaml`, then `<config_dir>/vista/config.yaml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Format;
use crate::view::ViewClass;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "vista.yaml";

/// Engine extension used when a config does not list any.
pub const DEFAULT_ENGINE: &str = "tera";

const DEFAULT_VIEW_NAME: &str = "Application";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Template root directory.
    pub root: PathBuf,
    /// View class name reported in logs and errors.
    #[serde(default = "default_view_name")]
    pub view: String,
    /// Format used by the finder when a render call names none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_format: Option<Format>,
    /// Template engine extensions recognised on disk.
    #[serde(default = "default_engines")]
    pub engines: Vec<String>,
}

fn default_view_name() -> String {
    DEFAULT_VIEW_NAME.to_owned()
}

fn default_engines() -> Vec<String> {
    vec![DEFAULT_ENGINE.to_owned()]
}

impl ViewConfig {
    /// Config rooted at `root` with every other field defaulted.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            view: default_view_name(),
            default_format: None,
            engines: default_engines(),
        }
    }

    pub fn view_class(&self) -> ViewClass {
        ViewClass::new(self.view.clone(), self.root.clone())
    }
}

/// Load a config file. A relative `root` is resolved against the file's directory.
///
/// Returns `ConfigError::NotFound` if absent, `ConfigError::Parse`
/// (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<ViewConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.to_path_buf() });
    }
    let contents = std::fs::read_to_string(path)?;
    let mut config: ViewConfig = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    if config.root.is_relative() {
        if let Some(dir) = path.parent() {
            config.root = dir.join(&config.root);
        }
    }
    if config.engines.is_empty() {
        config.engines = default_engines();
    }
    Ok(config)
}

/// Locate a config file for `cwd`, if any.
pub fn discover(cwd: &Path) -> Option<PathBuf> {
    let local = cwd.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("vista").join("config.yaml"))
        .filter(|p| p.is_file())
}

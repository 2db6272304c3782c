pub mod list;
pub mod render;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use vista_core::{config, ViewConfig};

/// Where to find templates; shared by every subcommand.
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Template root directory (overrides any config file).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Path to a `vista.yaml` config file.
    #[arg(long, conflicts_with = "root")]
    pub config: Option<PathBuf>,

    /// View class name used in logs and errors.
    #[arg(long)]
    pub view: Option<String>,
}

impl RootArgs {
    /// `--root` wins, then `--config`, then a discovered `vista.yaml`.
    pub fn resolve(&self) -> Result<ViewConfig> {
        let mut config = if let Some(root) = &self.root {
            ViewConfig::with_root(root.clone())
        } else {
            let path = match &self.config {
                Some(path) => path.clone(),
                None => {
                    let cwd = std::env::current_dir().context("could not determine working directory")?;
                    match config::discover(&cwd) {
                        Some(path) => path,
                        None => bail!(
                            "no template root: pass --root <dir> or create {}",
                            config::CONFIG_FILE_NAME
                        ),
                    }
                }
            };
            config::load_at(&path).with_context(|| format!("failed to load {}", path.display()))?
        };

        if let Some(view) = &self.view {
            config.view = view.clone();
        }
        tracing::debug!(root = %config.root.display(), view = %config.view, "resolved view config");
        Ok(config)
    }
}

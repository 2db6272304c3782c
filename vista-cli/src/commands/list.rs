//! `vista list` — show the templates a view root provides.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use vista_core::Format;
use vista_renderer::{FileSystemFinder, TemplateEntry};

use super::RootArgs;

/// Arguments for `vista list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show templates in this format.
    #[arg(long)]
    pub format: Option<String>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub root: RootArgs,
}

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "template")]
    name: String,
    #[tabled(rename = "kind")]
    kind: &'static str,
    #[tabled(rename = "format")]
    format: String,
    #[tabled(rename = "file")]
    file: String,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let config = self.root.resolve()?;
        let finder = FileSystemFinder::from_config(&config);

        let mut entries = finder
            .templates_in(&config.root)
            .with_context(|| format!("failed to scan {}", config.root.display()))?;
        if let Some(format) = self.format.map(Format::from) {
            entries.retain(|e| e.format == format);
        }

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&entries).context("failed to serialize template list")?
            );
            return Ok(());
        }

        println!(
            "{} | {} | {} templates",
            config.view.bold(),
            config.root.display(),
            entries.len()
        );
        if entries.is_empty() {
            println!("No templates found.");
            return Ok(());
        }

        let rows: Vec<TemplateRow> = entries
            .iter()
            .map(|entry| TemplateRow {
                name: entry.name.to_string(),
                kind: kind(entry),
                format: entry.format.to_string(),
                file: entry
                    .path
                    .strip_prefix(&config.root)
                    .unwrap_or(&entry.path)
                    .display()
                    .to_string(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

fn kind(entry: &TemplateEntry) -> &'static str {
    let stem = entry.name.as_str().rsplit('/').next().unwrap_or_default();
    if stem.starts_with('_') {
        "partial"
    } else {
        "template"
    }
}

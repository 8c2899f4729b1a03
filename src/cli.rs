//! Headless commands over storyboard documents

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tokio::fs;

use crate::config::{save_export_basename, Config};
use crate::document::{export_steps, export_steps_compact, import_steps, suggested_filename};
use crate::io::{DiskFileAccess, FileAccess, SaveOutcome};
use crate::session::{ExportOutcome, Session};
use crate::store::StepStore;
use crate::util;

#[derive(Debug, Parser)]
#[command(
    name = "storyboard",
    about = "Inspect and convert code-walkthrough storyboard documents",
    version
)]
pub struct Cli {
    /// Override the data directory (default ~/.storyboard)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a document and print a per-step summary
    Inspect {
        /// Storyboard document to read
        file: PathBuf,
    },
    /// Normalize a document of any historical shape and re-export it
    /// canonically with a stamped filename
    Convert {
        /// Storyboard document to read
        file: PathBuf,
        /// Directory to write into (default: configured export dir)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Basename for the stamped filename
        #[arg(long)]
        basename: Option<String>,
        /// Persist --basename to the config file for future exports
        #[arg(long, requires = "basename")]
        remember: bool,
    },
    /// Replace one step's snapshots with the templates from another
    /// document, then re-export
    ApplyTemplates {
        /// Storyboard document to read
        file: PathBuf,
        /// Zero-based index of the step receiving the templates
        #[arg(long)]
        step: usize,
        /// Template document ({"dbTemplates": [...]})
        #[arg(long, value_name = "FILE")]
        templates: PathBuf,
        /// Directory to write into (default: configured export dir)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

pub async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    match command {
        Command::Inspect { file } => inspect(&file).await,
        Command::Convert {
            file,
            out,
            basename,
            remember,
        } => convert(&file, out, basename, remember, &config).await,
        Command::ApplyTemplates {
            file,
            step,
            templates,
            out,
        } => apply_templates(&file, step, &templates, out, &config).await,
    }
}

async fn read_document(file: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))
}

fn target_dir(out: Option<PathBuf>, config: &Config) -> PathBuf {
    out.or_else(|| config.export_dir.clone())
        .unwrap_or_else(util::exports_dir)
}

async fn inspect(file: &Path) -> anyhow::Result<()> {
    let bytes = read_document(file).await?;
    let steps = import_steps(&bytes).with_context(|| format!("failed to parse {}", file.display()))?;

    println!("{}: {} steps", file.display(), steps.len());
    for (i, step) in steps.iter().enumerate() {
        let state_vars = step.state.as_ref().map_or(0, |s| s.len());
        let tables = step.db.as_ref().map_or(0, |db| db.len());
        let description = step
            .description
            .as_deref()
            .unwrap_or("")
            .lines()
            .next()
            .unwrap_or("");
        print!("  {:>3}. {}  [{} vars, {} tables]", i + 1, step.key, state_vars, tables);
        if description.is_empty() {
            println!();
        } else {
            println!("  {}", description);
        }
    }
    Ok(())
}

async fn convert(
    file: &Path,
    out: Option<PathBuf>,
    basename: Option<String>,
    remember: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let bytes = read_document(file).await?;
    let steps = import_steps(&bytes).with_context(|| format!("failed to parse {}", file.display()))?;

    let json = if config.pretty_export {
        export_steps(&steps)?
    } else {
        export_steps_compact(&steps)?
    };

    let base = basename.as_deref().or(config.export_basename.as_deref());
    let name = suggested_filename(base, Utc::now());

    let access = DiskFileAccess::new(target_dir(out, config));
    match access.save_document(&name, json.as_bytes()).await? {
        SaveOutcome::Saved(path) => println!("Wrote {}", path.display()),
        SaveOutcome::Cancelled => {}
    }

    if remember {
        if let Some(base) = basename {
            save_export_basename(&base).context("failed to update config")?;
        }
    }
    Ok(())
}

async fn apply_templates(
    file: &Path,
    step: usize,
    templates: &Path,
    out: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    let bytes = read_document(file).await?;
    let steps = import_steps(&bytes).with_context(|| format!("failed to parse {}", file.display()))?;
    let template_bytes = read_document(templates).await?;

    // Seed a session with the imported steps, run the bridge, re-export
    let mut session = Session::seeded(StepStore::from_steps(steps));
    session
        .import_templates(step, &template_bytes)
        .with_context(|| format!("failed to apply templates to step {}", step))?;

    let access = DiskFileAccess::new(target_dir(out, config));
    let basename = config.export_basename.as_deref();
    match session.export_to(&access, basename).await? {
        ExportOutcome::Saved(path) => println!("Wrote {}", path.display()),
        ExportOutcome::Cancelled => {}
    }
    Ok(())
}

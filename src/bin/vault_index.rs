//! Build `dist/index.json` from the item tree.
//!
//! Usage:
//!   vault-index
//!   vault-index --items path/to/items --output dist/index.json --strict

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use uivault::MetaSchema;
use uivault::config::{ConfigOverrides, VaultConfig};
use uivault::indexer;
use uivault::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "vault-index")]
#[command(about = "Validate item metadata and write the index artifact")]
struct Cli {
    /// Vault root; discovered from the working directory when omitted.
    #[arg(long)]
    root: Option<PathBuf>,
    /// Items directory holding components/, sections/ and templates/.
    #[arg(long)]
    items: Option<PathBuf>,
    /// Index artifact path.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Metadata schema override (defaults to the embedded schema).
    #[arg(long)]
    schema: Option<PathBuf>,
    /// Exit non-zero when any item was skipped.
    #[arg(long)]
    strict: bool,
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = VaultConfig::resolve(&ConfigOverrides {
        root: cli.root,
        items_dir: cli.items,
        output: cli.output,
        schema: cli.schema,
    })
    .context("resolving vault configuration")?;

    let schema = match &config.schema {
        Some(path) => MetaSchema::load(path)?,
        None => MetaSchema::builtin()?,
    };

    let report = indexer::run(&config.items_dir, &config.output, &schema)?;
    println!("✓ Generated index with {} items", report.index.items.len());

    if report.warnings.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    eprintln!("\nWarnings:");
    for warning in &report.warnings {
        eprintln!("  - {warning}");
    }
    if cli.strict {
        eprintln!("{} item(s) skipped", report.warnings.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

//! Print an item's source as the source endpoint would return it.
//!
//! Exit status: 0 on success, 2 for a bad type or id, 3 when the source file
//! does not exist.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use uivault::config::{ConfigOverrides, VaultConfig};
use uivault::logging::init_logging;
use uivault::source::{SourceResponse, respond};

#[derive(Parser, Debug)]
#[command(name = "vault-source")]
#[command(about = "Fetch the source of one item")]
struct Cli {
    /// Item type: component, section or template.
    #[arg(long = "type")]
    item_type: Option<String>,
    /// Item id.
    #[arg(long)]
    id: Option<String>,
    /// Items directory; defaults to the configured one.
    #[arg(long)]
    items: Option<PathBuf>,
    /// Vault root; discovered from the working directory when omitted.
    #[arg(long)]
    root: Option<PathBuf>,
    /// Print the bare source text instead of the JSON body.
    #[arg(long)]
    raw: bool,
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
        ..ConfigOverrides::default()
    })
    .context("resolving vault configuration")?;

    let (status, body) = respond(
        &config.items_dir,
        cli.item_type.as_deref(),
        cli.id.as_deref(),
    );

    match (&body, cli.raw) {
        (SourceResponse::Source { source }, true) => print!("{source}"),
        (SourceResponse::Error { error }, true) => eprintln!("{error}"),
        (_, false) => println!("{}", serde_json::to_string(&body)?),
    }

    Ok(match status {
        200 => ExitCode::SUCCESS,
        404 => ExitCode::from(3),
        _ => ExitCode::from(2),
    })
}

//! Query the index artifact the way the workbench sidebar does.
//!
//! Usage:
//!   vault-search hero
//!   vault-search --tag marketing,saas --type section
//!   vault-search --facets

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use uivault::config::{ConfigOverrides, VaultConfig};
use uivault::logging::init_logging;
use uivault::{
    Facets, IndexEntry, ItemRegistry, ItemStatus, ItemType, SearchFilters, SearchHit, SearchIndex,
};

#[derive(Parser, Debug)]
#[command(name = "vault-search")]
#[command(about = "Fuzzy search and filter the item index")]
struct Cli {
    /// Free-text query; omit to list everything that passes the filters.
    #[arg(default_value = "")]
    query: String,
    /// Index artifact to read.
    #[arg(long)]
    index: Option<PathBuf>,
    /// Vault root; discovered from the working directory when omitted.
    #[arg(long)]
    root: Option<PathBuf>,
    /// Restrict to one item type.
    #[arg(long = "type")]
    item_type: Option<ItemType>,
    /// Keep items carrying any of these tags (repeat or comma-separate).
    #[arg(long = "tag", value_delimiter = ',')]
    tags: Vec<String>,
    /// Keep items in any of these collections (repeat or comma-separate).
    #[arg(long = "collection", value_delimiter = ',')]
    collections: Vec<String>,
    /// Keep items with any of these statuses.
    #[arg(long = "status", value_delimiter = ',')]
    statuses: Vec<ItemStatus>,
    /// Print results as JSON.
    #[arg(long)]
    json: bool,
    /// Print tag, collection and type counts instead of results.
    #[arg(long)]
    facets: bool,
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct JsonHit<'a> {
    #[serde(flatten)]
    entry: &'a IndexEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = VaultConfig::resolve(&ConfigOverrides {
        root: cli.root.clone(),
        output: cli.index.clone(),
        ..ConfigOverrides::default()
    })
    .context("resolving vault configuration")?;
    let registry = ItemRegistry::load(&config.output)?;

    if cli.facets {
        let facets = Facets::collect(registry.entries());
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&facets)?);
        } else {
            print_facets(&facets);
        }
        return Ok(());
    }

    let filters = SearchFilters {
        item_type: cli.item_type,
        tags: cli.tags,
        collections: cli.collections,
        statuses: cli.statuses,
    };
    let index = SearchIndex::new(registry.entries().to_vec());
    let hits = index.search_scored(&cli.query, &filters);

    if cli.json {
        let rows: Vec<JsonHit<'_>> = hits
            .iter()
            .map(|hit| JsonHit {
                entry: hit.item,
                score: hit.score,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_hits(&hits);
    }
    Ok(())
}

fn print_hits(hits: &[SearchHit<'_, IndexEntry>]) {
    if hits.is_empty() {
        println!("No items found");
        return;
    }
    for hit in hits {
        let meta = &hit.item.meta;
        match hit.score {
            Some(score) => println!(
                "{:<9} {:<24} {} ({score:.3})",
                meta.item_type.as_str(),
                meta.id.as_str(),
                meta.name
            ),
            None => println!(
                "{:<9} {:<24} {}",
                meta.item_type.as_str(),
                meta.id.as_str(),
                meta.name
            ),
        }
    }
    println!("\n{} item(s)", hits.len());
}

fn print_facets(facets: &Facets) {
    println!("Types:");
    println!("  all: {}", facets.types.all);
    for item_type in ItemType::ALL {
        println!("  {item_type}: {}", facets.types.get(item_type));
    }
    println!("Tags:");
    for (tag, count) in &facets.tags {
        println!("  {tag}: {count}");
    }
    println!("Collections:");
    for (collection, count) in &facets.collections {
        println!("  {collection}: {count}");
    }
}

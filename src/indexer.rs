//! Metadata indexer: scans the item tree and emits the index artifact.
//!
//! Every item directory is handled in isolation. A broken item turns into an
//! `ItemWarning` and the scan moves on; only run-level problems (missing
//! items root, unreadable category directory, unwritable output) fail the
//! whole run.

use crate::catalog::{IndexEntry, ItemId, ItemType, RegistryIndex};
use crate::metadata_validation::{MetaSchema, check_item_layout, validate_item_meta};
use anyhow::{Context, Result, bail};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Metadata definition files, in lookup order.
pub const METADATA_FILES: [&str; 2] = ["meta.toml", "meta.json"];
/// Top-level key holding the item metadata inside a definition file.
pub const METADATA_EXPORT: &str = "meta";
/// Optional per-item documentation file.
pub const README_FILE: &str = "README.md";

/// A per-item problem. Items with warnings are left out of the artifact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemWarning {
    #[error("missing metadata: {0}")]
    MissingMetadata(String),
    #[error("no metadata export found: {0}")]
    NoMetadataExport(String),
    #[error("error processing {label}: {details}")]
    Invalid { label: String, details: String },
}

impl ItemWarning {
    /// `<category>/<dir>` of the item the warning refers to.
    pub fn label(&self) -> &str {
        match self {
            ItemWarning::MissingMetadata(label) | ItemWarning::NoMetadataExport(label) => label,
            ItemWarning::Invalid { label, .. } => label,
        }
    }
}

/// Outcome of one indexing run.
#[derive(Debug)]
pub struct IndexReport {
    pub index: RegistryIndex,
    pub warnings: Vec<ItemWarning>,
}

/// Scan `items_root` and build the index without writing it.
pub fn build_index(items_root: &Path, schema: &MetaSchema) -> Result<IndexReport> {
    if !items_root.is_dir() {
        bail!("items root {} is not a directory", items_root.display());
    }

    let mut items = Vec::new();
    let mut warnings = Vec::new();
    let mut seen: BTreeSet<ItemId> = BTreeSet::new();

    for category in ItemType::ALL {
        let category_dir = items_root.join(category.dir_name());
        if !category_dir.is_dir() {
            debug!(category = category.dir_name(), "category directory absent");
            continue;
        }

        for dir_name in item_dirs(&category_dir)? {
            let label = format!("{}/{dir_name}", category.dir_name());
            debug!(item = %label, "indexing item");
            match index_item(&category_dir.join(&dir_name), category, &dir_name, schema, &seen) {
                Ok(entry) => {
                    seen.insert(entry.meta.id.clone());
                    items.push(entry);
                }
                Err(warning) => {
                    debug!(item = %label, %warning, "skipping item");
                    warnings.push(warning);
                }
            }
        }
    }

    info!(
        items = items.len(),
        warnings = warnings.len(),
        root = %items_root.display(),
        "index built"
    );

    Ok(IndexReport {
        index: RegistryIndex {
            items,
            generated_at: generated_at_now(),
        },
        warnings,
    })
}

/// Build the index and write it to `output`.
pub fn run(items_root: &Path, output: &Path, schema: &MetaSchema) -> Result<IndexReport> {
    let report = build_index(items_root, schema)?;
    write_index(output, &report.index)?;
    info!(output = %output.display(), "index written");
    Ok(report)
}

/// Write the artifact as pretty JSON, replacing any previous file.
pub fn write_index(output: &Path, index: &RegistryIndex) -> Result<()> {
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("creating output directory {}", parent.display()))?;

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("creating temporary file in {}", parent.display()))?;
    serde_json::to_writer_pretty(&mut temp, index).context("serializing index")?;
    temp.write_all(b"\n")?;
    temp.persist(output)
        .map_err(|err| err.error)
        .with_context(|| format!("writing index {}", output.display()))?;
    Ok(())
}

fn generated_at_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Immediate child directories of a category, sorted, dot entries skipped.
fn item_dirs(category_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(category_dir)
        .with_context(|| format!("reading category directory {}", category_dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("reading category directory {}", category_dir.display()))?;
        if !entry.file_type().map(|kind| kind.is_dir()).unwrap_or(false) {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            debug!(path = %entry.path().display(), "skipping non UTF-8 directory name");
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

fn index_item(
    item_dir: &Path,
    category: ItemType,
    dir_name: &str,
    schema: &MetaSchema,
    seen: &BTreeSet<ItemId>,
) -> Result<IndexEntry, ItemWarning> {
    let label = format!("{}/{dir_name}", category.dir_name());
    let invalid = |details: String| ItemWarning::Invalid {
        label: label.clone(),
        details,
    };

    let Some(meta_file) = metadata_file(item_dir) else {
        return Err(ItemWarning::MissingMetadata(label.clone()));
    };

    let document = read_metadata(&meta_file).map_err(|err| invalid(format!("{err:#}")))?;
    let export = match document.get(METADATA_EXPORT) {
        Some(Value::Null) | None => return Err(ItemWarning::NoMetadataExport(label.clone())),
        Some(export) => export,
    };

    let meta = validate_item_meta(schema, export).map_err(|errors| invalid(errors.join("; ")))?;

    let mut errors = check_item_layout(&meta, category, dir_name);
    if seen.contains(&meta.id) {
        errors.push(format!("duplicate id '{}' already indexed", meta.id));
    }
    if !errors.is_empty() {
        return Err(invalid(errors.join("; ")));
    }

    Ok(IndexEntry {
        path: meta.storage_path(),
        has_readme: item_dir.join(README_FILE).is_file(),
        meta,
    })
}

fn metadata_file(item_dir: &Path) -> Option<PathBuf> {
    METADATA_FILES
        .iter()
        .map(|name| item_dir.join(name))
        .find(|path| path.is_file())
}

/// Parse a definition file into a JSON value. The file is data only.
fn read_metadata(path: &Path) -> Result<Value> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let is_json = path.extension().and_then(|ext| ext.to_str()) == Some("json");
    if is_json {
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
    } else {
        let table: toml::Table =
            toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
        Ok(toml_to_json(toml::Value::Table(table)))
    }
}

/// Convert TOML to JSON; datetimes become their RFC 3339 text.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(text) => Value::String(text),
        toml::Value::Integer(number) => Value::from(number),
        toml::Value::Float(number) => serde_json::Number::from_f64(number)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(flag) => Value::Bool(flag),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(values) => Value::Array(values.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

//! Deserializable representation of item metadata and the index artifact.
//!
//! The types mirror `schema/item_meta.schema.json` and the `dist/index.json`
//! layout so the indexer, the registry, and the search engine share one
//! record shape. Keys are camelCase on the wire.

use crate::catalog::identity::{ItemId, ItemStatus, ItemType};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Styling label applied when an item does not declare one.
pub const DEFAULT_STYLING: &str = "tailwind";
/// Relative prefix for item storage paths recorded in the index.
pub const STORAGE_PREFIX: &str = "items";
/// File name holding an item's copyable source.
pub const SOURCE_FILE: &str = "source.tsx";

fn default_styling() -> Vec<String> {
    vec![DEFAULT_STYLING.to_string()]
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Technology labels grouped by concern.
pub struct TechStack {
    #[serde(default = "default_styling")]
    pub styling: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<Vec<String>>,
}

impl Default for TechStack {
    fn default() -> Self {
        Self {
            styling: default_styling(),
            motion: None,
            icons: None,
            other: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One catalog entry as authored in its `meta.toml`.
///
/// Optional fields carry the schema defaults: no collections, `draft`
/// status, and tailwind styling.
pub struct ItemMeta {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub status: ItemStatus,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub tech: TechStack,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_height: Option<f64>,
}

impl ItemMeta {
    /// Storage path relative to the registry package, e.g.
    /// `items/components/testimonial-card`.
    pub fn storage_path(&self) -> String {
        format!(
            "{STORAGE_PREFIX}/{}/{}",
            self.item_type.dir_name(),
            self.id
        )
    }

    /// Path of the copyable source file, as shown by the workbench.
    pub fn source_path(&self) -> String {
        format!("{}/{SOURCE_FILE}", self.storage_path())
    }
}

impl AsRef<ItemMeta> for ItemMeta {
    fn as_ref(&self) -> &ItemMeta {
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Validated metadata plus the fields the indexer derives from disk.
pub struct IndexEntry {
    #[serde(flatten)]
    pub meta: ItemMeta,
    pub path: String,
    pub has_readme: bool,
}

impl AsRef<ItemMeta> for IndexEntry {
    fn as_ref(&self) -> &ItemMeta {
        &self.meta
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// The `dist/index.json` artifact.
pub struct RegistryIndex {
    pub items: Vec<IndexEntry>,
    pub generated_at: String,
}

/// Read and parse an index artifact from disk without additional validation.
pub fn load_index_from_path(path: &Path) -> Result<RegistryIndex> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading index {}", path.display()))?;
    let index: RegistryIndex = serde_json::from_str(&data)
        .with_context(|| format!("parsing index {}", path.display()))?;
    Ok(index)
}

//! Holds the indexed items for lookup by id.
//!
//! The registry replaces a hardcoded item list: it is populated from the
//! index artifact, keeps artifact order for display, and resolves ids for
//! selection and source lookups.

use crate::catalog::identity::ItemId;
use crate::catalog::model::{IndexEntry, RegistryIndex, load_index_from_path};
use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default)]
/// In-memory store for index entries keyed by `ItemId`.
pub struct ItemRegistry {
    entries: Vec<IndexEntry>,
    by_id: BTreeMap<ItemId, usize>,
    generated_at: Option<String>,
}

impl ItemRegistry {
    /// Build a registry from a parsed artifact, rejecting duplicate ids.
    pub fn from_index(index: RegistryIndex) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        for (position, entry) in index.items.iter().enumerate() {
            if by_id.insert(entry.meta.id.clone(), position).is_some() {
                bail!("duplicate item id {} in index", entry.meta.id);
            }
        }
        Ok(Self {
            entries: index.items,
            by_id,
            generated_at: Some(index.generated_at),
        })
    }

    /// Load `dist/index.json` (or any artifact path) into a registry.
    pub fn load(path: &Path) -> Result<Self> {
        let index = load_index_from_path(path)?;
        Self::from_index(index).with_context(|| format!("loading {}", path.display()))
    }

    /// Fetch an entry by id, if present.
    pub fn get(&self, id: &ItemId) -> Option<&IndexEntry> {
        self.by_id.get(id).map(|&position| &self.entries[position])
    }

    /// Entries in artifact order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generated_at(&self) -> Option<&str> {
        self.generated_at.as_deref()
    }

    /// Copyable source path for an item, e.g. `items/sections/hero/source.tsx`.
    pub fn source_path(&self, id: &ItemId) -> Option<String> {
        self.get(id).map(|entry| entry.meta.source_path())
    }
}

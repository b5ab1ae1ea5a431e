//! Shared library for the UI vault tooling.
//!
//! The crate exposes the item metadata types, the metadata indexer that
//! produces `dist/index.json`, the fuzzy search and filter engine used by the
//! workbench, and the source retrieval helper. Public functions here form the
//! contract that the `vault-*` binaries depend on: vault root discovery,
//! index building, and search.

use std::fs;
use std::path::{Path, PathBuf};

pub mod catalog;
pub mod config;
pub mod indexer;
pub mod logging;
pub mod metadata_validation;
pub mod schema_loader;
pub mod search;
pub mod source;

pub use catalog::{
    IndexEntry, ItemId, ItemMeta, ItemRegistry, ItemStatus, ItemType, RegistryIndex, TechStack,
    load_index_from_path,
};
pub use indexer::{IndexReport, ItemWarning, build_index};
pub use metadata_validation::{MetaSchema, validate_item_meta};
pub use search::{Direction, Facets, SearchFilters, SearchHit, SearchIndex, navigate};
pub use source::{SourceError, SourceRequest, read_source};

/// Marker file that pins the vault root.
pub const CONFIG_FILE: &str = "vault.toml";
/// Default directory holding the `components`/`sections`/`templates` tree.
pub const DEFAULT_ITEMS_DIR: &str = "items";

/// Returns true when `candidate` looks like a vault root.
///
/// A root either carries `vault.toml` or an `items/` directory with at least
/// one category directory, so arbitrary `items/` folders do not qualify.
fn is_vault_root(candidate: &Path) -> bool {
    if candidate.join(CONFIG_FILE).is_file() {
        return true;
    }
    let items = candidate.join(DEFAULT_ITEMS_DIR);
    ItemType::ALL
        .iter()
        .any(|item_type| items.join(item_type.dir_name()).is_dir())
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_vault_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the nearest vault root at or above `start`.
///
/// Returns `None` when no ancestor qualifies; callers fall back to the
/// working directory.
pub fn find_vault_root(start: &Path) -> Option<PathBuf> {
    search_upwards(start)
}

//! Item catalog wiring.
//!
//! This module wraps per-item metadata and the generated `dist/index.json`
//! artifact. Types here mirror the item metadata schema; callers use
//! `ItemRegistry` for id lookups once an artifact has been loaded.

pub mod identity;
pub mod model;
pub mod registry;

pub use identity::{InvalidItemId, ItemId, ItemStatus, ItemType, UnknownVariant};
pub use model::{
    DEFAULT_STYLING, IndexEntry, ItemMeta, RegistryIndex, SOURCE_FILE, STORAGE_PREFIX, TechStack,
};
pub use registry::ItemRegistry;

pub use model::load_index_from_path;

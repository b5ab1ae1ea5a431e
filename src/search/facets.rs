//! Filter options offered next to the result list.

use crate::catalog::{ItemMeta, ItemType};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub all: usize,
    pub component: usize,
    pub section: usize,
    pub template: usize,
}

impl TypeCounts {
    pub fn get(&self, item_type: ItemType) -> usize {
        match item_type {
            ItemType::Component => self.component,
            ItemType::Section => self.section,
            ItemType::Template => self.template,
        }
    }
}

/// Distinct tags and collections (sorted) with the number of items carrying
/// each, plus per-type counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub tags: BTreeMap<String, usize>,
    pub collections: BTreeMap<String, usize>,
    pub types: TypeCounts,
}

impl Facets {
    pub fn collect<R: AsRef<ItemMeta>>(items: &[R]) -> Self {
        let mut facets = Facets::default();
        for item in items {
            let meta = item.as_ref();
            for tag in &meta.tags {
                *facets.tags.entry(tag.clone()).or_default() += 1;
            }
            for collection in &meta.collections {
                *facets.collections.entry(collection.clone()).or_default() += 1;
            }
            facets.types.all += 1;
            match meta.item_type {
                ItemType::Component => facets.types.component += 1,
                ItemType::Section => facets.types.section += 1,
                ItemType::Template => facets.types.template += 1,
            }
        }
        facets
    }
}

//! Validation helpers for item metadata.
//!
//! `MetaSchema` wraps the compiled item metadata schema. Validation returns
//! every problem it finds rather than the first one so a single warning line
//! can describe the whole item.

use crate::catalog::{ItemMeta, ItemType};
use crate::schema_loader::{
    SchemaLoadOptions, SchemaLoadResult, compile_schema_value, load_json_schema,
};
use anyhow::{Context, Result};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Marker carried by the item metadata schema this crate understands.
pub const ITEM_META_SCHEMA_VERSION: &str = "item_meta_v1";

const BUILTIN_ITEM_META_SCHEMA: &str = include_str!("../schema/item_meta.schema.json");

/// Compiled item metadata schema.
pub struct MetaSchema {
    schema_version: String,
    compiled: JSONSchema,
}

impl MetaSchema {
    /// The schema shipped with the crate (`schema/item_meta.schema.json`).
    pub fn builtin() -> Result<Self> {
        let value: Value = serde_json::from_str(BUILTIN_ITEM_META_SCHEMA)
            .context("parsing built-in item metadata schema")?;
        let allowed = allowed_versions();
        let result =
            compile_schema_value(&value, "built-in item metadata schema", options(&allowed))?;
        Ok(Self::from_result(result))
    }

    /// Load an override schema from disk; its marker must still match.
    pub fn load(path: &Path) -> Result<Self> {
        let allowed = allowed_versions();
        let result = load_json_schema(path, options(&allowed))?;
        Ok(Self::from_result(result))
    }

    fn from_result(result: SchemaLoadResult) -> Self {
        Self {
            schema_version: result.schema_version,
            compiled: result.compiled,
        }
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Validate a metadata value, returning one message per violation.
    pub fn validate(&self, instance: &Value) -> Result<(), Vec<String>> {
        match self.compiled.validate(instance) {
            Ok(()) => Ok(()),
            Err(errors) => Err(errors
                .map(|err| {
                    let location = err.instance_path.to_string();
                    if location.is_empty() {
                        err.to_string()
                    } else {
                        format!("{location}: {err}")
                    }
                })
                .collect()),
        }
    }
}

fn allowed_versions() -> BTreeSet<String> {
    [ITEM_META_SCHEMA_VERSION.to_string()].into_iter().collect()
}

fn options(allowed: &BTreeSet<String>) -> SchemaLoadOptions<'_> {
    SchemaLoadOptions {
        allowed_versions: Some(allowed),
    }
}

/// Validate a raw metadata value and decode it with schema defaults applied.
pub fn validate_item_meta(schema: &MetaSchema, value: &Value) -> Result<ItemMeta, Vec<String>> {
    schema.validate(value)?;
    serde_json::from_value(value.clone()).map_err(|err| vec![err.to_string()])
}

/// Check that validated metadata agrees with where it was found on disk.
///
/// The item id must equal its directory name and the type must match the
/// category directory the item lives under.
pub fn check_item_layout(meta: &ItemMeta, category: ItemType, dir_name: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if meta.id.as_str() != dir_name {
        errors.push(format!(
            "id '{}' does not match directory name '{dir_name}'",
            meta.id
        ));
    }
    if meta.item_type != category {
        errors.push(format!(
            "type '{}' does not belong under {}/",
            meta.item_type,
            category.dir_name()
        ));
    }
    errors
}

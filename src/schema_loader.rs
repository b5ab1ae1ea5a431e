//! Shared JSON Schema loader with schema-marker enforcement.
//!
//! Callers load a schema from disk (or from an embedded copy), check the
//! `x-vault-schema` marker against an allowed set, and compile a JSONSchema
//! validator from the resulting payload.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

/// Result of loading and compiling a JSON Schema.
pub struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// JSON pointer to the schema marker inside a schema payload.
pub const SCHEMA_MARKER_POINTER: &str = "/x-vault-schema";

/// Controls how schemas are checked before compilation.
#[derive(Default)]
pub struct SchemaLoadOptions<'a> {
    /// Allowed marker values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
}

pub fn load_json_schema(path: &Path, options: SchemaLoadOptions<'_>) -> Result<SchemaLoadResult> {
    let schema_value: Value = serde_json::from_reader(
        File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
    )
    .with_context(|| format!("parsing schema {}", path.display()))?;

    compile_schema_value(&schema_value, &path.display().to_string(), options)
}

/// Compile an already parsed schema. `origin` only labels error messages.
pub fn compile_schema_value(
    schema_value: &Value,
    origin: &str,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let schema_version = extract_schema_version(schema_value)
        .ok_or_else(|| anyhow!("schema {origin} missing marker at {SCHEMA_MARKER_POINTER}"))?;

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    // Compilation errors borrow the schema value, so render them eagerly.
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema_value)
        .map_err(|err| anyhow!("compiling schema {origin}: {err}"))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

fn extract_schema_version(schema: &Value) -> Option<String> {
    let version = schema
        .pointer(SCHEMA_MARKER_POINTER)
        .and_then(Value::as_str)?;
    if !version.is_empty()
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}

//! Vault path configuration.
//!
//! Each setting resolves as: command line flag, then environment variable,
//! then `<root>/vault.toml`, then the built-in default. Flag and environment
//! paths are taken as given; paths from `vault.toml` are relative to the root.

use crate::{CONFIG_FILE, DEFAULT_ITEMS_DIR, find_vault_root};
use serde::Deserialize;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_ROOT: &str = "VAULT_ROOT";
pub const ENV_ITEMS_DIR: &str = "VAULT_ITEMS_DIR";
pub const ENV_INDEX_PATH: &str = "VAULT_INDEX_PATH";
pub const ENV_SCHEMA_PATH: &str = "VAULT_SCHEMA_PATH";

/// Default artifact location, relative to the root.
pub const DEFAULT_OUTPUT: &str = "dist/index.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Contents of `vault.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub items_dir: Option<PathBuf>,
    /// Index artifact path.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Metadata schema override.
    #[serde(default)]
    pub schema: Option<PathBuf>,
}

impl ConfigFile {
    /// Load `<root>/vault.toml`; a missing file yields `None`.
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        let file = toml::from_str(&text).map_err(|source| ConfigError::Toml { path, source })?;
        Ok(Some(file))
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root: Option<PathBuf>,
    pub items_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub schema: Option<PathBuf>,
}

/// Fully resolved paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    pub root: PathBuf,
    pub items_dir: PathBuf,
    pub output: PathBuf,
    /// `None` selects the embedded schema.
    pub schema: Option<PathBuf>,
}

impl VaultConfig {
    /// Resolve against the process working directory and environment.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let cwd = env::current_dir()?;
        Self::resolve_with(overrides, &cwd, |key| env::var_os(key))
    }

    /// Resolve with an explicit working directory and environment lookup.
    pub fn resolve_with<F>(overrides: &ConfigOverrides, cwd: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let from_env = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };

        let root = overrides
            .root
            .clone()
            .or_else(|| from_env(ENV_ROOT))
            .or_else(|| find_vault_root(cwd))
            .unwrap_or_else(|| cwd.to_path_buf());

        let file = ConfigFile::load(&root)?.unwrap_or_default();
        let from_file = |value: Option<PathBuf>| value.map(|path| root.join(path));

        let items_dir = overrides
            .items_dir
            .clone()
            .or_else(|| from_env(ENV_ITEMS_DIR))
            .or_else(|| from_file(file.items_dir.clone()))
            .unwrap_or_else(|| root.join(DEFAULT_ITEMS_DIR));
        let output = overrides
            .output
            .clone()
            .or_else(|| from_env(ENV_INDEX_PATH))
            .or_else(|| from_file(file.output.clone()))
            .unwrap_or_else(|| root.join(DEFAULT_OUTPUT));
        let schema = overrides
            .schema
            .clone()
            .or_else(|| from_env(ENV_SCHEMA_PATH))
            .or_else(|| from_file(file.schema.clone()));

        Ok(Self {
            root,
            items_dir,
            output,
            schema,
        })
    }
}

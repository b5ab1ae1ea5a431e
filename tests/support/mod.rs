#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Checkout root, which doubles as a vault with the seed items.
pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn seed_items() -> PathBuf {
    repo_root().join("items")
}

pub fn vault_index_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vault-index"))
}

pub fn vault_search_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vault-search"))
}

pub fn vault_source_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vault-source"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Scratch vault with an `items/` tree built item by item.
pub struct FixtureVault {
    dir: TempDir,
}

impl FixtureVault {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("allocating fixture vault")?;
        fs::create_dir_all(dir.path().join("items"))?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn items(&self) -> PathBuf {
        self.root().join("items")
    }

    pub fn output(&self) -> PathBuf {
        self.root().join("dist/index.json")
    }

    /// Write `file` with `body` under `items/<category>/<dir>/`.
    pub fn write(&self, category: &str, dir: &str, file: &str, body: &str) -> Result<PathBuf> {
        let item_dir = self.items().join(category).join(dir);
        fs::create_dir_all(&item_dir)?;
        let path = item_dir.join(file);
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    /// A valid item whose id matches its directory.
    pub fn add_item(&self, category: &str, item_type: &str, id: &str, tags: &[&str]) -> Result<()> {
        let tags = tags
            .iter()
            .map(|tag| format!("\"{tag}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let body = format!(
            "[meta]\n\
             id = \"{id}\"\n\
             type = \"{item_type}\"\n\
             name = \"{id}\"\n\
             description = \"Fixture {item_type}.\"\n\
             tags = [{tags}]\n\
             createdAt = \"2026-01-03\"\n\
             updatedAt = \"2026-01-03\"\n"
        );
        self.write(category, id, "meta.toml", &body)?;
        Ok(())
    }
}

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use crate::domain::form_state::FormStore;

pub fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("ronda-tui"))
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

fn read_trimmed(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Ok(Some(raw.to_string()))
}

fn remove_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn token_path() -> Result<PathBuf> {
    Ok(root_path()?.join("session"))
}

pub fn load_token() -> Result<Option<String>> {
    read_trimmed(&token_path()?)
}

pub fn save_token(token: &str) -> Result<()> {
    secure_write(token_path()?.as_path(), token)
}

pub fn clear_token() -> Result<()> {
    remove_if_exists(&token_path()?)
}

/// Stores each key as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileFormStore {
    root: PathBuf,
}

impl FileFormStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn in_config_dir() -> Result<Self> {
        Ok(Self::new(root_path()?))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl FormStore for FileFormStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        read_trimmed(&self.path_for(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        secure_write(&self.path_for(key), value)
    }

    fn clear(&self, key: &str) -> Result<()> {
        remove_if_exists(&self.path_for(key))
    }
}

// src/community/repository.rs
//! Durable storage for the community store: one JSON document on disk,
//! loaded at startup and rewritten on every mutation.

use crate::community::types::CommunityState;
use crate::error::{CatalogError, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

pub struct CommunityRepository {
    path: PathBuf,
}

impl CommunityRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted state. A missing file is a fresh start, not an
    /// error; a present-but-unreadable file is.
    pub fn load(&self) -> Result<CommunityState> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let state: CommunityState = serde_json::from_str(&contents)?;
                info!(
                    "Loaded community state from {} ({} perfumes with reviews)",
                    self.path.display(),
                    state.reviews.len()
                );
                Ok(state)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "No community state at {}, starting empty",
                    self.path.display()
                );
                Ok(CommunityState::default())
            }
            Err(e) => Err(CatalogError::StorageError(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Writes the full state out, creating parent directories as needed.
    pub fn save(&self, state: &CommunityState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, contents).map_err(|e| {
            CatalogError::StorageError(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })?;
        debug!("Saved community state to {}", self.path.display());
        Ok(())
    }

    /// Removes the persisted document entirely. Already-absent is fine.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed community state at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CatalogError::StorageError(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn load_of_missing_file_yields_default_state() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CommunityRepository::new(dir.path().join("missing.json"));

        let state = repo.load().unwrap();
        assert_eq!(state, CommunityState::default());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/community.json");
        let repo = CommunityRepository::new(&path);

        repo.save(&CommunityState::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CommunityRepository::new(dir.path().join("community.json"));

        repo.save(&CommunityState::default()).unwrap();
        repo.remove().unwrap();
        repo.remove().unwrap();
        assert!(!repo.path().exists());
    }

    #[test]
    fn load_of_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("community.json");
        std::fs::write(&path, "not json").unwrap();
        let repo = CommunityRepository::new(&path);

        assert!(repo.load().is_err());
    }
}

//! Save file on disk

use std::fs;
use std::path::{Path, PathBuf};

use super::PersistenceError;
use super::record::SaveRecord;
use crate::sim::GameState;

/// A single save slot backed by one file
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    /// Write to a temp file and rename over the slot
    pub fn write(&self, state: &GameState) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = SaveRecord::capture(state).encode();
        let tmp = self.tmp_path();
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn read(&self) -> Result<SaveRecord, PersistenceError> {
        let bytes = fs::read(&self.path)?;
        let record = SaveRecord::decode(&bytes)?;
        record.validate()?;
        Ok(record)
    }

    /// Returns false (and logs why) if the game could not be saved
    pub fn save(&self, state: &GameState) -> bool {
        match self.write(state) {
            Ok(()) => {
                log::info!("Game saved to {}", self.path.display());
                true
            }
            Err(e) => {
                log::warn!("Failed to save game: {e}");
                false
            }
        }
    }

    /// Returns false (and leaves `state` untouched) if no valid save could be read
    pub fn load(&self, state: &mut GameState) -> bool {
        match self.read().and_then(|record| record.restore_into(state)) {
            Ok(()) => {
                log::info!("Game loaded from {}", self.path.display());
                true
            }
            Err(e) => {
                log::warn!("Failed to load game: {e}");
                false
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Remove the save file. Returns true if a file was deleted.
    pub fn delete(&self) -> bool {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Deleted save {}", self.path.display());
                true
            }
            Err(e) => {
                log::debug!("No save deleted: {e}");
                false
            }
        }
    }
}

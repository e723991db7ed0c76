//! # Mission persistence
//!
//! Durable storage of the mission's waypoint indices, so that a boat which
//! loses power mid-mission resumes on the same leg.
//!
//! Both indices are always written together. The file store writes a new
//! file, syncs it, and atomically renames it over the old one, so that a
//! power loss at any point leaves either the old pair or the new pair on
//! disk, never a mix of the two.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{info, trace};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The persisted pair of waypoint indices.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionIndices {
    /// Index of the active waypoint
    pub current: usize,

    /// Index of the waypoint the boat departed from, the start of the current
    /// leg.
    pub last: usize,
}

/// Mission indices stored in a JSON file.
pub struct FileMissionStore {
    path: PathBuf,
}

/// Mission indices held in memory only, for simulation and testing.
#[derive(Debug, Default, Clone)]
pub struct MemMissionStore {
    indices: MissionIndices,

    /// Number of times `store` has been called
    pub num_stores: usize,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Durable storage of the mission indices.
pub trait MissionPersistence {
    /// Load the last stored indices.
    fn load(&self) -> Result<MissionIndices, MissionStoreError>;

    /// Store the indices.
    ///
    /// The indices must be durable when this function returns.
    fn store(&mut self, indices: MissionIndices) -> Result<(), MissionStoreError>;
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum MissionStoreError {
    #[error("Could not read the mission state file {0:?}: {1}")]
    ReadError(PathBuf, std::io::Error),

    #[error("Could not write the mission state file {0:?}: {1}")]
    WriteError(PathBuf, std::io::Error),

    #[error("The mission state file is corrupt: {0}")]
    Corrupt(serde_json::Error),

    #[error("Could not serialize the mission state: {0}")]
    SerializeError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MissionIndices {
    pub fn new(current: usize, last: usize) -> Self {
        Self { current, last }
    }

    /// The indices after arriving at the current waypoint.
    pub fn advanced(&self) -> Self {
        Self {
            current: self.current + 1,
            last: self.current,
        }
    }
}

impl FileMissionStore {
    /// Create a store using the given file.
    ///
    /// The file does not need to exist, a missing file loads as a fresh
    /// mission starting at waypoint 0.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl MissionPersistence for FileMissionStore {
    fn load(&self) -> Result<MissionIndices, MissionStoreError> {
        let s = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "No mission state at {:?}, starting from waypoint 0",
                    self.path
                );
                return Ok(MissionIndices::default());
            }
            Err(e) => return Err(MissionStoreError::ReadError(self.path.clone(), e)),
        };

        serde_json::from_str(&s).map_err(MissionStoreError::Corrupt)
    }

    fn store(&mut self, indices: MissionIndices) -> Result<(), MissionStoreError> {
        let tmp_path = self.tmp_path();
        let json = serde_json::to_vec(&indices).map_err(MissionStoreError::SerializeError)?;

        let write_err = |e| MissionStoreError::WriteError(self.path.clone(), e);

        // Write and sync the new pair before it replaces the old one
        let mut file = File::create(&tmp_path).map_err(write_err)?;
        file.write_all(&json).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        fs::rename(&tmp_path, &self.path).map_err(write_err)?;

        // Make the rename itself durable. Directories can't be opened for
        // syncing on every platform so a failure here is not fatal.
        if let Some(dir) = self.path.parent() {
            if let Ok(d) = File::open(dir) {
                d.sync_all().ok();
            }
        }

        trace!("Mission indices stored: {:?}", indices);

        Ok(())
    }
}

impl MemMissionStore {
    pub fn new(indices: MissionIndices) -> Self {
        Self {
            indices,
            num_stores: 0,
        }
    }
}

impl MissionPersistence for MemMissionStore {
    fn load(&self) -> Result<MissionIndices, MissionStoreError> {
        Ok(self.indices)
    }

    fn store(&mut self, indices: MissionIndices) -> Result<(), MissionStoreError> {
        self.indices = indices;
        self.num_stores += 1;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("boat_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_advanced() {
        assert_eq!(MissionIndices::new(3, 2).advanced(), MissionIndices::new(4, 3));
        assert_eq!(MissionIndices::default().advanced(), MissionIndices::new(1, 0));
    }

    #[test]
    fn test_missing_file_is_fresh_mission() {
        let store = FileMissionStore::new(temp_path("mission_missing"));
        assert_eq!(store.load().unwrap(), MissionIndices::default());
    }

    #[test]
    fn test_store_then_load() {
        let path = temp_path("mission_store");
        let mut store = FileMissionStore::new(&path);

        store.store(MissionIndices::new(4, 3)).unwrap();
        assert_eq!(store.load().unwrap(), MissionIndices::new(4, 3));

        // A second store handle on the same file sees the same pair, as the
        // boat would after a restart
        let restarted = FileMissionStore::new(&path);
        assert_eq!(restarted.load().unwrap(), MissionIndices::new(4, 3));

        // No temporary file is left behind
        assert!(!store.tmp_path().exists());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_corrupt_file() {
        let path = temp_path("mission_corrupt");
        fs::write(&path, "{\"current\": 1").unwrap();

        let store = FileMissionStore::new(&path);
        assert!(matches!(store.load(), Err(MissionStoreError::Corrupt(_))));

        fs::remove_file(&path).ok();
    }
}

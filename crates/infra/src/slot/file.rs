//! File-backed storage slot
//!
//! One file per key under a shared data directory. Writes go through a
//! temp file, fsync, and rename so a concurrent reader never observes a
//! torn value. Writes are last-write-wins; contexts racing on the same key
//! simply overwrite each other.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracklet_core::SlotBackend;
use tracklet_domain::{Result, TrackletError};

/// Distinguishes temp files of concurrent writers within one process;
/// the process id covers writers in other processes.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Durable slot backend shared by all contexts pointed at the same
/// directory
#[derive(Debug, Clone)]
pub struct FileSlot {
    base_dir: PathBuf,
}

impl FileSlot {
    /// Open (and create if needed) a slot directory.
    ///
    /// # Errors
    /// Returns `TrackletError::Storage` if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(|e| {
            TrackletError::Storage(format!(
                "Failed to create slot directory {}: {e}",
                base_dir.display()
            ))
        })?;
        Ok(Self { base_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

impl SlotBackend for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TrackletError::Storage(format!("Failed to read slot {key}: {e}"))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        // The temp name must be unique per write: a shared name would let
        // one racing writer rename a file another is still filling.
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let temp = self.base_dir.join(format!(".{key}.{}.{seq}.tmp", std::process::id()));

        let write_atomic = || -> std::io::Result<()> {
            let mut file = File::create(&temp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp, &path)
        };

        write_atomic().map_err(|e| {
            let _ = fs::remove_file(&temp);
            TrackletError::Storage(format!("Failed to write slot {key}: {e}"))
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TrackletError::Storage(format!("Failed to remove slot {key}: {e}"))),
        }
    }
}

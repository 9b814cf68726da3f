//! In-process storage slot
//!
//! Survives only for the lifetime of the owning context. Used directly in
//! tests and as the degrade target of [`crate::slot::FallbackSlot`].

use std::collections::HashMap;

use parking_lot::Mutex;
use tracklet_core::SlotBackend;
use tracklet_domain::Result;

/// Map-backed slot with no durability
#[derive(Debug, Default)]
pub struct MemorySlot {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotBackend for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

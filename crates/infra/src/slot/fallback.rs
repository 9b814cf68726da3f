//! Degrading slot backend
//!
//! Wraps a durable backend and falls back to an in-process map the moment
//! a write to the durable one fails. The UI must keep functioning without
//! persistence, so failures are logged and swallowed rather than surfaced.
//!
//! Once a key has degraded, reads for that key come from memory for the
//! rest of this context's lifetime. That keeps read-your-writes intact at
//! the cost of never seeing later foreign writes to the broken backend,
//! which by definition is not accepting writes anyway.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracklet_core::SlotBackend;
use tracklet_domain::Result;

use super::memory::MemorySlot;

/// Durable-first slot backend with a silent in-memory degrade
pub struct FallbackSlot {
    durable: Arc<dyn SlotBackend>,
    memory: MemorySlot,
    degraded: Mutex<HashSet<String>>,
}

impl FallbackSlot {
    #[must_use]
    pub fn new(durable: Arc<dyn SlotBackend>) -> Self {
        Self { durable, memory: MemorySlot::new(), degraded: Mutex::new(HashSet::new()) }
    }

    /// Whether writes to `key` have degraded to memory
    #[must_use]
    pub fn is_degraded(&self, key: &str) -> bool {
        self.degraded.lock().contains(key)
    }
}

impl SlotBackend for FallbackSlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.is_degraded(key) {
            return self.memory.read(key);
        }
        match self.durable.read(key) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(error = %e, key, "slot.read_degraded");
                self.memory.read(key)
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if !self.is_degraded(key) {
            match self.durable.write(key, value) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(error = %e, key, "slot.write_degraded");
                    self.degraded.lock().insert(key.to_string());
                }
            }
        }
        self.memory.write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.memory.remove(key)?;
        if !self.is_degraded(key) {
            if let Err(e) = self.durable.remove(key) {
                tracing::warn!(error = %e, key, "slot.remove_degraded");
                self.degraded.lock().insert(key.to_string());
            }
        }
        Ok(())
    }
}

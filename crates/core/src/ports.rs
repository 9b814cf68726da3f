//! Port interfaces for the persistence and collaborator boundaries
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use tracklet_domain::{LogbookEntry, LogbookOutcome, Result, SelectOption};

/// A shared key/value storage facility holding the snapshot and instance
/// slots. Reads and writes are synchronous and non-blocking; writes are
/// last-write-wins with no locking.
pub trait SlotBackend: Send + Sync {
    /// Read the raw value stored under `key`, if any
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`
    fn remove(&self, key: &str) -> Result<()>;
}

/// A change observed on a watched storage slot
///
/// `value` is the raw contents at observation time, or `None` when the key
/// was removed. Delivery is at-least-once per distinct observed write and
/// the payload may already be stale when the handler runs; consumers that
/// need the latest value should re-read the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotChange {
    pub key: String,
    pub value: Option<String>,
}

/// Remote project/service lookup
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Free-text project search returning label/value pairs
    async fn search_projects(&self, query: &str) -> Result<Vec<SelectOption>>;

    /// Services available for one project
    async fn services_for_project(&self, project_id: &str) -> Result<Vec<SelectOption>>;
}

/// Logbook submission endpoint
#[async_trait]
pub trait LogbookSink: Send + Sync {
    /// Submit a completed activity
    ///
    /// # Errors
    /// Returns `TrackletError::Network` when the endpoint is unreachable or
    /// answers with an error status; the caller surfaces this to the user.
    async fn submit(&self, entry: &LogbookEntry) -> Result<LogbookOutcome>;
}

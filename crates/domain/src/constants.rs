//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Schema version stamped onto every persisted snapshot
pub const SNAPSHOT_VERSION: u32 = 2;

/// Reserved metadata field carrying the schema version
pub const VERSION_FIELD: &str = "_v";

/// Storage slot holding the persisted snapshot
pub const SNAPSHOT_SLOT: &str = "tracklet.snapshot";

/// Storage slot used for single-instance arbitration
pub const INSTANCE_SLOT: &str = "tracklet.instance";

/// Activity keys observed in corrupted snapshots; filtered on every load
pub const RESERVED_ACTIVITY_KEYS: [&str; 3] = ["", "null", "undefined"];

/// Default interval at which the slot watcher polls for foreign writes
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

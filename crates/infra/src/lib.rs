//! # Tracklet Infrastructure
//!
//! Adapters behind the core's port traits.
//!
//! This crate contains:
//! - Storage slot backends (file-backed, in-memory, degrading fallback)
//! - The cross-context slot watcher
//! - Single-instance arbitration
//! - Configuration loading
//! - HTTP collaborators (project directory, logbook)
//! - Tracing initialization

pub mod config;
pub mod http;
pub mod instance;
pub mod observability;
pub mod slot;
pub mod watcher;

pub use instance::InstanceGuard;
pub use slot::{FallbackSlot, FileSlot, MemorySlot};
pub use watcher::SlotWatcher;

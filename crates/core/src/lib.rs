//! # Tracklet Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Schema migration chain for persisted snapshots
//! - The timer transition function (reducer)
//! - The versioned snapshot store service
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `tracklet-domain`
//! - No file, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod migrate;
pub mod ports;
pub mod reducer;
pub mod store;
pub mod time;

pub use migrate::{decode_snapshot, encode_snapshot, sanitize};
pub use ports::{LogbookSink, ProjectDirectory, SlotBackend, SlotChange};
pub use reducer::{reduce, Action};
pub use store::TimerStore;
pub use time::{Clock, MockClock, SystemClock};

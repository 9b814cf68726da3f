//! # Tracklet Domain
//!
//! Business domain types and models for Tracklet.
//!
//! This crate contains:
//! - Domain data types (Snapshot, Activity, CurrentActivity, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and id generation
//!
//! ## Architecture
//! - No dependencies on other Tracklet crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod ids;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

//! Time abstraction for testability
//!
//! Provides a trait-based approach to time operations that allows for
//! deterministic testing without relying on actual time passage.

use std::sync::Arc;

use parking_lot::Mutex;

/// Trait for time operations to enable testing
pub trait Clock: Send + Sync {
    /// Seconds since the UNIX epoch (January 1, 1970)
    fn epoch_seconds(&self) -> i64;
}

/// Real system clock implementation
///
/// Use this in production code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Mock clock for deterministic testing
///
/// Starts at a fixed epoch and only moves when advanced manually.
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Arc<Mutex<i64>>,
}

impl MockClock {
    /// Create a mock clock at the given epoch second
    #[must_use]
    pub fn at(epoch_seconds: i64) -> Self {
        Self { now: Arc::new(Mutex::new(epoch_seconds)) }
    }

    /// Advance the clock by `seconds`
    pub fn advance(&self, seconds: i64) {
        *self.now.lock() += seconds;
    }
}

impl Clock for MockClock {
    fn epoch_seconds(&self) -> i64 {
        *self.now.lock()
    }
}

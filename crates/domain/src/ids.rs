//! Client-side activity id generation
//!
//! Ids are built from the current epoch milliseconds plus a random suffix.
//! They are not globally unique, only practically unique within one
//! context's lifetime, which is all the activities map requires.

use chrono::Utc;
use rand::Rng;

/// Generate a new activity id
#[must_use]
pub fn activity_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen();
    format!("{millis:x}-{suffix:08x}")
}

//! Cross-context slot watcher
//!
//! Other execution contexts sharing the same slot backend signal changes
//! only by writing; there is no push channel between processes. The
//! watcher polls the watched keys and fans observed changes out to
//! in-process subscribers over a broadcast channel.
//!
//! Delivery is at-least-once per distinct observed write. Writes that are
//! overwritten within one poll interval coalesce into a single event
//! carrying the latest value, and an event's payload may already be stale
//! by the time a handler runs. The watcher does not distinguish its own
//! context's writes from foreign ones; consumers that care (the instance
//! guard) filter by value.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracklet_core::{SlotBackend, SlotChange};

const CHANNEL_CAPACITY: usize = 64;

/// Poll-based observer over a set of storage slot keys
pub struct SlotWatcher {
    tx: broadcast::Sender<SlotChange>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl SlotWatcher {
    /// Start watching `keys` on `slot`, checking every `poll_interval`.
    ///
    /// The values present at spawn time form the baseline; only subsequent
    /// changes produce events. The baseline is read before this function
    /// returns, so a write landing right after `spawn` is already a change
    /// and will be reported on the first poll.
    #[must_use]
    pub fn spawn(slot: Arc<dyn SlotBackend>, keys: Vec<String>, poll_interval: Duration) -> Self {
        let mut last_seen: HashMap<String, Option<String>> = HashMap::new();
        for key in &keys {
            let value = read_quietly(slot.as_ref(), key);
            last_seen.insert(key.clone(), value);
        }

        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();
        let handle =
            tokio::spawn(poll_loop(slot, keys, last_seen, poll_interval, tx.clone(), cancel.clone()));
        Self { tx, cancel, handle }
    }

    /// Subscribe to change events for the watched keys
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SlotChange> {
        self.tx.subscribe()
    }

    /// Stop the polling task and wait for it to finish
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "watcher.shutdown_join_failed");
        }
    }
}

async fn poll_loop(
    slot: Arc<dyn SlotBackend>,
    keys: Vec<String>,
    mut last_seen: HashMap<String, Option<String>>,
    poll_interval: Duration,
    tx: broadcast::Sender<SlotChange>,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    tracing::debug!(keys = ?keys, interval = ?poll_interval, "watcher.started");

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                for key in &keys {
                    let value = read_quietly(slot.as_ref(), key);
                    let known = last_seen.get(key);
                    if known != Some(&value) {
                        tracing::debug!(key, "watcher.change_observed");
                        let _ = tx.send(SlotChange { key: key.clone(), value: value.clone() });
                        last_seen.insert(key.clone(), value);
                    }
                }
            }
        }
    }

    tracing::debug!("watcher.stopped");
}

/// Read a key, treating backend failures as "no change information"
fn read_quietly(slot: &dyn SlotBackend, key: &str) -> Option<String> {
    match slot.read(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, key, "watcher.read_failed");
            None
        }
    }
}

//! Single-instance arbitration
//!
//! Each context writes a fresh instance id to a dedicated storage slot at
//! startup. When the watcher observes that slot changing to a foreign id,
//! a newer context has started and this one must irreversibly deactivate
//! its interactive surface rather than race the newcomer on the shared
//! snapshot. The newest writer always wins; there is no way back to
//! active.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracklet_core::SlotBackend;
use tracklet_domain::constants::INSTANCE_SLOT;
use uuid::Uuid;

use crate::watcher::SlotWatcher;

/// Claim on being the single active instance
pub struct InstanceGuard {
    id: String,
    active: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl InstanceGuard {
    /// Claim the instance slot and start watching for a successor.
    ///
    /// `on_deactivate` runs exactly once, from the watcher task, when a
    /// foreign id appears in the slot. A failed claim write is logged and
    /// the guard stays active; without working shared storage there is
    /// nobody to race against.
    pub fn claim(
        slot: Arc<dyn SlotBackend>,
        watcher: &SlotWatcher,
        on_deactivate: impl FnOnce() + Send + 'static,
    ) -> Self {
        let id = Uuid::new_v4().to_string();
        // Subscribe before writing so a racing claim is never missed.
        let rx = watcher.subscribe();

        if let Err(e) = slot.write(INSTANCE_SLOT, &id) {
            tracing::warn!(error = %e, "instance_guard.claim_write_failed");
        } else {
            tracing::info!(id = %id, "instance_guard.claimed");
        }

        let active = Arc::new(AtomicBool::new(true));
        let handle = tokio::spawn(watch_for_successor(
            slot,
            rx,
            id.clone(),
            Arc::clone(&active),
            Box::new(on_deactivate),
        ));

        Self { id, active, handle }
    }

    /// This context's instance id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether this context still owns the interactive surface
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn watch_for_successor(
    slot: Arc<dyn SlotBackend>,
    mut rx: broadcast::Receiver<tracklet_core::SlotChange>,
    id: String,
    active: Arc<AtomicBool>,
    on_deactivate: Box<dyn FnOnce() + Send>,
) {
    loop {
        match rx.recv().await {
            Ok(change) => {
                if change.key != INSTANCE_SLOT {
                    continue;
                }
                if change.value.as_deref() == Some(id.as_str()) {
                    continue;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                // Missed events; the slot itself is the source of truth.
                tracing::debug!(skipped, "instance_guard.lagged");
                match slot.read(INSTANCE_SLOT) {
                    Ok(value) if value.as_deref() == Some(id.as_str()) => continue,
                    Ok(_) => {}
                    Err(_) => continue,
                }
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }

        if active.swap(false, Ordering::SeqCst) {
            tracing::warn!(id = %id, "instance_guard.superseded");
            on_deactivate();
        }
        break;
    }
}

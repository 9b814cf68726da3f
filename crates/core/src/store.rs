//! Versioned snapshot store service
//!
//! One [`TimerStore`] per execution context owns the authoritative
//! in-memory snapshot. It is constructed explicitly at startup and handed
//! to consumers rather than living in a module-level singleton.
//!
//! Every dispatched action writes the resulting snapshot through to the
//! storage slot. Persistence failures are logged and swallowed: the widget
//! keeps functioning on the in-memory state even when nothing durable is
//! behind it.

use std::sync::Arc;

use parking_lot::Mutex;
use tracklet_domain::constants::SNAPSHOT_SLOT;
use tracklet_domain::{ids, Activity, Snapshot};

use crate::migrate::{decode_snapshot, encode_snapshot};
use crate::ports::SlotBackend;
use crate::reducer::{reduce, Action};
use crate::time::Clock;

/// Snapshot store bound to one storage slot
pub struct TimerStore {
    slot: Arc<dyn SlotBackend>,
    clock: Arc<dyn Clock>,
    key: String,
    state: Mutex<Snapshot>,
}

impl TimerStore {
    /// Open the store, loading and migrating whatever the slot holds.
    ///
    /// An empty, corrupt, or version-incompatible slot yields the default
    /// snapshot; opening never fails.
    pub fn open(slot: Arc<dyn SlotBackend>, clock: Arc<dyn Clock>) -> Self {
        Self::open_at(slot, clock, SNAPSHOT_SLOT)
    }

    /// Open the store against a non-default slot key
    pub fn open_at(slot: Arc<dyn SlotBackend>, clock: Arc<dyn Clock>, key: &str) -> Self {
        let state = Mutex::new(Self::load_from(slot.as_ref(), key));
        Self { slot, clock, key: key.to_string(), state }
    }

    /// The slot key this store reads and writes
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Clone of the current in-memory snapshot
    #[must_use]
    pub fn state(&self) -> Snapshot {
        self.state.lock().clone()
    }

    /// Add a fresh activity under a newly generated id
    ///
    /// Returns the id alongside the new state so the caller can address
    /// the activity in follow-up actions.
    pub fn add_activity(&self, activity: Activity) -> (String, Snapshot) {
        let id = ids::activity_id();
        let state = self.dispatch(Action::Add { id: id.clone(), activity });
        (id, state)
    }

    /// Apply one action, persist the result, and return the new state
    pub fn dispatch(&self, action: Action) -> Snapshot {
        let now = self.clock.epoch_seconds();
        let mut state = self.state.lock();
        *state = reduce(state.clone(), action, now);
        self.persist(&state);
        state.clone()
    }

    /// Re-read the slot, replacing the in-memory state wholesale
    ///
    /// Used by consumers that treat a cross-context change notification as
    /// "re-read rather than trust the payload".
    pub fn reload(&self) -> Snapshot {
        let next = Self::load_from(self.slot.as_ref(), &self.key);
        let mut state = self.state.lock();
        *state = next.clone();
        next
    }

    /// Replace the in-memory state from a change notification payload
    ///
    /// The payload runs through the same decode/migrate path as a load.
    /// Nothing is written back; the other context already owns the slot's
    /// latest value.
    pub fn resync(&self, raw: Option<&str>) -> Snapshot {
        let next = decode_snapshot(raw);
        let mut state = self.state.lock();
        *state = next.clone();
        next
    }

    fn load_from(slot: &dyn SlotBackend, key: &str) -> Snapshot {
        let raw = match slot.read(key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, key, "store.load_failed");
                None
            }
        };
        decode_snapshot(raw.as_deref())
    }

    fn persist(&self, snapshot: &Snapshot) {
        let raw = match encode_snapshot(snapshot) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "store.encode_failed");
                return;
            }
        };
        if let Err(e) = self.slot.write(&self.key, &raw) {
            tracing::warn!(error = %e, key = %self.key, "store.write_failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tracklet_domain::{Activity, Result, TrackletError};

    use super::*;
    use crate::time::MockClock;

    /// Minimal in-process backend for exercising the store without infra
    #[derive(Default)]
    struct MapSlot {
        entries: Mutex<HashMap<String, String>>,
        fail_writes: bool,
    }

    impl SlotBackend for MapSlot {
        fn read(&self, key: &str) -> Result<Option<String>> {
            Ok(self.entries.lock().get(key).cloned())
        }

        fn write(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(TrackletError::Storage("quota exceeded".to_string()));
            }
            self.entries.lock().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.entries.lock().remove(key);
            Ok(())
        }
    }

    fn store_with(slot: Arc<MapSlot>, clock: MockClock) -> TimerStore {
        TimerStore::open(slot, Arc::new(clock))
    }

    #[test]
    fn dispatch_writes_through_and_a_reopen_reads_it_back() {
        let slot = Arc::new(MapSlot::default());
        let clock = MockClock::at(1_000);
        let store = store_with(Arc::clone(&slot), clock);

        let state = store.dispatch(Action::Add {
            id: "a1".to_string(),
            activity: Activity { description: "estimate".to_string(), ..Activity::default() },
        });
        assert_eq!(state.activities.len(), 1);

        let reopened = TimerStore::open(Arc::clone(&slot) as Arc<dyn SlotBackend>, Arc::new(MockClock::at(1_000)));
        assert_eq!(reopened.state(), state);
    }

    #[test]
    fn start_and_stop_fold_through_the_mock_clock() {
        let slot = Arc::new(MapSlot::default());
        let clock = MockClock::at(500);
        let store = TimerStore::open(Arc::clone(&slot) as Arc<dyn SlotBackend>, Arc::new(clock.clone()));

        store.dispatch(Action::Add { id: "a".to_string(), activity: Activity::default() });
        store.dispatch(Action::Start { id: "a".to_string() });
        clock.advance(90);
        let state = store.dispatch(Action::Stop);

        assert_eq!(state.activities["a"].seconds, 90);
        assert!(state.current.is_none());
    }

    #[test]
    fn failed_writes_do_not_disturb_the_in_memory_state() {
        let slot = Arc::new(MapSlot { fail_writes: true, ..MapSlot::default() });
        let store = store_with(Arc::clone(&slot), MockClock::at(0));

        let state =
            store.dispatch(Action::Add { id: "a".to_string(), activity: Activity::default() });
        assert_eq!(state.activities.len(), 1);
        assert_eq!(store.state(), state);
        assert!(slot.entries.lock().is_empty());
    }

    #[test]
    fn add_activity_generates_an_addressable_id() {
        let slot = Arc::new(MapSlot::default());
        let store = store_with(Arc::clone(&slot), MockClock::at(100));

        let (id, state) = store.add_activity(Activity::default());
        assert!(state.activities.contains_key(&id));

        let started = store.dispatch(Action::Start { id: id.clone() });
        assert_eq!(started.current.map(|c| c.id), Some(id));
    }

    #[test]
    fn resync_replaces_state_from_a_notification_payload() {
        let slot = Arc::new(MapSlot::default());
        let writer = store_with(Arc::clone(&slot), MockClock::at(0));
        let reader = store_with(Arc::clone(&slot), MockClock::at(0));

        let written =
            writer.dispatch(Action::Add { id: "a".to_string(), activity: Activity::default() });

        let payload = slot.entries.lock().get(SNAPSHOT_SLOT).cloned();
        let synced = reader.resync(payload.as_deref());
        assert_eq!(synced, written);
    }

    #[test]
    fn corrupt_slot_contents_open_as_the_default() {
        let slot = Arc::new(MapSlot::default());
        slot.entries.lock().insert(SNAPSHOT_SLOT.to_string(), "{not json".to_string());

        let store = store_with(slot, MockClock::at(0));
        assert_eq!(store.state(), Snapshot::empty());
    }

    #[test]
    fn reload_observes_a_foreign_write() {
        let slot = Arc::new(MapSlot::default());
        let writer = store_with(Arc::clone(&slot), MockClock::at(0));
        let reader = store_with(Arc::clone(&slot), MockClock::at(0));

        let written =
            writer.dispatch(Action::Add { id: "b".to_string(), activity: Activity::default() });
        assert_eq!(reader.reload(), written);
    }
}

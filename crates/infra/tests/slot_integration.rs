//! End-to-end tests for the storage slot backends and the timer store.

use std::sync::Arc;

use tracklet_core::{Action, MockClock, SlotBackend, TimerStore};
use tracklet_domain::constants::SNAPSHOT_SLOT;
use tracklet_domain::{Activity, Snapshot};
use tracklet_infra::{FallbackSlot, FileSlot};

fn add(id: &str) -> Action {
    Action::Add { id: id.to_string(), activity: Activity::default() }
}

#[test]
fn snapshot_written_by_one_context_loads_in_another() {
    let dir = tempfile::tempdir().unwrap();

    let writer_slot = Arc::new(FileSlot::open(dir.path()).unwrap());
    let writer = TimerStore::open(writer_slot, Arc::new(MockClock::at(0)));
    let written = writer.dispatch(add("a1"));

    // A second context opening the same directory sees the same state.
    let reader_slot = Arc::new(FileSlot::open(dir.path()).unwrap());
    let reader = TimerStore::open(reader_slot, Arc::new(MockClock::at(0)));
    assert_eq!(reader.state(), written);
}

#[test]
fn corrupt_slot_file_degrades_to_the_default_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(SNAPSHOT_SLOT), "{definitely not json").unwrap();

    let slot = Arc::new(FileSlot::open(dir.path()).unwrap());
    let store = TimerStore::open(slot, Arc::new(MockClock::at(0)));
    assert_eq!(store.state(), Snapshot::empty());
}

#[test]
fn elapsed_time_survives_a_reload_through_the_file_slot() {
    let dir = tempfile::tempdir().unwrap();
    let clock = MockClock::at(1_000);
    let slot = Arc::new(FileSlot::open(dir.path()).unwrap());
    let store = TimerStore::open(slot, Arc::new(clock.clone()));

    store.dispatch(add("a"));
    store.dispatch(Action::Start { id: "a".to_string() });
    clock.advance(120);
    store.dispatch(Action::Stop);

    let reopened = TimerStore::open(
        Arc::new(FileSlot::open(dir.path()).unwrap()),
        Arc::new(MockClock::at(2_000)),
    );
    assert_eq!(reopened.state().activities["a"].seconds, 120);
    assert!(reopened.state().current.is_none());
}

#[test]
fn store_survives_a_backend_that_stops_accepting_writes() {
    let dir = tempfile::tempdir().unwrap();
    let slot_dir = dir.path().join("slots");
    let file_slot = FileSlot::open(&slot_dir).unwrap();

    // Pull the directory out from under the backend, like a revoked volume.
    std::fs::remove_dir_all(&slot_dir).unwrap();

    let fallback = Arc::new(FallbackSlot::new(Arc::new(file_slot)));
    let store = TimerStore::open(Arc::clone(&fallback) as Arc<dyn SlotBackend>, Arc::new(MockClock::at(0)));

    let state = store.dispatch(add("a"));
    assert_eq!(state.activities.len(), 1);
    assert!(fallback.is_degraded(SNAPSHOT_SLOT));

    // Read-your-writes still holds within this context.
    assert_eq!(store.reload(), state);
}

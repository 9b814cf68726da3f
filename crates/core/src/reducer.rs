//! Timer transition function
//!
//! A pure reducer over [`Snapshot`]: given the previous state, an action,
//! and the current wall-clock time, produce the next state. All invariants
//! around the current-activity pointer live here:
//!
//! - at most one activity is running
//! - the pointer always references a key present in `activities`
//! - stopping folds the elapsed wall-clock delta into the activity's
//!   counter exactly once

use tracklet_domain::{Activity, CurrentActivity, Snapshot};

/// Actions accepted by the timer state container
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Insert a new activity under a freshly generated id
    Add { id: String, activity: Activity },
    /// Replace an existing activity's record; unknown ids are ignored
    Update { id: String, activity: Activity },
    /// Remove an activity; clears the pointer if it was running
    Remove { id: String },
    /// Start accruing time on an activity, stopping any other one first
    Start { id: String },
    /// Stop the running activity and fold its elapsed time
    Stop,
    /// Reset the transient fields of an activity that was just submitted
    /// to the logbook
    ClearLogged { id: String },
    /// Replace the whole state, e.g. after a cross-context resync
    Replace { snapshot: Snapshot },
    /// Drop everything and start from the default snapshot
    Reset,
}

/// Apply one action to a snapshot at wall-clock time `now` (epoch seconds).
#[must_use]
pub fn reduce(mut snapshot: Snapshot, action: Action, now: i64) -> Snapshot {
    match action {
        Action::Add { id, activity } => {
            snapshot.activities.insert(id, activity);
        }
        Action::Update { id, activity } => {
            if let Some(slot) = snapshot.activities.get_mut(&id) {
                *slot = activity;
            }
        }
        Action::Remove { id } => {
            snapshot.activities.remove(&id);
            if snapshot.current.as_ref().is_some_and(|c| c.id == id) {
                snapshot.current = None;
            }
        }
        Action::Start { id } => {
            if snapshot.activities.contains_key(&id) {
                fold_current(&mut snapshot, now);
                snapshot.current = Some(CurrentActivity { id, started_at: now });
            }
        }
        Action::Stop => {
            fold_current(&mut snapshot, now);
        }
        Action::ClearLogged { id } => {
            if let Some(activity) = snapshot.activities.get_mut(&id) {
                activity.description.clear();
                activity.seconds = 0;
                activity.started_at = None;
                // Keep accruing from now so already-logged time is not
                // counted again on the next stop.
                if let Some(current) = &mut snapshot.current {
                    if current.id == id {
                        current.started_at = now;
                    }
                }
            }
        }
        Action::Replace { snapshot: next } => {
            snapshot = next;
        }
        Action::Reset => {
            snapshot = Snapshot::empty();
        }
    }
    snapshot
}

/// Fold `now - started_at` into the running activity and clear the
/// pointer. A second call is a no-op since the pointer is already gone.
fn fold_current(snapshot: &mut Snapshot, now: i64) {
    let Some(current) = snapshot.current.take() else {
        return;
    };
    if let Some(activity) = snapshot.activities.get_mut(&current.id) {
        let elapsed = now.saturating_sub(current.started_at).max(0);
        activity.seconds = activity.seconds.saturating_add(elapsed.unsigned_abs());
    }
}

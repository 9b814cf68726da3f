//! Schema versioning and migration for persisted snapshots
//!
//! Every snapshot written to the storage slot carries a `_v` integer tag.
//! On load the tag decides what happens:
//!
//! - current version: used as-is, tag stripped
//! - older supported version: lifted through the ordered chain of
//!   migration steps until it reaches the current version
//! - missing, unrecognized, or newer than current: the snapshot is
//!   discarded and a default takes its place
//!
//! Decoding never fails. A snapshot we cannot read degrades to data loss,
//! not to a startup failure.

use serde_json::{Map, Value};
use tracklet_domain::constants::{RESERVED_ACTIVITY_KEYS, SNAPSHOT_VERSION, VERSION_FIELD};
use tracklet_domain::{Result, Snapshot, TrackletError};

/// One migration step lifting a snapshot object from `source` to
/// `source + 1`. Steps are pure; a `None` result marks the snapshot as
/// unreadable and discards it.
type MigrationStep = fn(Map<String, Value>) -> Option<Map<String, Value>>;

/// Ordered migration registry keyed by source version.
const MIGRATIONS: &[(u32, MigrationStep)] = &[(1, migrate_v1_to_v2)];

/// Serialize a snapshot and stamp it with the current schema version.
///
/// # Errors
/// Returns `TrackletError::Serialization` if the snapshot cannot be
/// encoded, which for these types means a bug rather than bad data.
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<String> {
    let mut value = serde_json::to_value(snapshot)
        .map_err(|e| TrackletError::Serialization(format!("Failed to encode snapshot: {e}")))?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert(VERSION_FIELD.to_string(), Value::from(SNAPSHOT_VERSION));
    }
    serde_json::to_string(&value)
        .map_err(|e| TrackletError::Serialization(format!("Failed to encode snapshot: {e}")))
}

/// Decode raw slot contents into a current-version snapshot.
///
/// `raw` is the stored text, or `None` when the slot is empty. The result
/// is always a structurally valid snapshot of the current version; every
/// failure path resolves to the default.
#[must_use]
pub fn decode_snapshot(raw: Option<&str>) -> Snapshot {
    let Some(raw) = raw else {
        return Snapshot::empty();
    };

    let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(raw) else {
        tracing::warn!("snapshot.decode_unparsable");
        return Snapshot::empty();
    };

    match lift_to_current(obj) {
        Some(obj) => {
            let mut snapshot: Snapshot = match serde_json::from_value(Value::Object(obj)) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!(error = %e, "snapshot.decode_shape_mismatch");
                    return Snapshot::empty();
                }
            };
            sanitize(&mut snapshot);
            snapshot
        }
        None => Snapshot::empty(),
    }
}

/// Walk the migration chain until the object is at the current version.
///
/// Returns `None` when the version tag is missing, not an integer, newer
/// than the current version, or older with no registered step.
fn lift_to_current(mut obj: Map<String, Value>) -> Option<Map<String, Value>> {
    let mut version = match obj.remove(VERSION_FIELD) {
        Some(Value::Number(n)) => u32::try_from(n.as_u64()?).ok()?,
        _ => {
            tracing::warn!("snapshot.version_tag_missing");
            return None;
        }
    };

    if version > SNAPSHOT_VERSION {
        tracing::warn!(version, "snapshot.version_from_the_future");
        return None;
    }

    while version < SNAPSHOT_VERSION {
        let step = MIGRATIONS
            .iter()
            .find(|(source, _)| *source == version)
            .map(|(_, step)| step)?;
        obj = step(obj)?;
        version += 1;
        tracing::debug!(version, "snapshot.migrated");
    }

    Some(obj)
}

/// Version 1 stored `activities` as an ordered list of records, each
/// carrying its own `id`. Version 2 re-keys the list into a map.
fn migrate_v1_to_v2(mut obj: Map<String, Value>) -> Option<Map<String, Value>> {
    let list = match obj.remove("activities") {
        Some(Value::Array(list)) => list,
        None | Some(Value::Null) => Vec::new(),
        Some(_) => return None,
    };

    let mut map = Map::new();
    for record in list {
        let Value::Object(record) = record else { continue };
        let Some(id) = record.get("id").and_then(Value::as_str).map(str::to_string) else {
            continue;
        };
        map.insert(id, Value::Object(record));
    }

    obj.insert("activities".to_string(), Value::Object(map));
    Some(obj)
}

/// Defensive cleanup applied after every load.
///
/// Drops activities keyed by an empty string or the literal strings
/// "null"/"undefined" (corruption observed in the wild), and clears the
/// current-activity pointer if its referent is gone.
pub fn sanitize(snapshot: &mut Snapshot) {
    for key in RESERVED_ACTIVITY_KEYS {
        if snapshot.activities.remove(key).is_some() {
            tracing::warn!(key, "snapshot.dropped_reserved_key");
        }
    }

    if let Some(current) = &snapshot.current {
        if !snapshot.activities.contains_key(&current.id) {
            tracing::warn!(id = %current.id, "snapshot.current_without_referent");
            snapshot.current = None;
        }
    }
}

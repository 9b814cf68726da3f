//! Common data types used throughout the application
//!
//! The persisted wire shape uses camelCase field names so that snapshots
//! written by earlier clients remain readable.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A label/value pair as returned by the project and service lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// One tracked activity owned by the snapshot's `activities` map
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Free-text label shown on the activity card
    #[serde(default)]
    pub description: String,
    /// Accumulated elapsed seconds
    #[serde(default)]
    pub seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<SelectOption>,
    /// UI position, persisted so cards keep their place across reloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Set for break-type entries that track their own start time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
}

/// The at-most-one running activity marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentActivity {
    /// Key into the snapshot's `activities` map
    pub id: String,
    /// Epoch seconds at which the activity was started
    pub started_at: i64,
}

/// The full persisted state of the timer widget
///
/// The schema version tag (`_v`) is not part of the in-memory shape; it is
/// stamped on at encode time and stripped on decode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub activities: BTreeMap<String, Activity>,
    #[serde(default)]
    pub current: Option<CurrentActivity>,
}

impl Snapshot {
    /// Fresh default snapshot with no activities and nothing running
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A completed activity ready for submission to the logbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogbookEntry {
    pub service: String,
    pub description: String,
    pub hours: f64,
    pub renderer: String,
    pub date: NaiveDate,
}

/// Result of a logbook submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogbookOutcome {
    /// Entry accepted; the server may point the client somewhere else
    Accepted { redirect: Option<String> },
    /// Validation failed; the server returned replacement form markup
    Rejected { form_markup: String },
}

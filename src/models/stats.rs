use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate counters for the processed event set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    /// Total number of events
    pub total_events: u64,

    /// Events labelled `High`
    pub high_threat: u64,

    /// Events labelled `Medium`
    pub medium_threat: u64,

    /// Events labelled `Low`
    pub low_threat: u64,

    /// Events without a recognised label
    #[serde(default)]
    pub unknown_threat: u64,

    /// Most recent event datetime, if any event carries one
    #[serde(default)]
    pub last_updated: Option<String>,

    /// The five most frequent event types
    #[serde(default)]
    pub event_types: BTreeMap<String, u64>,
}

impl StatisticsSnapshot {
    /// Snapshot of an empty event set
    pub fn empty() -> Self {
        Self {
            total_events: 0,
            high_threat: 0,
            medium_threat: 0,
            low_threat: 0,
            unknown_threat: 0,
            last_updated: None,
            event_types: BTreeMap::new(),
        }
    }
}

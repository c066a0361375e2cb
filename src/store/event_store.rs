use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::models::event::EventRecord;
use crate::models::stats::StatisticsSnapshot;
use crate::utils::error::{DashboardError, DashboardResult};

/// How many event types the statistics report
const TOP_EVENT_TYPES: usize = 5;

/// Criteria the events endpoint filters on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Exact threat level
    pub threat_level: Option<String>,

    /// Substring of the source IP
    pub source_ip: Option<String>,

    /// Exact event type
    pub event_type: Option<String>,

    /// Maximum number of events
    pub limit: usize,
}

enum EventSource {
    File(PathBuf),
    Memory(Vec<EventRecord>),
}

/// Read-only store of processed events.
///
/// File-backed stores re-read the file on every call so a new export shows up
/// without restarting the server.
pub struct EventStore {
    source: EventSource,
}

impl EventStore {
    /// Store backed by a JSON array of events
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: EventSource::File(path.into()),
        }
    }

    /// Store over a fixed set of events
    pub fn in_memory(events: Vec<EventRecord>) -> Self {
        Self {
            source: EventSource::Memory(events),
        }
    }

    /// Load every processed event.
    ///
    /// A missing, unreadable or malformed file is an empty event set. Array
    /// entries that are not valid events are skipped.
    pub fn load_processed_events(&self) -> Vec<EventRecord> {
        match &self.source {
            EventSource::Memory(events) => events.clone(),
            EventSource::File(path) => {
                if !path.exists() {
                    debug!("Event file {} does not exist", path.display());
                    return Vec::new();
                }
                match read_event_file(path) {
                    Ok(events) => events,
                    Err(e) => {
                        warn!("Failed to load events from {}: {}", path.display(), e);
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Totals per threat tier, latest datetime and the top event types
    pub fn statistics(&self) -> StatisticsSnapshot {
        let events = self.load_processed_events();
        if events.is_empty() {
            return StatisticsSnapshot::empty();
        }

        let mut snapshot = StatisticsSnapshot::empty();
        snapshot.total_events = events.len() as u64;

        // first-seen order breaks ties among equally frequent types
        let mut type_counts: Vec<(String, u64)> = Vec::new();

        for event in &events {
            match event.threat_level.as_deref().unwrap_or("Unknown") {
                "High" => snapshot.high_threat += 1,
                "Medium" => snapshot.medium_threat += 1,
                "Low" => snapshot.low_threat += 1,
                "Unknown" => snapshot.unknown_threat += 1,
                _ => {}
            }

            let event_type = event.event_type.as_deref().unwrap_or("Unknown");
            match type_counts.iter_mut().find(|(name, _)| name == event_type) {
                Some((_, count)) => *count += 1,
                None => type_counts.push((event_type.to_string(), 1)),
            }
        }

        snapshot.last_updated = events
            .iter()
            .filter_map(EventRecord::datetime)
            .max()
            .map(str::to_string);

        type_counts.sort_by(|a, b| b.1.cmp(&a.1));
        snapshot.event_types = type_counts
            .into_iter()
            .take(TOP_EVENT_TYPES)
            .collect::<BTreeMap<_, _>>();

        snapshot
    }

    /// Events matching `query`, most recent first, at most `query.limit`
    pub fn filter_events(&self, query: &EventQuery) -> Vec<EventRecord> {
        let mut events = self.load_processed_events();

        if let Some(threat_level) = non_empty(&query.threat_level) {
            events.retain(|e| e.threat_level.as_deref() == Some(threat_level));
        }
        if let Some(source_ip) = non_empty(&query.source_ip) {
            events.retain(|e| e.source_ip.as_deref().unwrap_or("").contains(source_ip));
        }
        if let Some(event_type) = non_empty(&query.event_type) {
            events.retain(|e| e.event_type.as_deref() == Some(event_type));
        }

        newest_first(&mut events);
        events.truncate(query.limit);
        events
    }

    /// The `limit` most recent events
    pub fn recent_events(&self, limit: usize) -> Vec<EventRecord> {
        let mut events = self.load_processed_events();
        newest_first(&mut events);
        events.truncate(limit);
        events
    }
}

fn read_event_file(path: &Path) -> DashboardResult<Vec<EventRecord>> {
    let contents = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;

    let entries = match value {
        serde_json::Value::Array(entries) => entries,
        _ => {
            return Err(DashboardError::Store(
                "expected a JSON array of events".to_string(),
            ))
        }
    };

    let total = entries.len();
    let events: Vec<EventRecord> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if events.len() < total {
        warn!(
            "Skipped {} malformed entries in {}",
            total - events.len(),
            path.display()
        );
    }

    Ok(events)
}

/// Sort by datetime, descending; events without one go last in file order
fn newest_first(events: &mut [EventRecord]) {
    events.sort_by(|a, b| {
        let a = a.datetime.as_deref().unwrap_or("");
        let b = b.datetime.as_deref().unwrap_or("");
        b.cmp(a)
    });
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

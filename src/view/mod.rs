//! View bindings shared by the dashboard components.
//!
//! The page elements the components write to (stat slots, the event table
//! body, the count label) and read from (filter controls) are bound once at
//! startup into a [`ViewBindings`] value and handed to each component.

pub mod badge;
pub mod document;
pub mod html;
pub mod terminal;

use log::error;
use std::sync::Arc;

use crate::models::event::{EventRecord, FieldValue};
use crate::models::filter::FilterInputs;
use crate::view::badge::{badge_for, ThreatBadge};
use crate::view::document::DashboardDocument;

/// Number of columns in the event table
pub const TABLE_COLUMNS: usize = 7;

/// Cell text for a missing field
pub const PLACEHOLDER: &str = "N/A";

/// Table headers, in column order
pub const TABLE_HEADERS: [&str; TABLE_COLUMNS] = [
    "Time",
    "Source IP",
    "Destination IP",
    "Port",
    "Event Type",
    "Priority",
    "Threat",
];

/// Shown when the backend returns no events
pub const NO_EVENTS_MESSAGE: &str = "No events found";

/// Shown in place of the rows when loading events fails
pub const EVENTS_ERROR_MESSAGE: &str = "Failed to load events";

/// Statistic display slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatSlot {
    TotalEvents,
    HighThreat,
    MediumThreat,
    LowThreat,
    LastUpdated,
}

impl StatSlot {
    pub const ALL: [StatSlot; 5] = [
        StatSlot::TotalEvents,
        StatSlot::HighThreat,
        StatSlot::MediumThreat,
        StatSlot::LowThreat,
        StatSlot::LastUpdated,
    ];

    /// Element id of the slot in the page markup
    pub fn element_id(&self) -> &'static str {
        match self {
            StatSlot::TotalEvents => "totalEvents",
            StatSlot::HighThreat => "highThreat",
            StatSlot::MediumThreat => "mediumThreat",
            StatSlot::LowThreat => "lowThreat",
            StatSlot::LastUpdated => "lastUpdated",
        }
    }

    /// Human-readable caption
    pub fn title(&self) -> &'static str {
        match self {
            StatSlot::TotalEvents => "Total Events",
            StatSlot::HighThreat => "High Threat",
            StatSlot::MediumThreat => "Medium Threat",
            StatSlot::LowThreat => "Low Threat",
            StatSlot::LastUpdated => "Last Updated",
        }
    }
}

/// Kind of a full-width table message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A single row spanning every column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// One rendered event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    /// Time, source IP, destination IP, port, event type, priority
    pub cells: [String; TABLE_COLUMNS - 1],

    /// Threat column
    pub badge: ThreatBadge,
}

impl EventRow {
    /// Render a record; absent or empty fields become [`PLACEHOLDER`]
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            cells: [
                text_cell(record.datetime()),
                text_cell(record.source_ip()),
                text_cell(record.destination_ip.as_deref()),
                value_cell(record.port.as_ref()),
                text_cell(record.event_type()),
                value_cell(record.priority.as_ref()),
            ],
            badge: badge_for(record.threat_level.as_deref()),
        }
    }

    /// Cell text for a column index in `0..TABLE_COLUMNS`
    pub fn cell(&self, column: usize) -> String {
        match self.cells.get(column) {
            Some(text) => text.clone(),
            None => self.badge.text(),
        }
    }
}

fn text_cell(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn value_cell(value: Option<&FieldValue>) -> String {
    match value {
        Some(value) if !value.is_blank() => value.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Contents of the event table body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// One row per event, in the order received
    Rows(Vec<EventRow>),

    /// A single message row spanning all columns
    Notice(Notice),
}

impl TableBody {
    /// Body for a list of records, including the empty-result row
    pub fn from_records(records: &[EventRecord]) -> Self {
        if records.is_empty() {
            return TableBody::Notice(Notice::info(NO_EVENTS_MESSAGE));
        }
        TableBody::Rows(records.iter().map(EventRow::from_record).collect())
    }

    /// Number of `<tr>` rows the body renders to
    pub fn row_count(&self) -> usize {
        match self {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Notice(_) => 1,
        }
    }
}

/// Output side of the page: everything the components write to
pub trait DashboardView: Send + Sync {
    /// Replace the text of a statistic slot
    fn set_stat(&self, slot: StatSlot, text: &str);

    /// Replace the entire event table body
    fn replace_table_body(&self, body: TableBody);

    /// Replace the event count label
    fn set_event_count(&self, text: &str);

    /// Diagnostic channel for failures
    fn report_diagnostic(&self, message: &str) {
        error!("{}", message);
    }
}

/// Input side of the page: the three filter controls
pub trait FilterControls: Send + Sync {
    /// Current values of the controls
    fn read_inputs(&self) -> FilterInputs;

    /// Overwrite all three controls
    fn write_inputs(&self, inputs: FilterInputs);
}

/// The page elements, bound once at startup
#[derive(Clone)]
pub struct ViewBindings {
    pub view: Arc<dyn DashboardView>,
    pub controls: Arc<dyn FilterControls>,
}

impl ViewBindings {
    pub fn new(view: Arc<dyn DashboardView>, controls: Arc<dyn FilterControls>) -> Self {
        Self { view, controls }
    }

    /// Bind both sides to one in-memory document
    pub fn from_document(document: Arc<DashboardDocument>) -> Self {
        Self {
            view: document.clone(),
            controls: document,
        }
    }
}

use log::error;
use parking_lot::RwLock;
use std::collections::{BTreeMap, VecDeque};

use crate::models::filter::FilterInputs;
use crate::view::{DashboardView, FilterControls, Notice, StatSlot, TableBody};

/// Placeholder the last-updated slot holds before any statistics arrive
const NO_TIMESTAMP: &str = "-";

/// Diagnostics kept in memory; older entries are dropped first
pub const MAX_DIAGNOSTICS: usize = 50;

/// Point-in-time copy of everything on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    pub stats: BTreeMap<StatSlot, String>,
    pub table: TableBody,
    pub event_count: String,
    pub inputs: FilterInputs,
}

impl DocumentSnapshot {
    /// Text of a statistic slot
    pub fn stat(&self, slot: StatSlot) -> &str {
        self.stats.get(&slot).map(String::as_str).unwrap_or_default()
    }
}

struct DocumentState {
    snapshot: DocumentSnapshot,
    diagnostics: VecDeque<String>,
    revision: u64,
}

/// In-memory page model that both the HTML and terminal front ends paint from
pub struct DashboardDocument {
    state: RwLock<DocumentState>,
}

impl DashboardDocument {
    /// A freshly loaded page: zeroed counters and a loading row
    pub fn new() -> Self {
        let stats = StatSlot::ALL
            .iter()
            .map(|slot| {
                let text = match slot {
                    StatSlot::LastUpdated => NO_TIMESTAMP,
                    _ => "0",
                };
                (*slot, text.to_string())
            })
            .collect();

        Self {
            state: RwLock::new(DocumentState {
                snapshot: DocumentSnapshot {
                    stats,
                    table: TableBody::Notice(Notice::info("Loading events...")),
                    event_count: "0 events".to_string(),
                    inputs: FilterInputs::cleared(),
                },
                diagnostics: VecDeque::with_capacity(MAX_DIAGNOSTICS),
                revision: 0,
            }),
        }
    }

    /// Copy of the current page
    pub fn snapshot(&self) -> DocumentSnapshot {
        self.state.read().snapshot.clone()
    }

    /// Text of a statistic slot
    pub fn stat(&self, slot: StatSlot) -> String {
        self.state.read().snapshot.stat(slot).to_string()
    }

    /// Current event table body
    pub fn table_body(&self) -> TableBody {
        self.state.read().snapshot.table.clone()
    }

    /// Current event count label
    pub fn event_count(&self) -> String {
        self.state.read().snapshot.event_count.clone()
    }

    /// Most recent diagnostics, oldest first
    pub fn diagnostics(&self) -> Vec<String> {
        self.state.read().diagnostics.iter().cloned().collect()
    }

    /// Incremented on every visible change
    pub fn revision(&self) -> u64 {
        self.state.read().revision
    }

    /// Select a threat level in the threat filter
    pub fn set_threat_filter(&self, threat_level: &str) {
        self.update_inputs(|inputs| inputs.threat_level = threat_level.to_string());
    }

    /// Type into the source IP field
    pub fn set_ip_filter(&self, source_ip: &str) {
        self.update_inputs(|inputs| inputs.source_ip = source_ip.to_string());
    }

    /// Type into the limit field
    pub fn set_limit_filter(&self, limit: &str) {
        self.update_inputs(|inputs| inputs.limit = limit.to_string());
    }

    fn update_inputs(&self, edit: impl FnOnce(&mut FilterInputs)) {
        let mut state = self.state.write();
        edit(&mut state.snapshot.inputs);
        state.revision += 1;
    }
}

impl Default for DashboardDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView for DashboardDocument {
    fn set_stat(&self, slot: StatSlot, text: &str) {
        let mut state = self.state.write();
        state.snapshot.stats.insert(slot, text.to_string());
        state.revision += 1;
    }

    fn replace_table_body(&self, body: TableBody) {
        let mut state = self.state.write();
        state.snapshot.table = body;
        state.revision += 1;
    }

    fn set_event_count(&self, text: &str) {
        let mut state = self.state.write();
        state.snapshot.event_count = text.to_string();
        state.revision += 1;
    }

    fn report_diagnostic(&self, message: &str) {
        error!("{}", message);
        // not a visible change; revision stays put
        let mut state = self.state.write();
        if state.diagnostics.len() == MAX_DIAGNOSTICS {
            state.diagnostics.pop_front();
        }
        state.diagnostics.push_back(message.to_string());
    }
}

impl FilterControls for DashboardDocument {
    fn read_inputs(&self) -> FilterInputs {
        self.state.read().snapshot.inputs.clone()
    }

    fn write_inputs(&self, inputs: FilterInputs) {
        self.update_inputs(|current| *current = inputs);
    }
}

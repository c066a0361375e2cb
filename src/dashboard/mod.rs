//! The dashboard components and the commands that drive them.

pub mod commands;
pub mod event_table;
pub mod filters;
pub mod generation;
pub mod stats_panel;

use log::info;
use std::sync::Arc;

use crate::client::transport::ApiTransport;
use crate::dashboard::commands::Command;
use crate::dashboard::event_table::EventTable;
use crate::dashboard::filters::{FilterState, Key};
use crate::dashboard::stats_panel::StatsPanel;
use crate::utils::error::FailureKind;
use crate::view::ViewBindings;

/// What a single refresh did to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response was written to the view
    Applied,

    /// The refresh failed and was reported
    Failed(FailureKind),

    /// A newer refresh started meanwhile; the response was dropped
    Stale,
}

impl RefreshOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RefreshOutcome::Failed(_))
    }
}

/// Outcome of a command, per component it touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    pub statistics: Option<RefreshOutcome>,
    pub events: Option<RefreshOutcome>,
}

impl CommandOutcome {
    /// Whether any refresh triggered by the command failed
    pub fn has_failure(&self) -> bool {
        [self.statistics, self.events]
            .iter()
            .flatten()
            .any(RefreshOutcome::is_failure)
    }
}

/// StatsPanel, EventTable and the filter controls, wired to one set of bindings
pub struct Dashboard {
    stats: StatsPanel,
    events: EventTable,
    filters: FilterState,
}

impl Dashboard {
    pub fn new(transport: Arc<dyn ApiTransport>, bindings: &ViewBindings) -> Self {
        Self {
            stats: StatsPanel::new(transport.clone(), bindings.view.clone()),
            events: EventTable::new(transport, bindings.view.clone()),
            filters: FilterState::new(bindings.controls.clone()),
        }
    }

    pub fn stats_panel(&self) -> &StatsPanel {
        &self.stats
    }

    pub fn event_table(&self) -> &EventTable {
        &self.events
    }

    /// Page ready: load statistics and the unfiltered events once
    pub async fn on_ready(&self) -> CommandOutcome {
        info!("Loading dashboard");
        self.refresh().await
    }

    /// Refresh control: statistics and the unfiltered event list, concurrently
    pub async fn refresh(&self) -> CommandOutcome {
        let (statistics, events) = futures::join!(
            self.stats.refresh_statistics(),
            self.events.refresh_events(None)
        );
        CommandOutcome {
            statistics: Some(statistics),
            events: Some(events),
        }
    }

    /// Apply-filters control: reload events with the current control values
    pub async fn apply_filters(&self) -> RefreshOutcome {
        let criteria = self.filters.criteria();
        info!("Applying filters: {:?}", criteria);
        self.events.refresh_events(Some(&criteria)).await
    }

    /// Clear-filters control: reset the controls and reload without filters
    pub async fn clear_filters(&self) -> RefreshOutcome {
        self.filters.reset();
        self.events.refresh_events(None).await
    }

    /// Key press in the IP field; Enter behaves like the apply control
    pub async fn on_ip_field_key(&self, key: Key) -> Option<RefreshOutcome> {
        if FilterState::submits(key) {
            Some(self.apply_filters().await)
        } else {
            None
        }
    }

    /// Run a named command
    pub async fn dispatch(&self, command: Command) -> CommandOutcome {
        match command {
            Command::Refresh => self.refresh().await,
            Command::ApplyFilters => CommandOutcome {
                statistics: None,
                events: Some(self.apply_filters().await),
            },
            Command::ClearFilters => CommandOutcome {
                statistics: None,
                events: Some(self.clear_filters().await),
            },
            Command::IpFieldKey(key) => CommandOutcome {
                statistics: None,
                events: self.on_ip_field_key(key).await,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::scripted::ScriptedTransport;
    use crate::client::{EVENTS_PATH, STATS_PATH};
    use crate::models::filter::FilterInputs;
    use crate::view::document::DashboardDocument;
    use crate::view::{FilterControls, StatSlot};
    use serde_json::json;

    fn events_body() -> serde_json::Value {
        json!({"success": true, "count": 1, "events": [{"source_ip": "10.0.0.9", "threat_level": "High"}]})
    }

    fn stats_body() -> serde_json::Value {
        json!({"success": true, "statistics": {
            "total_events": 1, "high_threat": 1, "medium_threat": 0, "low_threat": 0,
            "last_updated": "2024-09-02 09:10:00"
        }})
    }

    fn dashboard() -> (Dashboard, Arc<ScriptedTransport>, Arc<DashboardDocument>) {
        let transport = Arc::new(ScriptedTransport::new());
        let document = Arc::new(DashboardDocument::new());
        let bindings = ViewBindings::from_document(document.clone());
        (Dashboard::new(transport.clone(), &bindings), transport, document)
    }

    #[tokio::test]
    async fn ready_loads_both_components() {
        let (dashboard, transport, document) = dashboard();
        transport
            .push_json(STATS_PATH, stats_body())
            .push_json(EVENTS_PATH, events_body());

        let outcome = dashboard.on_ready().await;

        assert_eq!(outcome.statistics, Some(RefreshOutcome::Applied));
        assert_eq!(outcome.events, Some(RefreshOutcome::Applied));
        assert!(!outcome.has_failure());
        assert_eq!(document.stat(StatSlot::HighThreat), "1");
        assert_eq!(document.event_count(), "1 events");
    }

    #[tokio::test]
    async fn stats_failure_does_not_block_events() {
        let (dashboard, transport, document) = dashboard();
        transport
            .push_json(STATS_PATH, json!({"success": false}))
            .push_json(EVENTS_PATH, events_body());

        let outcome = dashboard.dispatch(Command::Refresh).await;

        assert!(outcome.has_failure());
        assert_eq!(outcome.events, Some(RefreshOutcome::Applied));
        assert_eq!(document.table_body().row_count(), 1);
        assert_eq!(document.stat(StatSlot::TotalEvents), "0");
    }

    #[tokio::test]
    async fn apply_reads_trimmed_controls() {
        let (dashboard, transport, document) = dashboard();
        transport.push_json(EVENTS_PATH, events_body());
        document.set_threat_filter("Medium");
        document.set_ip_filter("  10.0.0.9  ");
        document.set_limit_filter("20");

        dashboard.dispatch(Command::ApplyFilters).await;

        let request = transport.last_request(EVENTS_PATH).unwrap();
        assert_eq!(
            request.params,
            vec![
                ("threat_level", "Medium".to_string()),
                ("source_ip", "10.0.0.9".to_string()),
                ("limit", "20".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn clear_resets_controls_and_sends_no_parameters() {
        let (dashboard, transport, document) = dashboard();
        transport
            .push_json(EVENTS_PATH, events_body())
            .push_json(EVENTS_PATH, events_body());
        document.set_threat_filter("High");
        document.set_ip_filter("10.0.0.9");
        document.set_limit_filter("5");

        dashboard.dispatch(Command::ClearFilters).await;

        assert_eq!(document.read_inputs(), FilterInputs::cleared());
        let request = transport.last_request(EVENTS_PATH).unwrap();
        assert!(!request.has_param("threat_level"));
        assert!(!request.has_param("source_ip"));
        assert!(!request.has_param("limit"));

        // applying right after a clear does send the default limit from the control
        dashboard.apply_filters().await;
        let request = transport.last_request(EVENTS_PATH).unwrap();
        assert_eq!(request.params, vec![("limit", "100".to_string())]);
    }

    #[tokio::test]
    async fn enter_in_ip_field_applies_filters() {
        let (dashboard, transport, document) = dashboard();
        transport.push_json(EVENTS_PATH, events_body());
        document.set_ip_filter("10.0.0.9");

        let outcome = dashboard.dispatch(Command::IpFieldKey(Key::Char('9'))).await;
        assert_eq!(outcome.events, None);
        assert!(transport.requests().is_empty());

        let outcome = dashboard.dispatch(Command::IpFieldKey(Key::Enter)).await;
        assert_eq!(outcome.events, Some(RefreshOutcome::Applied));
        assert!(transport
            .last_request(EVENTS_PATH)
            .unwrap()
            .has_param("source_ip"));
    }

    #[tokio::test]
    async fn refresh_ignores_filter_controls() {
        let (dashboard, transport, document) = dashboard();
        transport
            .push_json(STATS_PATH, stats_body())
            .push_json(EVENTS_PATH, events_body());
        document.set_threat_filter("Low");

        dashboard.refresh().await;

        assert!(transport.last_request(EVENTS_PATH).unwrap().params.is_empty());
        // the control itself is untouched
        assert_eq!(document.read_inputs().threat_level, "Low");
    }
}

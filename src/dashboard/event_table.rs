use log::{debug, info};
use std::sync::Arc;

use crate::client::transport::ApiTransport;
use crate::client::{EVENTS_PATH, RECENT_PATH};
use crate::dashboard::generation::RequestGeneration;
use crate::dashboard::RefreshOutcome;
use crate::models::filter::FilterCriteria;
use crate::models::response::{decode_envelope, EventsResponse};
use crate::utils::error::DashboardResult;
use crate::view::{DashboardView, Notice, TableBody, EVENTS_ERROR_MESSAGE};

/// The event list and its count label
pub struct EventTable {
    transport: Arc<dyn ApiTransport>,
    view: Arc<dyn DashboardView>,
    generation: RequestGeneration,
}

impl EventTable {
    pub fn new(transport: Arc<dyn ApiTransport>, view: Arc<dyn DashboardView>) -> Self {
        Self {
            transport,
            view,
            generation: RequestGeneration::new(),
        }
    }

    /// Fetch events matching `filters` and replace the table body.
    ///
    /// The count label shows the server-reported `count` verbatim, even when
    /// it differs from the number of rows received. On failure the body is
    /// replaced by a single error row and the count label is left alone.
    pub async fn refresh_events(&self, filters: Option<&FilterCriteria>) -> RefreshOutcome {
        let params = filters.map(FilterCriteria::query_pairs).unwrap_or_default();
        self.load(EVENTS_PATH, params).await
    }

    /// Show the most recent events, with the same rendering rules
    pub async fn show_recent(&self, limit: u32) -> RefreshOutcome {
        self.load(RECENT_PATH, vec![("limit", limit.to_string())]).await
    }

    async fn load(&self, path: &str, params: Vec<(&'static str, String)>) -> RefreshOutcome {
        let generation = self.generation.begin();
        let result = self.fetch(path, &params).await;

        if !self.generation.is_current(generation) {
            debug!("Discarding stale events response (generation {})", generation);
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(response) => {
                info!(
                    "Loaded {} events from {} (reported count: {:?})",
                    response.events.len(),
                    path,
                    response.count
                );

                self.view
                    .replace_table_body(TableBody::from_records(&response.events));

                match response.count {
                    Some(count) => self.view.set_event_count(&format!("{} events", count)),
                    None => debug!("Events response has no count; label unchanged"),
                }

                RefreshOutcome::Applied
            }
            Err(e) => {
                self.view
                    .report_diagnostic(&format!("Error loading events: {}", e));
                self.view
                    .replace_table_body(TableBody::Notice(Notice::error(EVENTS_ERROR_MESSAGE)));
                RefreshOutcome::Failed(e.kind())
            }
        }
    }

    async fn fetch(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> DashboardResult<EventsResponse> {
        let body = self.transport.get(path, params).await?;
        decode_envelope(&body)
    }
}

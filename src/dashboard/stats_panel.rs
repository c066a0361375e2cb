use log::{debug, info};
use std::sync::Arc;

use crate::client::transport::ApiTransport;
use crate::client::STATS_PATH;
use crate::dashboard::generation::RequestGeneration;
use crate::dashboard::RefreshOutcome;
use crate::models::response::{decode_envelope, StatsResponse};
use crate::models::stats::StatisticsSnapshot;
use crate::utils::error::DashboardResult;
use crate::view::{DashboardView, StatSlot};

/// Aggregate counters panel
pub struct StatsPanel {
    transport: Arc<dyn ApiTransport>,
    view: Arc<dyn DashboardView>,
    generation: RequestGeneration,
}

impl StatsPanel {
    pub fn new(transport: Arc<dyn ApiTransport>, view: Arc<dyn DashboardView>) -> Self {
        Self {
            transport,
            view,
            generation: RequestGeneration::new(),
        }
    }

    /// Fetch the statistics and write them into the stat slots.
    ///
    /// Failures only reach the diagnostic channel: the slots keep whatever
    /// they showed before and no error is displayed.
    pub async fn refresh_statistics(&self) -> RefreshOutcome {
        let generation = self.generation.begin();
        let result = self.fetch().await;

        if !self.generation.is_current(generation) {
            debug!("Discarding stale statistics response (generation {})", generation);
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(statistics) => {
                self.show(&statistics);
                RefreshOutcome::Applied
            }
            Err(e) => {
                self.view
                    .report_diagnostic(&format!("Error loading statistics: {}", e));
                RefreshOutcome::Failed(e.kind())
            }
        }
    }

    async fn fetch(&self) -> DashboardResult<StatisticsSnapshot> {
        let body = self.transport.get(STATS_PATH, &[]).await?;
        let response: StatsResponse = decode_envelope(&body)?;
        Ok(response.statistics)
    }

    fn show(&self, statistics: &StatisticsSnapshot) {
        info!(
            "Statistics: {} events ({} high, {} medium, {} low)",
            statistics.total_events,
            statistics.high_threat,
            statistics.medium_threat,
            statistics.low_threat
        );

        self.view
            .set_stat(StatSlot::TotalEvents, &statistics.total_events.to_string());
        self.view
            .set_stat(StatSlot::HighThreat, &statistics.high_threat.to_string());
        self.view
            .set_stat(StatSlot::MediumThreat, &statistics.medium_threat.to_string());
        self.view
            .set_stat(StatSlot::LowThreat, &statistics.low_threat.to_string());

        if let Some(last_updated) = statistics.last_updated.as_deref().filter(|s| !s.is_empty()) {
            self.view.set_stat(StatSlot::LastUpdated, last_updated);
        }
    }
}

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::event::EventRecord;
use crate::models::stats::StatisticsSnapshot;
use crate::utils::error::{DashboardError, DashboardResult};

/// Body of `GET /api/events` and `GET /api/events/recent`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub success: bool,

    /// Number of events as reported by the backend
    #[serde(default)]
    pub count: Option<u64>,

    pub events: Vec<EventRecord>,
}

/// Body of `GET /api/events/stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub statistics: StatisticsSnapshot,
}

/// Body of any failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Decode a response body that carries a `success` flag.
///
/// The flag is checked before the payload shape, so a failed response that
/// omits its payload reports as an application failure rather than a decode
/// error.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> DashboardResult<T> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    match value.get("success").and_then(serde_json::Value::as_bool) {
        Some(true) => Ok(serde_json::from_value(value)?),
        Some(false) => {
            let reason = value
                .get("error")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("success=false");
            Err(DashboardError::Application(reason.to_string()))
        }
        None => Err(DashboardError::Application(
            "response has no success flag".to_string(),
        )),
    }
}

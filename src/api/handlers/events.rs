use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde::{de, Deserialize, Deserializer};

use crate::models::event::EventRecord;
use crate::models::response::{ErrorResponse, EventsResponse, StatsResponse};
use crate::store::event_store::{EventQuery, EventStore};

/// Query parameters for listing events
#[derive(Deserialize)]
pub struct EventsQuery {
    /// Filter by threat level
    threat_level: Option<String>,

    /// Filter by source IP address (partial match)
    source_ip: Option<String>,

    /// Filter by event type
    event_type: Option<String>,

    /// Maximum number of events
    #[serde(default, deserialize_with = "blank_as_none")]
    limit: Option<usize>,
}

/// Query parameters for recent events
#[derive(Deserialize)]
pub struct RecentQuery {
    /// Number of events
    #[serde(default, deserialize_with = "blank_as_none")]
    limit: Option<usize>,
}

const DEFAULT_LIMIT: usize = 100;
const DEFAULT_RECENT_LIMIT: usize = 10;

/// `limit=` behaves like an absent limit; anything else must be a number
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(de::Error::custom),
    }
}

fn events_response(events: Vec<EventRecord>) -> HttpResponse {
    HttpResponse::Ok().json(EventsResponse {
        success: true,
        count: Some(events.len() as u64),
        events,
    })
}

fn store_failure(e: impl std::fmt::Display) -> HttpResponse {
    error!("Event store task failed: {}", e);
    HttpResponse::InternalServerError()
        .json(ErrorResponse::new(format!("Event store failure: {}", e)))
}

/// Get all events or filtered events
pub async fn get_events(
    store: web::Data<EventStore>,
    query: web::Query<EventsQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let query = EventQuery {
        threat_level: query.threat_level,
        source_ip: query.source_ip,
        event_type: query.event_type,
        limit: query.limit.unwrap_or(DEFAULT_LIMIT),
    };

    let store = store.into_inner();
    let filter = query.clone();
    match web::block(move || store.filter_events(&filter)).await {
        Ok(events) => {
            info!("Returning {} events for {:?}", events.len(), query);
            events_response(events)
        }
        Err(e) => store_failure(e),
    }
}

/// Get event statistics
pub async fn get_statistics(store: web::Data<EventStore>) -> impl Responder {
    let store = store.into_inner();
    match web::block(move || store.statistics()).await {
        Ok(statistics) => HttpResponse::Ok().json(StatsResponse {
            success: true,
            statistics,
        }),
        Err(e) => store_failure(e),
    }
}

/// Get the most recent events
pub async fn get_recent(
    store: web::Data<EventStore>,
    query: web::Query<RecentQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let store = store.into_inner();
    match web::block(move || store.recent_events(limit)).await {
        Ok(events) => events_response(events),
        Err(e) => store_failure(e),
    }
}

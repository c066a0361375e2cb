pub mod transport;

#[cfg(test)]
pub mod scripted;

/// Statistics endpoint
pub const STATS_PATH: &str = "/api/events/stats";

/// Filtered events endpoint
pub const EVENTS_PATH: &str = "/api/events";

/// Most recent events endpoint
pub const RECENT_PATH: &str = "/api/events/recent";

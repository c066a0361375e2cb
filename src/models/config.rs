use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::error::{DashboardError, DashboardResult};

/// Dashboard client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the event backend (e.g. `http://127.0.0.1:5000`)
    pub base_url: String,

    /// Auto-refresh period in seconds; `None` disables auto-refresh
    pub refresh_interval: Option<u64>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            refresh_interval: None,
        }
    }

    /// Auto-refresh period, if enabled. Zero counts as disabled.
    pub fn refresh_period(&self) -> Option<Duration> {
        self.refresh_interval
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Development backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port for the REST API server
    pub port: u16,

    /// JSON file holding the processed events
    pub data_file: PathBuf,

    /// Serve this many generated events instead of reading `data_file`
    pub demo_events: Option<usize>,
}

impl ServerConfig {
    /// `host:port` pair for binding
    pub fn bind_address(&self) -> DashboardResult<(String, u16)> {
        if self.host.trim().is_empty() {
            return Err(DashboardError::Config("host must not be empty".to_string()));
        }
        Ok((self.host.clone(), self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_refresh_interval_disables_auto_refresh() {
        let mut config = ClientConfig::new("http://127.0.0.1:5000");
        assert!(config.refresh_period().is_none());

        config.refresh_interval = Some(0);
        assert!(config.refresh_period().is_none());

        config.refresh_interval = Some(30);
        assert_eq!(config.refresh_period(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn empty_host_is_rejected() {
        let config = ServerConfig {
            host: " ".to_string(),
            port: 5000,
            data_file: PathBuf::from("processed_events.json"),
            demo_events: None,
        };
        assert!(config.bind_address().is_err());
    }
}

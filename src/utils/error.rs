use thiserror::Error;

/// Dashboard error types
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Error from the HTTP client (connection refused, reset, body read...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error from I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Well-formed response that reported `success: false` (or omitted it)
    #[error("Backend reported failure: {0}")]
    Application(String),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the processed-event store
    #[error("Store error: {0}")]
    Store(String),
}

/// The two ways a refresh can fail, as far as the view is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network unreachable, unreadable body, non-JSON or unexpected shape
    TransportOrDecode,

    /// The backend answered but did not report success
    Application,
}

impl DashboardError {
    /// Classify the error for the component boundary
    pub fn kind(&self) -> FailureKind {
        match self {
            DashboardError::Application(_) => FailureKind::Application,
            _ => FailureKind::TransportOrDecode,
        }
    }
}

/// Result type for the dashboard
pub type DashboardResult<T> = Result<T, DashboardError>;

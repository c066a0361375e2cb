use log::warn;
use serde::{Deserialize, Serialize};

/// Value the limit control holds after the filters are cleared
pub const DEFAULT_LIMIT_INPUT: &str = "100";

/// Raw values of the three filter controls, exactly as the user left them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterInputs {
    /// Threat-level selector (`""` means "all levels")
    pub threat_level: String,

    /// Free-text source IP field
    pub source_ip: String,

    /// Numeric result limit field
    pub limit: String,
}

impl FilterInputs {
    /// Control values after "clear filters"
    pub fn cleared() -> Self {
        Self {
            threat_level: String::new(),
            source_ip: String::new(),
            limit: DEFAULT_LIMIT_INPUT.to_string(),
        }
    }
}

impl Default for FilterInputs {
    fn default() -> Self {
        Self::cleared()
    }
}

/// Filter criteria for the events endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Filter by threat level
    pub threat_level: Option<String>,

    /// Filter by source IP address (matching is up to the backend)
    pub source_ip: Option<String>,

    /// Maximum number of events to return
    pub limit: Option<u32>,
}

impl FilterCriteria {
    /// Build criteria from the current control values.
    ///
    /// The IP field is trimmed; empty values become `None`. A limit that is
    /// not a non-negative integer is dropped, the same way a number input
    /// reports an empty value for text it cannot parse.
    pub fn from_inputs(inputs: &FilterInputs) -> Self {
        let limit = match inputs.limit.trim() {
            "" => None,
            raw => match raw.parse::<u32>() {
                Ok(limit) => Some(limit),
                Err(_) => {
                    warn!("Ignoring non-numeric limit {:?}", raw);
                    None
                }
            },
        };

        Self {
            threat_level: non_empty(&inputs.threat_level),
            source_ip: non_empty(inputs.source_ip.trim()),
            limit,
        }
    }

    /// Set the threat level
    pub fn with_threat_level(mut self, threat_level: impl Into<String>) -> Self {
        self.threat_level = Some(threat_level.into());
        self
    }

    /// Set the source IP
    pub fn with_source_ip(mut self, source_ip: impl Into<String>) -> Self {
        self.source_ip = Some(source_ip.into());
        self
    }

    /// Set the limit
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters for the events endpoint.
    ///
    /// Only present, non-empty fields produce a pair; an empty string is
    /// treated exactly like an absent field, so `key=` is never sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);

        if let Some(threat_level) = self.threat_level.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("threat_level", threat_level.to_string()));
        }
        if let Some(source_ip) = self.source_ip.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("source_ip", source_ip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }

        pairs
    }

    /// Whether no filter is set at all
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar field value as the backend sends it.
///
/// Processed events carry `port` and `priority` as numbers, but older exports
/// keep them as strings; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Whether the value counts as "empty" for display purposes.
    ///
    /// Mirrors the table's placeholder rule: empty strings, zero, NaN and
    /// `false` all render as the placeholder.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Integer(n) => *n == 0,
            FieldValue::Float(f) => *f == 0.0 || f.is_nan(),
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Flag(b) => !*b,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(x) if x.fract() == 0.0 && x.is_finite() => write!(f, "{}", *x as i64),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// A processed security event as returned by the events endpoints.
///
/// Every field is optional; the dashboard never assumes any of them exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Normalized event time (`YYYY-MM-DD HH:MM:SS`, UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    /// Source IP address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ip: Option<String>,

    /// Destination IP address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_ip: Option<String>,

    /// Destination port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<FieldValue>,

    /// Event type (e.g. `SSH_BRUTE_FORCE`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    /// Priority on a 1 to 5 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<FieldValue>,

    /// Threat tier label (High, Medium, Low, Unknown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_level: Option<String>,
}

impl EventRecord {
    /// Datetime, treating the empty string as absent
    pub fn datetime(&self) -> Option<&str> {
        non_empty(self.datetime.as_deref())
    }

    /// Source IP, treating the empty string as absent
    pub fn source_ip(&self) -> Option<&str> {
        non_empty(self.source_ip.as_deref())
    }

    /// Event type, treating the empty string as absent
    pub fn event_type(&self) -> Option<&str> {
        non_empty(self.event_type.as_deref())
    }

    /// Threat level, treating the empty string as absent
    pub fn threat_level(&self) -> Option<&str> {
        non_empty(self.threat_level.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Threat tier of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreatLevel {
    High,
    Medium,
    Low,
    Unknown,
}

impl ThreatLevel {
    /// Parse a tier label case-insensitively; anything unrecognized is `Unknown`
    pub fn parse(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("high") => ThreatLevel::High,
            Some("medium") => ThreatLevel::Medium,
            Some("low") => ThreatLevel::Low,
            _ => ThreatLevel::Unknown,
        }
    }
}

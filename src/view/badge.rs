/// Tier label used when an event carries no threat level
pub const UNKNOWN_TIER: &str = "Unknown";

pub const ICON_HIGH: &str = "🔴";
pub const ICON_MEDIUM: &str = "🟡";
pub const ICON_LOW: &str = "🟢";
pub const ICON_UNKNOWN: &str = "⚪";

/// Display badge for an event's threat level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatBadge {
    /// Tier icon
    pub icon: &'static str,

    /// Tier label, exactly as received (or `Unknown`)
    pub label: String,

    /// Style class, `threat-<lower-cased label>`
    pub class_name: String,
}

impl ThreatBadge {
    /// Badge text as shown in the table cell
    pub fn text(&self) -> String {
        format!("{} {}", self.icon, self.label)
    }
}

/// Build the badge for a threat level.
///
/// Icon selection is an exact, case-sensitive match on the four tier labels,
/// while the style class is lower-cased. `"high"` therefore gets the fallback
/// icon but the same `threat-high` class as `"High"`.
pub fn badge_for(threat_level: Option<&str>) -> ThreatBadge {
    let label = match threat_level {
        Some(level) if !level.is_empty() => level,
        _ => UNKNOWN_TIER,
    };

    let icon = match label {
        "High" => ICON_HIGH,
        "Medium" => ICON_MEDIUM,
        "Low" => ICON_LOW,
        "Unknown" => ICON_UNKNOWN,
        _ => ICON_UNKNOWN,
    };

    ThreatBadge {
        icon,
        label: label.to_string(),
        class_name: format!("threat-{}", label.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tiers_get_their_icons() {
        let badge = badge_for(Some("High"));
        assert_eq!(badge.icon, ICON_HIGH);
        assert_eq!(badge.label, "High");
        assert_eq!(badge.class_name, "threat-high");

        assert_eq!(badge_for(Some("Medium")).icon, ICON_MEDIUM);
        assert_eq!(badge_for(Some("Low")).icon, ICON_LOW);
        assert_eq!(badge_for(Some("Unknown")).icon, ICON_UNKNOWN);
    }

    #[test]
    fn icon_match_is_case_sensitive_but_class_is_not() {
        let badge = badge_for(Some("high"));
        assert_eq!(badge.icon, ICON_UNKNOWN);
        assert_eq!(badge.label, "high");
        assert_eq!(badge.class_name, "threat-high");
    }

    #[test]
    fn missing_level_is_unknown() {
        for level in [None, Some("")] {
            let badge = badge_for(level);
            assert_eq!(badge.icon, ICON_UNKNOWN);
            assert_eq!(badge.label, "Unknown");
            assert_eq!(badge.class_name, "threat-unknown");
        }
    }

    #[test]
    fn unrecognized_tier_keeps_its_label() {
        let badge = badge_for(Some("Critical"));
        assert_eq!(badge.text(), "⚪ Critical");
        assert_eq!(badge.class_name, "threat-critical");
    }
}

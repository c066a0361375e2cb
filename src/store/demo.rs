use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::event::{EventRecord, FieldValue};

/// Already-labelled sample events: (event type, priority, threat level)
const SAMPLES: [(&str, i64, &str); 10] = [
    ("LOGIN_FAILED", 2, "Low"),
    ("LOGIN_SUCCESS", 1, "Low"),
    ("SSH_BRUTE_FORCE", 5, "High"),
    ("WEB_ATTACK", 4, "Medium"),
    ("SQL_INJECTION", 5, "High"),
    ("RDP_LOGIN_FAILED", 3, "Medium"),
    ("PORT_SCAN", 3, "Medium"),
    ("MALWARE_DETECTED", 5, "High"),
    ("UNAUTHORIZED_ACCESS", 4, "Medium"),
    ("DATA_EXFILTRATION", 5, "High"),
];

const PORTS: [i64; 7] = [22, 80, 443, 3389, 8080, 3306, 5432];

/// Window the generated timestamps fall in
const DEMO_WINDOW_DAYS: i64 = 30;

/// Generate `count` processed-looking events spread over the last 30 days
pub fn generate_demo_events<R: Rng>(count: usize, rng: &mut R) -> Vec<EventRecord> {
    let now = Utc::now();
    let window = Duration::days(DEMO_WINDOW_DAYS).num_seconds();

    (0..count)
        .map(|_| {
            let (event_type, priority, threat_level) = *SAMPLES
                .choose(rng)
                .unwrap_or(&SAMPLES[0]);
            let at = now - Duration::seconds(rng.gen_range(0..window));

            EventRecord {
                datetime: Some(at.format("%Y-%m-%d %H:%M:%S").to_string()),
                source_ip: Some(random_ipv4(rng)),
                destination_ip: Some(random_ipv4(rng)),
                port: PORTS.choose(rng).map(|p| FieldValue::Integer(*p)),
                event_type: Some(event_type.to_string()),
                priority: Some(FieldValue::Integer(priority)),
                threat_level: Some(threat_level.to_string()),
            }
        })
        .collect()
}

fn random_ipv4<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(1..=223u8),
        rng.gen::<u8>(),
        rng.gen::<u8>(),
        rng.gen_range(1..=254u8)
    )
}

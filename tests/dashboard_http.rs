use actix_web::dev::ServerHandle;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;

use siem_dashboard::api::server;
use siem_dashboard::client::transport::HttpTransport;
use siem_dashboard::dashboard::commands::Command;
use siem_dashboard::dashboard::filters::Key;
use siem_dashboard::dashboard::{Dashboard, RefreshOutcome};
use siem_dashboard::models::event::{EventRecord, FieldValue};
use siem_dashboard::models::filter::FilterInputs;
use siem_dashboard::store::event_store::EventStore;
use siem_dashboard::utils::error::FailureKind;
use siem_dashboard::view::document::DashboardDocument;
use siem_dashboard::view::html::render_table_body;
use siem_dashboard::view::{DashboardView, FilterControls, StatSlot, TableBody, ViewBindings};

fn record(datetime: &str, source_ip: &str, port: Option<i64>, threat_level: &str) -> EventRecord {
    EventRecord {
        datetime: Some(datetime.to_string()),
        source_ip: Some(source_ip.to_string()),
        destination_ip: Some("10.0.0.1".to_string()),
        port: port.map(FieldValue::Integer),
        event_type: Some("LOGIN_FAILED".to_string()),
        priority: Some(FieldValue::Integer(2)),
        threat_level: Some(threat_level.to_string()),
    }
}

fn start(store: EventStore) -> (String, ServerHandle) {
    let bound = server::bind(store, "127.0.0.1", 0).expect("bind test server");
    let url = format!("http://{}", bound.addrs[0]);
    let handle = bound.server.handle();
    actix_web::rt::spawn(bound.server);
    (url, handle)
}

fn open(url: &str) -> (Dashboard, Arc<DashboardDocument>) {
    let transport = Arc::new(HttpTransport::new(url).unwrap());
    let document = Arc::new(DashboardDocument::new());
    let bindings = ViewBindings::from_document(document.clone());
    (Dashboard::new(transport, &bindings), document)
}

#[actix_web::test]
async fn page_ready_then_filter_then_clear() {
    let (url, handle) = start(EventStore::in_memory(vec![
        record("2024-09-01 10:00:00", "192.168.1.10", Some(22), "Low"),
        record("2024-09-03 08:00:00", "203.0.113.7", None, "High"),
        record("2024-09-02 12:30:00", "192.168.1.22", Some(443), "Medium"),
    ]));
    let (dashboard, document) = open(&url);

    let outcome = dashboard.on_ready().await;
    assert!(!outcome.has_failure());
    assert_eq!(document.stat(StatSlot::TotalEvents), "3");
    assert_eq!(document.stat(StatSlot::HighThreat), "1");
    assert_eq!(document.stat(StatSlot::LastUpdated), "2024-09-03 08:00:00");
    assert_eq!(document.event_count(), "3 events");

    // newest first, and the High event has no port
    let rows = match document.table_body() {
        TableBody::Rows(rows) => rows,
        other => panic!("expected rows, got {:?}", other),
    };
    assert_eq!(rows[0].cell(1), "203.0.113.7");
    assert_eq!(rows[0].cell(3), "N/A");

    document.set_ip_filter(" 192.168.1 ");
    let outcome = dashboard.dispatch(Command::IpFieldKey(Key::Enter)).await;
    assert_eq!(outcome.events, Some(RefreshOutcome::Applied));
    assert_eq!(document.event_count(), "2 events");

    document.set_threat_filter("Critical");
    dashboard.apply_filters().await;
    assert_eq!(document.event_count(), "0 events");
    assert_eq!(
        render_table_body(&document.table_body()),
        r#"<tr><td colspan="7" class="loading">No events found</td></tr>"#
    );

    dashboard.clear_filters().await;
    assert_eq!(document.read_inputs(), FilterInputs::cleared());
    assert_eq!(document.event_count(), "3 events");

    handle.stop(true).await;
}

#[actix_web::test]
async fn file_backed_store_and_recent_events() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let events: Vec<serde_json::Value> = (1..=15)
        .map(|day| {
            json!({
                "datetime": format!("2024-09-{:02} 00:00:00", day),
                "source_ip": format!("10.1.1.{}", day),
                "port": 3389,
                "threat_level": "Medium"
            })
        })
        .collect();
    write!(file, "{}", serde_json::Value::Array(events)).unwrap();

    let (url, handle) = start(EventStore::from_file(file.path()));
    let (dashboard, document) = open(&url);

    assert_eq!(
        dashboard.event_table().show_recent(10).await,
        RefreshOutcome::Applied
    );
    assert_eq!(document.event_count(), "10 events");
    assert_eq!(document.table_body().row_count(), 10);

    document.set_limit_filter("4");
    dashboard.apply_filters().await;
    assert_eq!(document.event_count(), "4 events");

    dashboard.stats_panel().refresh_statistics().await;
    assert_eq!(document.stat(StatSlot::MediumThreat), "15");

    handle.stop(true).await;
}

#[actix_web::test]
async fn unreachable_backend_keeps_stats_and_shows_error_row() {
    // bind then stop a server so the port is known to be closed
    let (url, handle) = start(EventStore::in_memory(Vec::new()));
    handle.stop(true).await;

    let (dashboard, document) = open(&url);
    document.set_event_count("5 events");
    let before_total = document.stat(StatSlot::TotalEvents);

    let outcome = dashboard.on_ready().await;

    assert_eq!(
        outcome.statistics,
        Some(RefreshOutcome::Failed(FailureKind::TransportOrDecode))
    );
    assert_eq!(document.stat(StatSlot::TotalEvents), before_total);
    assert_eq!(document.event_count(), "5 events");
    assert!(render_table_body(&document.table_body()).contains("Failed to load events"));
    assert_eq!(document.diagnostics().len(), 2);
}

//! HTML rendering of the dashboard, matching the markup the page styles expect.

use std::fmt::Write;

use crate::view::badge::ThreatBadge;
use crate::view::document::DocumentSnapshot;
use crate::view::{Notice, NoticeKind, StatSlot, TableBody, TABLE_COLUMNS, TABLE_HEADERS};

/// Colour of error rows
const ERROR_COLOR: &str = "#ef4444";

/// Escape text for use in element content or a quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `<span>` for a threat badge
pub fn render_badge(badge: &ThreatBadge) -> String {
    format!(
        r#"<span class="threat-badge {}">{} {}</span>"#,
        escape_html(&badge.class_name),
        badge.icon,
        escape_html(&badge.label)
    )
}

fn render_notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Info => format!(
            r#"<tr><td colspan="{}" class="loading">{}</td></tr>"#,
            TABLE_COLUMNS,
            escape_html(&notice.text)
        ),
        NoticeKind::Error => format!(
            r#"<tr><td colspan="{}" class="loading" style="color: {};">{}</td></tr>"#,
            TABLE_COLUMNS,
            ERROR_COLOR,
            escape_html(&notice.text)
        ),
    }
}

/// Inner HTML of the event table body, one `<tr>` per line
pub fn render_table_body(body: &TableBody) -> String {
    match body {
        TableBody::Notice(notice) => render_notice(notice),
        TableBody::Rows(rows) => {
            let mut html = String::new();
            for row in rows {
                html.push_str("<tr>");
                for cell in &row.cells {
                    let _ = write!(html, "<td>{}</td>", escape_html(cell));
                }
                let _ = write!(html, "<td>{}</td>", render_badge(&row.badge));
                html.push_str("</tr>\n");
            }
            html
        }
    }
}

/// Stat cards, count label and event table as one HTML fragment
pub fn render_dashboard(snapshot: &DocumentSnapshot) -> String {
    let mut html = String::from("<section class=\"stats\">\n");
    for slot in StatSlot::ALL {
        let _ = writeln!(
            html,
            r#"  <div class="stat-card"><h3>{}</h3><p id="{}">{}</p></div>"#,
            slot.title(),
            slot.element_id(),
            escape_html(snapshot.stat(slot))
        );
    }
    html.push_str("</section>\n");

    let _ = writeln!(
        html,
        r#"<span id="eventCount">{}</span>"#,
        escape_html(&snapshot.event_count)
    );

    html.push_str("<table class=\"events-table\">\n<thead><tr>");
    for header in TABLE_HEADERS {
        let _ = write!(html, "<th>{}</th>", header);
    }
    html.push_str("</tr></thead>\n<tbody id=\"eventsTableBody\">\n");
    html.push_str(&render_table_body(&snapshot.table));
    if !html.ends_with('\n') {
        html.push('\n');
    }
    html.push_str("</tbody>\n</table>\n");

    html
}

//! Rendering of received events for the terminal.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::sse::Event;

/// JSON line written per event with `--json`.
#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    origin: &'a str,
    id: &'a str,
    #[serde(rename = "type")]
    event_type: &'a str,
    data: String,
    received_at: String,
}

/// Format `event` as a single JSON object.
pub fn format_json(event: &Event, received_at: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string(&EventRecord {
        origin: &event.origin,
        id: &event.id,
        event_type: &event.event_type,
        data: event.data_lossy().into_owned(),
        received_at: received_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Format `event` for humans: `[type] #id data`, omitting empty parts.
pub fn format_plain(event: &Event) -> String {
    let mut out = String::new();
    if event.has_type() {
        out.push('[');
        out.push_str(&event.event_type);
        out.push_str("] ");
    }
    if !event.id.is_empty() {
        out.push('#');
        out.push_str(&event.id);
        out.push(' ');
    }
    out.push_str(&event.data_lossy());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::TimeZone;

    fn event() -> Event {
        Event {
            origin: "http://origin".to_string(),
            id: "7".to_string(),
            event_type: "update".to_string(),
            data: Bytes::from("line one\nline two"),
        }
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_plain(&event()), "[update] #7 line one\nline two");
        let bare = Event {
            data: Bytes::from("hi"),
            ..Default::default()
        };
        assert_eq!(format_plain(&bare), "hi");
    }

    #[test]
    fn test_format_json() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let line = format_json(&event(), at).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["origin"], "http://origin");
        assert_eq!(value["id"], "7");
        assert_eq!(value["type"], "update");
        assert_eq!(value["data"], "line one\nline two");
        assert_eq!(value["received_at"], "2024-01-02T03:04:05.000Z");
    }
}

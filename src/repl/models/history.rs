//! # History Model
//!
//! Persisted record of recent requests. At most one entry per (url, method),
//! newest first, capped at a fixed retention count.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::request_model::{HttpMethod, RequestDraft};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub method: String,
    pub url: String,
    #[serde(default, deserialize_with = "text_or_json")]
    pub headers: String,
    #[serde(default, deserialize_with = "text_or_json")]
    pub body: String,
    /// Epoch milliseconds
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<u16>,
    /// Milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
}

/// Older documents may store headers/body as JSON objects instead of text
fn text_or_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

impl HistoryEntry {
    pub fn from_draft(
        draft: &RequestDraft,
        timestamp: i64,
        response_status: Option<u16>,
        response_time: Option<f64>,
    ) -> Self {
        Self {
            method: draft.method().to_string(),
            url: draft.url().to_string(),
            headers: draft.headers_text(),
            body: draft.body().to_string(),
            timestamp,
            response_status,
            response_time,
        }
    }

    /// Rebuild a draft from this entry. Unknown methods fall back to GET.
    pub fn to_draft(&self) -> RequestDraft {
        let mut draft = RequestDraft::new();
        draft.set_method(self.method.parse::<HttpMethod>().unwrap_or_default());
        draft.set_url(self.url.clone());
        draft.set_headers_text(&self.headers);
        draft.set_body(self.body.clone());
        draft
    }

    /// Text the history search matches against
    pub fn search_key(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDocument {
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
    #[serde(default = "now_millis")]
    pub last_updated: i64,
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl Default for HistoryDocument {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            last_updated: now_millis(),
        }
    }
}

impl HistoryDocument {
    /// Insert newest-first, evicting any entry with the same (url, method)
    /// and truncating to `limit`
    pub fn record(&mut self, entry: HistoryEntry, limit: usize) {
        self.entries
            .retain(|existing| !(existing.url == entry.url && existing.method == entry.method));
        self.last_updated = entry.timestamp.max(now_millis());
        self.entries.insert(0, entry);
        self.entries.truncate(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(method: &str, url: &str, timestamp: i64, status: Option<u16>) -> HistoryEntry {
        HistoryEntry {
            method: method.to_string(),
            url: url.to_string(),
            headers: String::new(),
            body: String::new(),
            timestamp,
            response_status: status,
            response_time: None,
        }
    }

    #[test]
    fn record_should_replace_same_url_and_method() {
        let mut doc = HistoryDocument::default();
        doc.record(entry("GET", "http://a", 1, Some(500)), 5);
        doc.record(entry("GET", "http://b", 2, Some(200)), 5);
        doc.record(entry("GET", "http://a", 3, Some(200)), 5);

        assert_eq!(doc.entries.len(), 2);
        assert_eq!(doc.entries[0].url, "http://a");
        assert_eq!(doc.entries[0].timestamp, 3);
        assert_eq!(doc.entries[0].response_status, Some(200));
    }

    #[test]
    fn record_should_keep_distinct_methods_for_same_url() {
        let mut doc = HistoryDocument::default();
        doc.record(entry("GET", "http://a", 1, None), 5);
        doc.record(entry("POST", "http://a", 2, None), 5);
        assert_eq!(doc.entries.len(), 2);
    }

    #[test]
    fn record_should_retain_only_newest_entries() {
        let mut doc = HistoryDocument::default();
        for i in 0..6 {
            doc.record(entry("GET", &format!("http://host/{i}"), i, None), 5);
        }

        let urls: Vec<_> = doc.entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://host/5",
                "http://host/4",
                "http://host/3",
                "http://host/2",
                "http://host/1"
            ]
        );
    }

    #[test]
    fn entry_should_serialize_camel_case_without_absent_status() {
        let json = serde_json::to_value(entry("GET", "http://a", 7, None)).unwrap();
        assert_eq!(json["timestamp"], 7);
        assert!(json.get("responseStatus").is_none());

        let json = serde_json::to_value(entry("GET", "http://a", 7, Some(201))).unwrap();
        assert_eq!(json["responseStatus"], 201);
    }

    #[test]
    fn entry_should_accept_object_headers() {
        let raw = r#"{"method":"POST","url":"http://a","headers":{"X":"1"},"body":{"a":1},"timestamp":1}"#;
        let parsed: HistoryEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.headers, r#"{"X":"1"}"#);
        assert_eq!(parsed.body, r#"{"a":1}"#);
    }

    #[test]
    fn document_should_default_missing_entries() {
        let doc: HistoryDocument = serde_json::from_str(r#"{"lastUpdated":5}"#).unwrap();
        assert!(doc.entries.is_empty());
        assert_eq!(doc.last_updated, 5);
    }

    #[test]
    fn entry_should_rebuild_draft() {
        let mut e = entry("post", "http://a", 1, None);
        e.headers = r#"{"Accept":"text/plain"}"#.to_string();
        let draft = e.to_draft();
        assert_eq!(draft.method(), HttpMethod::Post);
        assert_eq!(draft.headers().len(), 1);
    }
}

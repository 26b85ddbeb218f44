//! # HTTP Request Model
//!
//! The request draft the user is composing: method, URL, header pairs and body.
//! Only the session (through widget commits) mutates it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Supported request methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        HttpMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| anyhow::anyhow!("Unsupported method: {}", s.trim()))
    }
}

/// One header row as typed by the user. Keys need not be unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderPair {
    pub key: String,
    pub value: String,
}

impl HeaderPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Parse a JSON object into header pairs. Non-string values keep their JSON text.
/// Returns `None` when the text is not a JSON object. Blank text is no headers.
pub fn parse_header_json(text: &str) -> Option<Vec<HeaderPair>> {
    if text.trim().is_empty() {
        return Some(Vec::new());
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(
            map.into_iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    HeaderPair { key, value }
                })
                .collect(),
        ),
        _ => None,
    }
}

/// The request being composed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDraft {
    method: HttpMethod,
    url: String,
    headers: Vec<HeaderPair>,
    /// Header text that could not be parsed into pairs (prefill or history).
    /// Kept verbatim so sending reports it as a validation error.
    unparsed_headers: Option<String>,
    body: String,
}

impl RequestDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn set_method(&mut self, method: HttpMethod) {
        self.method = method;
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn headers(&self) -> &[HeaderPair] {
        &self.headers
    }

    /// Replace the header rows; rows with an empty key are dropped
    pub fn set_headers(&mut self, headers: Vec<HeaderPair>) {
        self.headers = headers
            .into_iter()
            .filter(|pair| !pair.key.trim().is_empty())
            .collect();
        self.unparsed_headers = None;
    }

    /// Set headers from JSON object text. Text that does not parse is kept
    /// as-is and reported when the request is sent.
    pub fn set_headers_text(&mut self, text: &str) {
        match parse_header_json(text) {
            Some(pairs) => self.set_headers(pairs),
            None => {
                self.headers.clear();
                self.unparsed_headers = Some(text.to_string());
            }
        }
    }

    pub fn unparsed_headers(&self) -> Option<&str> {
        self.unparsed_headers.as_deref()
    }

    /// Headers as a JSON object, duplicate keys last-wins
    pub fn header_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for pair in &self.headers {
            map.insert(pair.key.clone(), Value::String(pair.value.clone()));
        }
        map
    }

    /// Header text as persisted in history: the JSON object, or the raw text
    /// when it never parsed
    pub fn headers_text(&self) -> String {
        if let Some(raw) = &self.unparsed_headers {
            return raw.clone();
        }
        if self.headers.is_empty() {
            return String::new();
        }
        Value::Object(self.header_map()).to_string()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }
}

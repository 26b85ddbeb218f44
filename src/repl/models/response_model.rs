//! # Execution Result Model
//!
//! What one request attempt produced: status, headers, body, phase timings and
//! an optional classified error. Results are immutable once built and are
//! replaced wholesale by the next send.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use super::theme::ThemeRole;

pub const INVALID_JSON_STATUS_TEXT: &str = "Invalid JSON";
pub const REQUEST_FAILED_STATUS_TEXT: &str = "Request Failed";

/// Numeric status, or the sentinel for attempts that never got one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Code(u16),
    Error,
}

impl ResponseStatus {
    pub fn code(&self) -> Option<u16> {
        match self {
            ResponseStatus::Code(code) => Some(*code),
            ResponseStatus::Error => None,
        }
    }

    /// Success for display purposes: [200, 400)
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseStatus::Code(code) if (200..400).contains(code))
    }

    /// Color used for the status line: 2xx success, 4xx/5xx and errors as
    /// error, anything else accent
    pub fn color_role(&self) -> ThemeRole {
        match self {
            ResponseStatus::Code(code) if (200..300).contains(code) => ThemeRole::Success,
            ResponseStatus::Code(code) if (400..600).contains(code) => ThemeRole::Error,
            ResponseStatus::Code(_) => ThemeRole::Accent,
            ResponseStatus::Error => ThemeRole::Error,
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::Code(code) => write!(f, "{code}"),
            ResponseStatus::Error => f.write_str("Error"),
        }
    }
}

/// Instants observed while a request runs. `tls` is only set for HTTPS.
#[derive(Debug, Clone, Copy)]
pub struct PhaseCheckpoints {
    pub start: Instant,
    pub dns: Instant,
    pub tcp: Instant,
    pub tls: Option<Instant>,
    pub ttfb: Instant,
    pub end: Instant,
}

impl PhaseCheckpoints {
    /// All checkpoints collapsed onto `start`; callers advance them as phases complete
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            dns: start,
            tcp: start,
            tls: None,
            ttfb: start,
            end: start,
        }
    }
}

/// Durations derived from checkpoints. `ttfb` is measured from request start.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseTimings {
    pub dns_lookup: Duration,
    pub tcp_connection: Duration,
    pub tls_handshake: Duration,
    pub ttfb: Duration,
    pub content_download: Duration,
    pub total: Duration,
    pub content_length: u64,
}

impl PhaseTimings {
    pub fn from_checkpoints(checkpoints: &PhaseCheckpoints, content_length: u64) -> Self {
        let PhaseCheckpoints {
            start,
            dns,
            tcp,
            tls,
            ttfb,
            end,
        } = *checkpoints;

        Self {
            dns_lookup: dns.saturating_duration_since(start),
            tcp_connection: tcp.saturating_duration_since(dns),
            tls_handshake: tls
                .map(|tls| tls.saturating_duration_since(tcp))
                .unwrap_or_default(),
            ttfb: ttfb.saturating_duration_since(start),
            content_download: end.saturating_duration_since(ttfb),
            total: end.saturating_duration_since(start),
            content_length,
        }
    }

    /// Average download speed in bytes/sec, `None` when nothing was timed
    pub fn speed(&self) -> Option<f64> {
        let secs = self.total.as_secs_f64();
        (secs > 0.0).then(|| self.content_length as f64 / secs)
    }
}

/// Byte-level progress of a body download
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownloadProgress {
    pub received: u64,
    /// 0 when the server sent no length
    pub total: u64,
    pub bytes_per_sec: f64,
}

impl DownloadProgress {
    /// Percentage, or `None` when the total is unknown
    pub fn percent(&self) -> Option<f64> {
        (self.total > 0).then(|| (self.received as f64 / self.total as f64 * 100.0).min(100.0))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub status: ResponseStatus,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub metrics: PhaseTimings,
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Local validation failure; no network call was made
    pub fn invalid_json(detail: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            status_text: INVALID_JSON_STATUS_TEXT.to_string(),
            headers: BTreeMap::new(),
            body: String::new(),
            metrics: PhaseTimings::default(),
            error: Some(detail.into()),
        }
    }

    /// Transport failure (DNS, connect, TLS, stream)
    pub fn request_failed(detail: impl Into<String>, metrics: PhaseTimings) -> Self {
        Self {
            status: ResponseStatus::Error,
            status_text: REQUEST_FAILED_STATUS_TEXT.to_string(),
            headers: BTreeMap::new(),
            body: String::new(),
            metrics,
            error: Some(detail.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_validation_error(&self) -> bool {
        self.status == ResponseStatus::Error && self.status_text == INVALID_JSON_STATUS_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoints(offsets_ms: [u64; 5], tls_ms: Option<u64>) -> PhaseCheckpoints {
        let start = Instant::now();
        let at = |ms: u64| start + Duration::from_millis(ms);
        PhaseCheckpoints {
            start,
            dns: at(offsets_ms[0]),
            tcp: at(offsets_ms[1]),
            tls: tls_ms.map(at),
            ttfb: at(offsets_ms[3]),
            end: at(offsets_ms[4]),
        }
    }

    #[test]
    fn timings_should_be_derived_from_cumulative_checkpoints() {
        let timings = PhaseTimings::from_checkpoints(&checkpoints([10, 30, 0, 80, 120], Some(50)), 42);

        assert_eq!(timings.dns_lookup, Duration::from_millis(10));
        assert_eq!(timings.tcp_connection, Duration::from_millis(20));
        assert_eq!(timings.tls_handshake, Duration::from_millis(20));
        assert_eq!(timings.ttfb, Duration::from_millis(80));
        assert_eq!(timings.content_download, Duration::from_millis(40));
        assert_eq!(timings.total, Duration::from_millis(120));
        assert_eq!(timings.content_length, 42);
    }

    #[test]
    fn plaintext_timings_should_have_zero_tls() {
        let timings = PhaseTimings::from_checkpoints(&checkpoints([1, 2, 0, 5, 9], None), 0);
        assert_eq!(timings.tls_handshake, Duration::ZERO);
        assert!(timings.total >= timings.ttfb);
    }

    #[test]
    fn out_of_order_checkpoints_should_not_go_negative() {
        let mut cps = checkpoints([10, 5, 0, 3, 20], None);
        cps.tcp = cps.start;
        let timings = PhaseTimings::from_checkpoints(&cps, 0);
        assert_eq!(timings.tcp_connection, Duration::ZERO);
        assert!(timings.total >= timings.ttfb);
    }

    #[test]
    fn status_should_classify_success_range() {
        assert!(ResponseStatus::Code(200).is_success());
        assert!(ResponseStatus::Code(304).is_success());
        assert!(!ResponseStatus::Code(404).is_success());
        assert!(!ResponseStatus::Error.is_success());
        assert_eq!(ResponseStatus::Code(302).color_role(), ThemeRole::Accent);
        assert_eq!(ResponseStatus::Code(503).color_role(), ThemeRole::Error);
    }

    #[test]
    fn progress_should_be_indeterminate_without_total() {
        let progress = DownloadProgress {
            received: 512,
            total: 0,
            bytes_per_sec: 0.0,
        };
        assert_eq!(progress.percent(), None);

        let progress = DownloadProgress { total: 1024, ..progress };
        assert_eq!(progress.percent(), Some(50.0));
    }

    #[test]
    fn invalid_json_result_should_be_labeled() {
        let result = ExecutionResult::invalid_json("key must be a string");
        assert_eq!(result.status, ResponseStatus::Error);
        assert_eq!(result.status_text, "Invalid JSON");
        assert!(result.is_validation_error());
    }
}

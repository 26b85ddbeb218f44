//! Small display formatters

use chrono::{Local, TimeZone};
use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human readable size with 1024 steps, at most two decimals
pub fn format_bytes(bytes: f64) -> String {
    if bytes <= 0.0 || !bytes.is_finite() {
        return "0 B".to_string();
    }
    let exponent = (bytes.ln() / 1024f64.ln()).floor().clamp(0.0, 3.0) as usize;
    let scaled = bytes / 1024f64.powi(exponent as i32);
    let mut number = format!("{scaled:.2}");
    if number.contains('.') {
        number = number.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{number} {}", BYTE_UNITS[exponent])
}

/// Milliseconds with one decimal, e.g. `12.5ms`
pub fn format_duration_ms(duration: Duration) -> String {
    format!("{:.1}ms", duration.as_secs_f64() * 1000.0)
}

/// `host/path` with long paths cut to 17 characters plus `...`; unparsable
/// URLs are cut at 27 characters instead
pub fn shorten_url(url: &str) -> String {
    let parsed = url
        .parse::<hyper::Uri>()
        .ok()
        .and_then(|uri| uri.host().map(|host| (host.to_string(), uri.path().to_string())));

    match parsed {
        Some((host, path)) => {
            let path = if path.chars().count() > 20 {
                format!("{}...", path.chars().take(17).collect::<String>())
            } else {
                path
            };
            format!("{host}{path}")
        }
        None if url.chars().count() > 30 => {
            format!("{}...", url.chars().take(27).collect::<String>())
        }
        None => url.to_string(),
    }
}

/// Local time of day for an epoch-millisecond timestamp
pub fn local_time_of_day(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Cut `text` so it occupies at most `width` terminal columns
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

//! # JSON Highlighting
//!
//! Pretty-prints a JSON body and colors it line by line. Text that is not JSON
//! comes back as plain lines so the viewer never fails on a malformed body.

use regex::Regex;
use std::sync::OnceLock;

use crate::repl::models::{StyledLine, StyledSpan, ThemeRole};

const KEY_LINE_PATTERN: &str = r#"^"([^"]+)"\s*:\s*(.*)$"#;

fn key_line_regex() -> Option<&'static Regex> {
    static KEY_LINE: OnceLock<Option<Regex>> = OnceLock::new();
    KEY_LINE
        .get_or_init(|| Regex::new(KEY_LINE_PATTERN).ok())
        .as_ref()
}

/// Pretty-print `body` with two-space indentation, if it is JSON
pub fn pretty_json(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

fn value_role(value: &str) -> ThemeRole {
    match value {
        v if v.starts_with('"') => ThemeRole::Success,
        "true" | "false" => ThemeRole::Accent,
        "null" => ThemeRole::Muted,
        "{" | "}" | "[" | "]" | "{}" | "[]" => ThemeRole::Muted,
        v if v.parse::<f64>().is_ok() => ThemeRole::Secondary,
        _ => ThemeRole::White,
    }
}

fn split_trailing_comma(text: &str) -> (&str, bool) {
    match text.strip_suffix(',') {
        Some(stripped) => (stripped, true),
        None => (text, false),
    }
}

fn highlight_line(line: &str) -> StyledLine {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];
    let mut styled = StyledLine::default();
    if !indent.is_empty() {
        styled.push(StyledSpan::plain(indent));
    }

    let captures = key_line_regex().and_then(|re| re.captures(trimmed));
    let value_text = match &captures {
        Some(caps) => {
            let key = caps.get(1).map_or("", |m| m.as_str());
            styled.push(StyledSpan::colored(format!("\"{key}\""), ThemeRole::Primary));
            styled.push(StyledSpan::plain(": "));
            caps.get(2).map_or("", |m| m.as_str())
        }
        None => trimmed,
    };

    let (value, has_comma) = split_trailing_comma(value_text);
    styled.push(StyledSpan::colored(value, value_role(value)));
    if has_comma {
        styled.push(StyledSpan::plain(","));
    }
    styled
}

/// Highlighted lines for a response body
pub fn highlight_json(body: &str) -> Vec<StyledLine> {
    match pretty_json(body) {
        Some(pretty) => pretty.lines().map(highlight_line).collect(),
        None => body.lines().map(StyledLine::plain).collect(),
    }
}

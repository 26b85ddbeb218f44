//! # Response and Metrics Panels
//!
//! Content trees for the two scrollable tabs. Heights come from
//! [`ContentNode::estimate_height`], so whatever is built here is exactly what
//! the viewport pages through.

use std::time::Duration;

use super::viewport::ContentNode;
use crate::repl::models::{ExecutionResult, PhaseTimings, StyledLine, StyledSpan, ThemeRole};
use crate::repl::utils::{format_bytes, highlight_json};

const LABEL_WIDTH: usize = 9;
const METRIC_LABEL_WIDTH: usize = 16;
const BAR_WIDTH: usize = 40;
const RULE: &str = "────────────────────────────────────────────────────────────";

fn label(text: &str) -> StyledSpan {
    StyledSpan::colored(format!("{text:<LABEL_WIDTH$}"), ThemeRole::Primary)
}

fn indented(mut line: StyledLine) -> StyledLine {
    line.spans.insert(0, StyledSpan::plain("  "));
    line
}

fn blank() -> ContentNode {
    ContentNode::Line(StyledLine::default())
}

pub fn response_content(result: Option<&ExecutionResult>) -> ContentNode {
    let Some(result) = result else {
        return ContentNode::Line(StyledLine::colored(
            "No response yet. Send a request first.",
            ThemeRole::Muted,
        ));
    };

    let mut nodes = vec![ContentNode::Line(StyledLine::new(vec![
        label("STATUS:"),
        StyledSpan::colored(
            format!("{} {}", result.status, result.status_text),
            result.status.color_role(),
        )
        .bold(),
    ]))];

    if let Some(error) = result.error.as_deref().filter(|e| !e.is_empty()) {
        nodes.push(ContentNode::Line(StyledLine::new(vec![
            label("ERROR:"),
            StyledSpan::colored(error, ThemeRole::Error),
        ])));
    }

    nodes.push(blank());
    nodes.push(ContentNode::Line(StyledLine::new(vec![label("HEADERS:")])));
    if result.headers.is_empty() {
        nodes.push(ContentNode::Line(indented(StyledLine::colored(
            "(none)",
            ThemeRole::Muted,
        ))));
    }
    for (key, value) in &result.headers {
        nodes.push(ContentNode::Line(indented(StyledLine::new(vec![
            StyledSpan::colored(key, ThemeRole::Accent),
            StyledSpan::colored(": ", ThemeRole::Muted),
            StyledSpan::colored(value, ThemeRole::Success),
        ]))));
    }

    nodes.push(blank());
    nodes.push(ContentNode::Line(StyledLine::new(vec![label("PAYLOAD:")])));
    if result.body.is_empty() {
        nodes.push(ContentNode::Line(indented(StyledLine::colored(
            "(empty)",
            ThemeRole::Muted,
        ))));
    } else {
        nodes.push(ContentNode::Group(
            highlight_json(&result.body)
                .into_iter()
                .map(|line| ContentNode::Line(indented(line)))
                .collect(),
        ));
    }

    ContentNode::Group(nodes)
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

fn metric_bar(name: &str, value: Duration, max_ms: f64, role: ThemeRole) -> ContentNode {
    let value_ms = millis(value);
    let filled = ((value_ms / max_ms) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    ContentNode::Line(StyledLine::new(vec![
        StyledSpan::colored(format!("{name:<METRIC_LABEL_WIDTH$}"), ThemeRole::Muted),
        StyledSpan::colored(
            format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled)),
            role,
        ),
        StyledSpan::colored(format!("{:>10}", format!("{value_ms:.1}ms")), ThemeRole::White).bold(),
    ]))
}

fn summary_row(name: &str, value: String, role: ThemeRole) -> ContentNode {
    ContentNode::Line(StyledLine::new(vec![
        StyledSpan::colored(format!("{name:<METRIC_LABEL_WIDTH$}"), ThemeRole::Accent).bold(),
        StyledSpan::colored(value, role).bold(),
    ]))
}

fn timings_of(result: Option<&ExecutionResult>) -> Option<&PhaseTimings> {
    // Results without a status code never completed an exchange
    result
        .filter(|r| r.status.code().is_some())
        .map(|r| &r.metrics)
}

pub fn metrics_content(result: Option<&ExecutionResult>) -> ContentNode {
    let Some(m) = timings_of(result) else {
        return ContentNode::Line(StyledLine::colored(
            "No metrics available. Send a request first.",
            ThemeRole::Muted,
        ));
    };

    let max_ms = [
        m.dns_lookup,
        m.tcp_connection,
        m.tls_handshake,
        m.ttfb,
        m.content_download,
    ]
    .into_iter()
    .map(millis)
    .fold(1.0, f64::max);

    let mut nodes = vec![
        ContentNode::Line(StyledLine::colored("⚡ Performance Breakdown", ThemeRole::Accent)),
        ContentNode::Line(StyledLine::colored(RULE, ThemeRole::Muted)),
        blank(),
        metric_bar("DNS Lookup", m.dns_lookup, max_ms, ThemeRole::Cool),
        metric_bar("TCP Connect", m.tcp_connection, max_ms, ThemeRole::Success),
    ];
    if !m.tls_handshake.is_zero() {
        nodes.push(metric_bar(
            "TLS Handshake",
            m.tls_handshake,
            max_ms,
            ThemeRole::Secondary,
        ));
    }
    nodes.push(metric_bar("TTFB", m.ttfb, max_ms, ThemeRole::Accent));
    nodes.push(metric_bar(
        "Download",
        m.content_download,
        max_ms,
        ThemeRole::Primary,
    ));

    nodes.push(blank());
    nodes.push(ContentNode::Line(StyledLine::colored(RULE, ThemeRole::Muted)));
    nodes.push(summary_row(
        "Total Time",
        format!("{:.2} ms", millis(m.total)),
        ThemeRole::White,
    ));
    nodes.push(summary_row(
        "Size",
        format_bytes(m.content_length as f64),
        ThemeRole::White,
    ));
    if let Some(speed) = m.speed() {
        nodes.push(summary_row(
            "Speed",
            format!("{}/s", format_bytes(speed)),
            ThemeRole::Success,
        ));
    }

    nodes.push(blank());
    nodes.push(ContentNode::Line(StyledLine::colored(
        "TTFB = Time To First Byte (DNS + TCP + TLS + Server Processing)",
        ThemeRole::Muted,
    )));

    ContentNode::Group(nodes)
}

//! # Request Export
//!
//! Renders the request draft as a shell `curl` invocation or a JavaScript
//! `fetch` call, and delivers it to the system clipboard or a file under the
//! exports directory.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::repl::models::{HttpMethod, RequestDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Curl,
    Fetch,
}

impl ExportFormat {
    pub fn toggled(self) -> Self {
        match self {
            ExportFormat::Curl => ExportFormat::Fetch,
            ExportFormat::Fetch => ExportFormat::Curl,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Curl => ".sh",
            ExportFormat::Fetch => ".js",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Curl => "cURL",
            ExportFormat::Fetch => "Fetch",
        }
    }

    pub fn render(self, draft: &RequestDraft) -> String {
        match self {
            ExportFormat::Curl => to_curl(draft),
            ExportFormat::Fetch => to_fetch(draft),
        }
    }
}

fn sends_body(draft: &RequestDraft) -> bool {
    !draft.body().is_empty() && draft.method() != HttpMethod::Get
}

/// Header object for export; unparsable header text exports no headers
fn export_headers(draft: &RequestDraft) -> Map<String, Value> {
    if draft.unparsed_headers().is_some() {
        return Map::new();
    }
    draft.header_map()
}

pub fn to_curl(draft: &RequestDraft) -> String {
    let mut parts = vec![
        "curl".to_string(),
        format!("-X {}", draft.method()),
        format!("'{}'", draft.url()),
    ];
    for (key, value) in export_headers(draft) {
        let value = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };
        parts.push(format!("-H '{key}: {value}'"));
    }
    if sends_body(draft) {
        parts.push(format!("-d '{}'", draft.body()));
    }
    parts.join(" \\\n  ")
}

pub fn to_fetch(draft: &RequestDraft) -> String {
    let mut options = Map::new();
    options.insert(
        "method".to_string(),
        Value::String(draft.method().to_string()),
    );
    let headers = export_headers(draft);
    if !headers.is_empty() {
        options.insert("headers".to_string(), Value::Object(headers));
    }
    if sends_body(draft) {
        options.insert("body".to_string(), Value::String(draft.body().to_string()));
    }
    let options = serde_json::to_string_pretty(&Value::Object(options)).unwrap_or_default();

    format!(
        "fetch('{}', {options})\n  .then(response => response.json())\n  .then(data => console.log(data))\n  .catch(error => console.error('Error:', error));",
        draft.url()
    )
}

/// Put text on the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Clipboard not available")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to copy to clipboard")?;
    Ok(())
}

/// File name with the format's extension appended when missing
pub fn export_file_name(name: &str, format: ExportFormat) -> String {
    let name = name.trim();
    if name.ends_with(format.extension()) {
        name.to_string()
    } else {
        format!("{name}{}", format.extension())
    }
}

/// Write `content` to `exports_dir/file_name`, creating the directory
pub fn save_to_file(content: &str, exports_dir: &Path, file_name: &str) -> Result<PathBuf> {
    let path = exports_dir.join(file_name);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Exported request to {}", path.display());
    Ok(path)
}

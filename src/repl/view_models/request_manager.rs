//! # Request Management
//!
//! Draft edits, request lifecycle (loading, progress, result) and the stored
//! collections the session reloads: history and theme.

use std::time::Instant;

use super::core::{StatusKind, ViewModel, SPINNER_FRAMES, SPINNER_INTERVAL};
use crate::repl::events::{EditableField, Tab, Widget};
use crate::repl::models::{
    DownloadProgress, ExecutionResult, HeaderPair, HistoryEntry, HttpMethod, RequestDraft,
    ResponseStatus, Theme,
};
use crate::repl::utils::format_duration_ms;

impl ViewModel {
    /// Apply text committed from a field edit dialog
    pub fn commit_field(&mut self, field: EditableField, text: &str) {
        match field {
            EditableField::Method => match text.parse::<HttpMethod>() {
                Ok(method) => self.draft.set_method(method),
                Err(e) => {
                    tracing::warn!("Rejected method '{}': {}", text, e);
                    self.set_status(e.to_string(), StatusKind::Error);
                }
            },
            EditableField::Url => self.draft.set_url(text),
            EditableField::Body => self.draft.set_body(text),
        }
    }

    pub fn set_headers(&mut self, pairs: Vec<HeaderPair>) {
        self.draft.set_headers(pairs);
    }

    pub fn set_draft(&mut self, draft: RequestDraft) {
        self.draft = draft;
    }

    /// Load an entry into the draft and return to the Request tab
    pub fn load_history_entry(&mut self, entry: &HistoryEntry) {
        tracing::info!("Loading history entry {} {}", entry.method, entry.url);
        self.draft = entry.to_draft();
        self.switch_tab(Tab::Request);
        self.focus_widget(Widget::Method);
        self.set_status(
            format!("Loaded {} {}", entry.method, entry.url),
            StatusKind::Info,
        );
    }

    /// Field suggestions offered by the edit dialog
    pub fn field_suggestions(&self, field: EditableField) -> Vec<String> {
        match field {
            EditableField::Method => HttpMethod::ALL.iter().map(|m| m.to_string()).collect(),
            EditableField::Url => {
                let mut urls: Vec<String> = Vec::new();
                for entry in &self.history {
                    if !urls.contains(&entry.url) {
                        urls.push(entry.url.clone());
                    }
                }
                urls
            }
            EditableField::Body => Vec::new(),
        }
    }

    pub fn field_value(&self, field: EditableField) -> String {
        match field {
            EditableField::Method => self.draft.method().to_string(),
            EditableField::Url => self.draft.url().to_string(),
            EditableField::Body => self.draft.body().to_string(),
        }
    }

    pub fn set_history(&mut self, entries: Vec<HistoryEntry>) {
        self.history = entries;
        self.sync_history_window();
        let scope = self.focus_scope();
        self.focus.ensure_valid(scope);
    }

    /// Total replacement of the active palette
    pub fn apply_theme(&mut self, theme: Theme) {
        tracing::debug!("Applying theme {}", theme.name);
        self.theme = theme;
    }

    pub fn begin_request(&mut self) {
        self.loading = true;
        self.progress = None;
        self.spinner.frame = 0;
        self.spinner.last_tick = Instant::now();
        self.set_status(
            format!("Sending {} {}", self.draft.method(), self.draft.url().trim()),
            StatusKind::Info,
        );
    }

    pub fn update_progress(&mut self, progress: DownloadProgress) {
        if self.loading {
            self.progress = Some(progress);
        }
    }

    /// Show a finished attempt on the Response tab
    pub fn show_result(&mut self, result: ExecutionResult) {
        self.loading = false;
        self.progress = None;

        let (text, kind) = match (&result.status, result.error.as_deref()) {
            (ResponseStatus::Code(code), _) => (
                format!(
                    "{} {} in {}",
                    code,
                    result.status_text,
                    format_duration_ms(result.metrics.total)
                ),
                if result.is_success() {
                    StatusKind::Success
                } else {
                    StatusKind::Error
                },
            ),
            (ResponseStatus::Error, Some(detail)) => {
                (format!("{}: {}", result.status_text, detail), StatusKind::Error)
            }
            (ResponseStatus::Error, None) => (result.status_text.clone(), StatusKind::Error),
        };
        self.set_status(text, kind);

        self.result = Some(result);
        self.switch_tab(Tab::Response);
    }

    /// Advance the spinner if its interval passed; true when a redraw is due
    pub fn tick_spinner(&mut self, now: Instant) -> bool {
        if !self.loading || now.duration_since(self.spinner.last_tick) < SPINNER_INTERVAL {
            return false;
        }
        self.spinner.frame = (self.spinner.frame + 1) % SPINNER_FRAMES.len();
        self.spinner.last_tick = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::models::PhaseTimings;
    use std::time::Duration;

    #[test]
    fn invalid_method_should_keep_draft_and_report() {
        let mut vm = ViewModel::default();
        vm.commit_field(EditableField::Method, "fetch");
        assert_eq!(vm.draft().method(), HttpMethod::Get);
        assert_eq!(vm.status().map(|s| s.kind), Some(StatusKind::Error));

        vm.commit_field(EditableField::Method, "post");
        assert_eq!(vm.draft().method(), HttpMethod::Post);
    }

    #[test]
    fn result_should_switch_to_response_tab() {
        let mut vm = ViewModel::default();
        vm.begin_request();
        assert!(vm.is_loading());
        vm.show_result(ExecutionResult::invalid_json("bad"));

        assert!(!vm.is_loading());
        assert_eq!(vm.active_tab(), Tab::Response);
        assert_eq!(
            vm.status().map(|s| s.text.as_str()),
            Some("Invalid JSON: bad")
        );
    }

    #[test]
    fn second_result_should_refresh_response_content() {
        let mut vm = ViewModel::default();
        vm.show_result(ExecutionResult::invalid_json("first"));
        vm.show_result(ExecutionResult::request_failed(
            "second",
            PhaseTimings::default(),
        ));
        assert!(vm.visible_content()[0].text().contains("Request Failed"));
    }

    #[test]
    fn progress_should_be_ignored_when_idle() {
        let mut vm = ViewModel::default();
        vm.update_progress(DownloadProgress {
            received: 1,
            total: 0,
            bytes_per_sec: 1.0,
        });
        assert!(vm.progress().is_none());
    }

    #[test]
    fn spinner_should_advance_only_while_loading() {
        let mut vm = ViewModel::default();
        let later = Instant::now() + Duration::from_secs(1);
        assert!(!vm.tick_spinner(later));
        vm.begin_request();
        assert!(vm.tick_spinner(later));
        assert_eq!(vm.spinner_frame(), SPINNER_FRAMES[1]);
    }

    #[test]
    fn url_suggestions_should_come_from_history() {
        let entry = |url: &str, method: &str| HistoryEntry {
            method: method.to_string(),
            url: url.to_string(),
            headers: String::new(),
            body: String::new(),
            timestamp: 0,
            response_status: None,
            response_time: None,
        };
        let mut vm = ViewModel::default();
        vm.set_history(vec![entry("http://a", "GET"), entry("http://a", "POST")]);
        assert_eq!(vm.field_suggestions(EditableField::Url), vec!["http://a"]);
        assert_eq!(vm.field_suggestions(EditableField::Method).len(), 7);
    }
}

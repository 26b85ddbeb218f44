//! # Export Dialog
//!
//! Two toggle rows (format, action) and a filename prompt for saving. The
//! dialog only decides what to export; the controller performs the clipboard
//! or file write and reports back with [`ExportDialog::report`], after which
//! the dialog closes itself following a short delay.

use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

use super::typed_char;
use crate::repl::services::ExportFormat;

const COPY_CLOSE_DELAY: Duration = Duration::from_millis(1500);
const SAVE_CLOSE_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportAction {
    #[default]
    Copy,
    Save,
}

impl ExportAction {
    fn toggled(self) -> Self {
        match self {
            ExportAction::Copy => ExportAction::Save,
            ExportAction::Save => ExportAction::Copy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportRow {
    #[default]
    Format,
    Action,
    /// Filename prompt for saving
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Continue,
    Close,
    Copy(ExportFormat),
    Save {
        format: ExportFormat,
        file_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportDialog {
    format: ExportFormat,
    action: ExportAction,
    active_row: ExportRow,
    file_path: String,
    message: Option<String>,
    close_at: Option<Instant>,
}

impl ExportDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn action(&self) -> ExportAction {
        self.action
    }

    pub fn active_row(&self) -> ExportRow {
        self.active_row
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Record the outcome of an export and schedule the dialog to close
    pub fn report(&mut self, message: impl Into<String>, now: Instant) {
        let delay = match self.action {
            ExportAction::Copy => COPY_CLOSE_DELAY,
            ExportAction::Save => SAVE_CLOSE_DELAY,
        };
        self.message = Some(message.into());
        self.close_at = Some(now + delay);
    }

    pub fn should_close(&self, now: Instant) -> bool {
        self.close_at.is_some_and(|at| now >= at)
    }

    fn handle_path_key(&mut self, key: KeyEvent) -> ExportOutcome {
        match key.code {
            KeyCode::Esc => self.active_row = ExportRow::Action,
            KeyCode::Enter => {
                if self.file_path.trim().is_empty() {
                    self.message = Some("Please enter a file path".to_string());
                } else {
                    return ExportOutcome::Save {
                        format: self.format,
                        file_name: self.file_path.clone(),
                    };
                }
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.file_path.pop();
            }
            _ => {
                if let Some(ch) = typed_char(&key) {
                    self.file_path.push(ch);
                }
            }
        }
        ExportOutcome::Continue
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ExportOutcome {
        if self.active_row == ExportRow::Path {
            return self.handle_path_key(key);
        }
        let toggles = matches!(
            key.code,
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l')
        );
        match key.code {
            KeyCode::Esc => return ExportOutcome::Close,
            KeyCode::Tab => {
                self.active_row = match self.active_row {
                    ExportRow::Format => ExportRow::Action,
                    _ => ExportRow::Format,
                };
            }
            KeyCode::Enter => match self.action {
                ExportAction::Copy => return ExportOutcome::Copy(self.format),
                ExportAction::Save => {
                    self.active_row = ExportRow::Path;
                    self.message = None;
                }
            },
            _ if toggles => match self.active_row {
                ExportRow::Format => self.format = self.format.toggled(),
                ExportRow::Action => self.action = self.action.toggled(),
                ExportRow::Path => {}
            },
            _ => {}
        }
        ExportOutcome::Continue
    }
}

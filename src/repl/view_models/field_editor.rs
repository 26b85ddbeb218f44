//! # Field Edit Dialog
//!
//! Single-line editor opened with Enter on a draft field. It owns every key
//! until Escape (discard) or Enter (commit). When the typed prefix matches
//! any suggestion, a dropdown layers on top: Up/Down move the highlight with
//! wrap-around and Enter/Tab take the highlighted suggestion instead of
//! committing.

use crossterm::event::{KeyCode, KeyEvent};

use super::typed_char;
use crate::repl::events::EditableField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEditorOutcome {
    Continue,
    Cancel,
    Commit(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldEditor {
    field: EditableField,
    buffer: String,
    suggestions: Vec<String>,
    filtered: Vec<String>,
    highlighted: usize,
}

impl FieldEditor {
    /// The dropdown stays closed until the first edit
    pub fn new(field: EditableField, value: &str, suggestions: Vec<String>) -> Self {
        Self {
            field,
            buffer: value.to_string(),
            suggestions: suggestions
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .collect(),
            filtered: Vec::new(),
            highlighted: 0,
        }
    }

    pub fn field(&self) -> EditableField {
        self.field
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Suggestions currently offered; empty when the dropdown is closed
    pub fn suggestions(&self) -> &[String] {
        &self.filtered
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn is_suggesting(&self) -> bool {
        !self.filtered.is_empty()
    }

    fn refilter(&mut self) {
        self.highlighted = 0;
        if self.buffer.is_empty() {
            self.filtered.clear();
            return;
        }
        let prefix = self.buffer.to_lowercase();
        self.filtered = self
            .suggestions
            .iter()
            .filter(|s| s.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect();
    }

    fn accept_suggestion(&mut self) {
        if let Some(choice) = self.filtered.get(self.highlighted).cloned() {
            self.buffer = choice;
        }
        self.filtered.clear();
        self.highlighted = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FieldEditorOutcome {
        match key.code {
            KeyCode::Esc => return FieldEditorOutcome::Cancel,
            KeyCode::Enter if !self.is_suggesting() => {
                return FieldEditorOutcome::Commit(self.buffer.clone());
            }
            KeyCode::Up | KeyCode::Down if self.is_suggesting() => {
                let len = self.filtered.len();
                self.highlighted = if key.code == KeyCode::Up {
                    (self.highlighted + len - 1) % len
                } else {
                    (self.highlighted + 1) % len
                };
            }
            KeyCode::Enter | KeyCode::Tab if self.is_suggesting() => self.accept_suggestion(),
            KeyCode::Backspace | KeyCode::Delete => {
                self.buffer.pop();
                self.refilter();
            }
            _ => {
                if let Some(ch) = typed_char(&key) {
                    self.buffer.push(ch);
                    self.refilter();
                }
            }
        }
        FieldEditorOutcome::Continue
    }
}

//! # Headers Editor
//!
//! Modal grid of key/value rows. Tab walks key then value then the next
//! row's key, Enter appends a row, Backspace on an empty key removes the row.
//! Ctrl+S or Ctrl+Enter saves, Escape discards.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::typed_char;
use crate::repl::models::HeaderPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyValueColumn {
    Key,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValueOutcome {
    Continue,
    Cancel,
    /// Rows with a blank key are already dropped
    Save(Vec<HeaderPair>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueEditor {
    rows: Vec<HeaderPair>,
    active_row: usize,
    active_column: KeyValueColumn,
}

impl KeyValueEditor {
    pub fn new(pairs: &[HeaderPair]) -> Self {
        let rows = if pairs.is_empty() {
            vec![HeaderPair::default()]
        } else {
            pairs.to_vec()
        };
        Self {
            rows,
            active_row: 0,
            active_column: KeyValueColumn::Key,
        }
    }

    pub fn rows(&self) -> &[HeaderPair] {
        &self.rows
    }

    pub fn active_row(&self) -> usize {
        self.active_row
    }

    pub fn active_column(&self) -> KeyValueColumn {
        self.active_column
    }

    fn saved_rows(&self) -> Vec<HeaderPair> {
        self.rows
            .iter()
            .filter(|p| !p.key.trim().is_empty())
            .cloned()
            .collect()
    }

    fn is_save_key(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('s') | KeyCode::Enter)
    }

    fn active_text(&mut self) -> &mut String {
        let row = &mut self.rows[self.active_row];
        match self.active_column {
            KeyValueColumn::Key => &mut row.key,
            KeyValueColumn::Value => &mut row.value,
        }
    }

    fn backspace(&mut self) {
        let key_is_empty = self.rows[self.active_row].key.is_empty();
        if self.active_column == KeyValueColumn::Key && key_is_empty && self.rows.len() > 1 {
            self.rows.remove(self.active_row);
            self.active_row = self.active_row.saturating_sub(1);
        } else {
            self.active_text().pop();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyValueOutcome {
        if Self::is_save_key(&key) {
            return KeyValueOutcome::Save(self.saved_rows());
        }
        match key.code {
            KeyCode::Esc => return KeyValueOutcome::Cancel,
            KeyCode::Tab => match self.active_column {
                KeyValueColumn::Key => self.active_column = KeyValueColumn::Value,
                KeyValueColumn::Value => {
                    self.active_column = KeyValueColumn::Key;
                    if self.active_row + 1 < self.rows.len() {
                        self.active_row += 1;
                    }
                }
            },
            KeyCode::Up => self.active_row = self.active_row.saturating_sub(1),
            KeyCode::Down => {
                if self.active_row + 1 < self.rows.len() {
                    self.active_row += 1;
                }
            }
            KeyCode::Enter => {
                self.rows.push(HeaderPair::default());
                self.active_row = self.rows.len() - 1;
                self.active_column = KeyValueColumn::Key;
            }
            KeyCode::Backspace | KeyCode::Delete => self.backspace(),
            _ => {
                if let Some(ch) = typed_char(&key) {
                    self.active_text().push(ch);
                }
            }
        }
        KeyValueOutcome::Continue
    }
}

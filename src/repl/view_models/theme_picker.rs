//! # Theme Picker
//!
//! Every highlight move is applied and persisted at once; Enter or Escape
//! just closes the menu.

use crossterm::event::{KeyCode, KeyEvent};

use crate::repl::models::{builtin_themes, Theme};

#[derive(Debug, Clone, PartialEq)]
pub enum ThemePickerOutcome {
    Continue,
    Apply(Theme),
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemePicker {
    themes: Vec<Theme>,
    selected: usize,
}

impl ThemePicker {
    /// Opens with `current` highlighted, or the first theme if it is unknown
    pub fn new(current: &str) -> Self {
        let themes = builtin_themes();
        let selected = themes.iter().position(|t| t.name == current).unwrap_or(0);
        Self { themes, selected }
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn select(&mut self, index: usize) -> ThemePickerOutcome {
        if index == self.selected {
            return ThemePickerOutcome::Continue;
        }
        self.selected = index;
        ThemePickerOutcome::Apply(self.themes[index].clone())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ThemePickerOutcome {
        match key.code {
            KeyCode::Up => self.select(self.selected.saturating_sub(1)),
            KeyCode::Down => self.select((self.selected + 1).min(self.themes.len() - 1)),
            KeyCode::Enter | KeyCode::Esc => ThemePickerOutcome::Close,
            _ => ThemePickerOutcome::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn picker_should_open_on_current_theme() {
        let picker = ThemePicker::new("Nord");
        assert_eq!(picker.themes()[picker.selected()].name, "Nord");
    }

    #[test]
    fn down_should_apply_next_theme() {
        let mut picker = ThemePicker::new("Catppuccin");
        match picker.handle_key(key(KeyCode::Down)) {
            ThemePickerOutcome::Apply(theme) => assert_eq!(theme.name, "Dracula"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn moves_should_clamp_at_ends() {
        let mut picker = ThemePicker::new("Catppuccin");
        assert_eq!(picker.handle_key(key(KeyCode::Up)), ThemePickerOutcome::Continue);

        let mut picker = ThemePicker::new("Palenight");
        assert_eq!(
            picker.handle_key(key(KeyCode::Down)),
            ThemePickerOutcome::Continue
        );
        assert_eq!(picker.selected(), 9);
    }

    #[test]
    fn enter_and_escape_should_close() {
        let mut picker = ThemePicker::new("Nord");
        assert_eq!(picker.handle_key(key(KeyCode::Enter)), ThemePickerOutcome::Close);
        assert_eq!(picker.handle_key(key(KeyCode::Esc)), ThemePickerOutcome::Close);
    }
}

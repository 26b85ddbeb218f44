//! # Overlay Commands
//!
//! Opening the theme picker, export dialog and history search, and feeding
//! keys to whichever of them owns input.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::repl::events::UiMode;

/// Plain (no Ctrl/Alt) letter in Normal mode
fn is_shortcut(context: &CommandContext, event: &KeyEvent, letters: &[char]) -> bool {
    context.state.mode == UiMode::Normal
        && !event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        && matches!(event.code, KeyCode::Char(ch) if letters.contains(&ch))
}

/// Every key while a modal is open
pub struct ModalInputCommand;

impl Command for ModalInputCommand {
    fn is_relevant(&self, context: &CommandContext, _event: &KeyEvent) -> bool {
        context.state.mode.is_modal()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ModalKeyRequested(event)])
    }

    fn name(&self) -> &'static str {
        "ModalInput"
    }
}

/// Keys typed into the history search line; Tab still moves focus
pub struct HistorySearchInputCommand;

impl Command for HistorySearchInputCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.state.mode == UiMode::HistorySearch
            && !matches!(event.code, KeyCode::Tab | KeyCode::BackTab)
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::HistorySearchKeyRequested(event)])
    }

    fn name(&self) -> &'static str {
        "HistorySearchInput"
    }
}

/// `t` opens the theme menu
pub struct OpenThemePickerCommand;

impl Command for OpenThemePickerCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_shortcut(context, event, &['t', 'T'])
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::OpenThemePickerRequested])
    }

    fn name(&self) -> &'static str {
        "OpenThemePicker"
    }
}

/// `e` opens the export dialog
pub struct OpenExportDialogCommand;

impl Command for OpenExportDialogCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_shortcut(context, event, &['e', 'E'])
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::OpenExportDialogRequested])
    }

    fn name(&self) -> &'static str {
        "OpenExportDialog"
    }
}

/// `/` starts filtering history
pub struct StartHistorySearchCommand;

impl Command for StartHistorySearchCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_shortcut(context, event, &['/']) && context.state.history_len > 0
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::HistorySearchStartRequested])
    }

    fn name(&self) -> &'static str {
        "StartHistorySearch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::ViewModelSnapshot;
    use crate::repl::events::{Tab, Widget};

    fn create_test_context(mode: UiMode, history_len: usize) -> CommandContext {
        CommandContext::new(ViewModelSnapshot {
            mode,
            focus: Widget::Url,
            active_tab: Tab::Request,
            history_len,
            is_loading: false,
            terminal_dimensions: (80, 24),
        })
    }

    #[test]
    fn modal_input_should_claim_keys_only_with_modal_open() {
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(ModalInputCommand.is_relevant(&create_test_context(UiMode::ExportDialog, 0), &event));
        assert!(!ModalInputCommand.is_relevant(&create_test_context(UiMode::Normal, 0), &event));
        assert!(!ModalInputCommand.is_relevant(&create_test_context(UiMode::HistorySearch, 0), &event));
    }

    #[test]
    fn theme_shortcut_should_not_fire_with_ctrl() {
        let context = create_test_context(UiMode::Normal, 0);
        let plain = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE);
        let ctrl = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL);

        assert!(OpenThemePickerCommand.is_relevant(&context, &plain));
        assert!(!OpenThemePickerCommand.is_relevant(&context, &ctrl));
    }

    #[test]
    fn search_should_need_history() {
        let event = KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE);
        assert!(!StartHistorySearchCommand.is_relevant(&create_test_context(UiMode::Normal, 0), &event));
        assert!(StartHistorySearchCommand.is_relevant(&create_test_context(UiMode::Normal, 1), &event));
    }

    #[test]
    fn search_input_should_let_tab_through() {
        let context = create_test_context(UiMode::HistorySearch, 1);
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert!(!HistorySearchInputCommand.is_relevant(&context, &tab));
    }
}

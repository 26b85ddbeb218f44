//! # Application Control Commands
//!
//! Quit and terminate.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};

/// Terminate application (Ctrl+C), in any mode
pub struct AppTerminateCommand;

impl Command for AppTerminateCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('c')) && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "AppTerminate"
    }
}

/// Quit with `q` when no text input owns the keyboard
pub struct QuitCommand;

impl Command for QuitCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('q' | 'Q'))
            && !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            && !context.state.mode.captures_text()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "Quit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::ViewModelSnapshot;
    use crate::repl::events::{Tab, UiMode, Widget};

    fn create_test_context(mode: UiMode) -> CommandContext {
        CommandContext::new(ViewModelSnapshot {
            mode,
            focus: Widget::Method,
            active_tab: Tab::Request,
            history_len: 0,
            is_loading: false,
            terminal_dimensions: (80, 24),
        })
    }

    #[test]
    fn app_terminate_should_be_relevant_for_ctrl_c() {
        let context = create_test_context(UiMode::HeadersEditor);
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(AppTerminateCommand.is_relevant(&context, &event));
    }

    #[test]
    fn app_terminate_should_not_be_relevant_for_regular_c() {
        let context = create_test_context(UiMode::Normal);
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(!AppTerminateCommand.is_relevant(&context, &event));
    }

    #[test]
    fn quit_should_be_ignored_while_typing() {
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(QuitCommand.is_relevant(&create_test_context(UiMode::Normal), &event));
        assert!(!QuitCommand.is_relevant(&create_test_context(UiMode::HistorySearch), &event));
        assert!(!QuitCommand.is_relevant(&create_test_context(UiMode::FieldEditor), &event));
    }

    #[test]
    fn quit_should_produce_quit_event() {
        let context = create_test_context(UiMode::Normal);
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let events = QuitCommand.execute(event, &context).unwrap();
        assert_eq!(events, vec![CommandEvent::QuitRequested]);
    }
}

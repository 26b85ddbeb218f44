//! # Request Commands
//!
//! Sending the draft and activating the focused request widget.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::repl::events::{UiMode, Widget};

/// Ctrl+S or Ctrl+Enter sends from anywhere outside a modal
pub struct SendRequestCommand;

impl Command for SendRequestCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        !context.state.mode.is_modal()
            && event.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(event.code, KeyCode::Char('s') | KeyCode::Enter)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SendRequested])
    }

    fn name(&self) -> &'static str {
        "SendRequest"
    }
}

/// Enter on a request widget edits it, or sends from the Send button
pub struct ActivateWidgetCommand;

impl Command for ActivateWidgetCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.state.mode == UiMode::Normal
            && event.code == KeyCode::Enter
            && context.state.focus.belongs_to_request_tab()
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let focus = context.state.focus;
        let command_event = match focus.editable_field() {
            Some(field) => CommandEvent::OpenFieldEditorRequested(field),
            None if focus == Widget::Headers => CommandEvent::OpenHeadersEditorRequested,
            None if focus == Widget::Send => CommandEvent::SendRequested,
            None => CommandEvent::NoAction,
        };
        Ok(vec![command_event])
    }

    fn name(&self) -> &'static str {
        "ActivateWidget"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::ViewModelSnapshot;
    use crate::repl::events::{EditableField, Tab};

    fn create_test_context(focus: Widget) -> CommandContext {
        CommandContext::new(ViewModelSnapshot {
            mode: UiMode::Normal,
            focus,
            active_tab: Tab::Request,
            history_len: 0,
            is_loading: false,
            terminal_dimensions: (80, 24),
        })
    }

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    #[test]
    fn send_should_accept_ctrl_s_and_ctrl_enter() {
        let context = create_test_context(Widget::Url);
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        let ctrl_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL);

        assert!(SendRequestCommand.is_relevant(&context, &ctrl_s));
        assert!(SendRequestCommand.is_relevant(&context, &ctrl_enter));
        assert!(!SendRequestCommand.is_relevant(&context, &enter()));
    }

    #[test]
    fn enter_should_map_each_request_widget() {
        let cases = [
            (Widget::Method, CommandEvent::OpenFieldEditorRequested(EditableField::Method)),
            (Widget::Url, CommandEvent::OpenFieldEditorRequested(EditableField::Url)),
            (Widget::Headers, CommandEvent::OpenHeadersEditorRequested),
            (Widget::Send, CommandEvent::SendRequested),
        ];
        for (widget, expected) in cases {
            let context = create_test_context(widget);
            assert_eq!(
                ActivateWidgetCommand.execute(enter(), &context).unwrap(),
                vec![expected]
            );
        }
    }

    #[test]
    fn enter_should_not_activate_history() {
        let context = create_test_context(Widget::History);
        assert!(!ActivateWidgetCommand.is_relevant(&context, &enter()));
    }
}

//! # Command Router
//!
//! Keys are routed through a list of commands; the first command whose
//! `is_relevant` accepts the key turns it into `CommandEvent`s. Registration
//! order is precedence: app-level shortcuts, then the open modal, then global
//! shortcuts, then the focused widget.

use anyhow::Result;
use crossterm::event::KeyEvent;
use std::sync::Arc;

pub mod app;
pub mod context;
pub mod events;
pub mod navigation;
pub mod overlay;
pub mod request;

pub use app::{AppTerminateCommand, QuitCommand};
pub use context::{CommandContext, ViewModelSnapshot};
pub use events::CommandEvent;
pub use navigation::{
    FocusNextCommand, FocusPreviousCommand, HistoryNavigationCommand, ScrollCommand,
    SwitchTabCommand, TabStripCommand,
};
pub use overlay::{
    HistorySearchInputCommand, ModalInputCommand, OpenExportDialogCommand,
    OpenThemePickerCommand, StartHistorySearchCommand,
};
pub use request::{ActivateWidgetCommand, SendRequestCommand};

/// A key binding that turns a key into events for the controller
pub trait Command: Send + Sync {
    /// Whether this command handles `event` in the current state
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Describe what should happen; the controller applies the events
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Name for logging
    fn name(&self) -> &'static str;
}

type CommandArc = Arc<dyn Command>;

/// Ordered set of commands; the first relevant one wins
pub struct CommandRegistry {
    commands: Vec<CommandArc>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };
        registry.register_default_commands();
        registry
    }

    fn register_default_commands(&mut self) {
        // Always available
        self.add_command(Arc::new(AppTerminateCommand));

        // An open modal owns every other key
        self.add_command(Arc::new(ModalInputCommand));

        // Global shortcuts
        self.add_command(Arc::new(SendRequestCommand));
        self.add_command(Arc::new(SwitchTabCommand));

        // The search line owns printable keys while active
        self.add_command(Arc::new(HistorySearchInputCommand));

        // Single-letter shortcuts
        self.add_command(Arc::new(QuitCommand));
        self.add_command(Arc::new(OpenThemePickerCommand));
        self.add_command(Arc::new(OpenExportDialogCommand));
        self.add_command(Arc::new(StartHistorySearchCommand));

        // Focus and the focused widget
        self.add_command(Arc::new(FocusNextCommand));
        self.add_command(Arc::new(FocusPreviousCommand));
        self.add_command(Arc::new(HistoryNavigationCommand));
        self.add_command(Arc::new(ScrollCommand));
        self.add_command(Arc::new(ActivateWidgetCommand));
        self.add_command(Arc::new(TabStripCommand));
    }

    pub fn add_command(&mut self, command: CommandArc) {
        self.commands.push(command);
    }

    /// First command relevant to `event`, if any
    pub fn find_command(&self, context: &CommandContext, event: &KeyEvent) -> Option<CommandArc> {
        let found = self
            .commands
            .iter()
            .find(|command| command.is_relevant(context, event))
            .map(Arc::clone);
        match &found {
            Some(command) => tracing::debug!(
                "Found relevant command: {} for key {:?} in mode {:?}",
                command.name(),
                event,
                context.state.mode
            ),
            None => tracing::debug!(
                "No relevant command found for key {:?} in mode {:?}",
                event,
                context.state.mode
            ),
        }
        found
    }

    /// Route a key to the first relevant command and return its events
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        match self.find_command(context, &event) {
            Some(command) => command.execute(event, context),
            None => Ok(vec![CommandEvent::NoAction]),
        }
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::events::{EditableField, ScrollDirection, Tab, UiMode, Widget};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn context(mode: UiMode, focus: Widget, active_tab: Tab) -> CommandContext {
        CommandContext::new(ViewModelSnapshot {
            mode,
            focus,
            active_tab,
            history_len: 3,
            is_loading: false,
            terminal_dimensions: (80, 24),
        })
    }

    fn route(context: &CommandContext, code: KeyCode, modifiers: KeyModifiers) -> Vec<CommandEvent> {
        CommandRegistry::new()
            .process_event(KeyEvent::new(code, modifiers), context)
            .unwrap()
    }

    #[test]
    fn registry_should_create_with_default_commands() {
        assert_eq!(CommandRegistry::new().command_count(), 15);
    }

    #[test]
    fn ctrl_c_should_quit_even_inside_modal() {
        let ctx = context(UiMode::FieldEditor, Widget::Url, Tab::Request);
        assert_eq!(
            route(&ctx, KeyCode::Char('c'), KeyModifiers::CONTROL),
            vec![CommandEvent::QuitRequested]
        );
    }

    #[test]
    fn letters_should_go_to_open_editor() {
        let ctx = context(UiMode::FieldEditor, Widget::Url, Tab::Request);
        let key = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE);
        assert_eq!(
            route(&ctx, KeyCode::Char('t'), KeyModifiers::NONE),
            vec![CommandEvent::ModalKeyRequested(key)]
        );
    }

    #[test]
    fn letters_should_go_to_search_line_while_searching() {
        let ctx = context(UiMode::HistorySearch, Widget::History, Tab::Request);
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(
            route(&ctx, KeyCode::Char('q'), KeyModifiers::NONE),
            vec![CommandEvent::HistorySearchKeyRequested(key)]
        );
    }

    #[test]
    fn shortcuts_should_apply_in_normal_mode() {
        let ctx = context(UiMode::Normal, Widget::Method, Tab::Request);
        assert_eq!(
            route(&ctx, KeyCode::Char('q'), KeyModifiers::NONE),
            vec![CommandEvent::QuitRequested]
        );
        assert_eq!(
            route(&ctx, KeyCode::Char('t'), KeyModifiers::NONE),
            vec![CommandEvent::OpenThemePickerRequested]
        );
        assert_eq!(
            route(&ctx, KeyCode::Char('s'), KeyModifiers::CONTROL),
            vec![CommandEvent::SendRequested]
        );
        assert_eq!(
            route(&ctx, KeyCode::Char('l'), KeyModifiers::CONTROL),
            vec![CommandEvent::TabSwitchRequested { forward: true }]
        );
    }

    #[test]
    fn enter_should_activate_focused_widget() {
        let ctx = context(UiMode::Normal, Widget::Body, Tab::Request);
        assert_eq!(
            route(&ctx, KeyCode::Enter, KeyModifiers::NONE),
            vec![CommandEvent::OpenFieldEditorRequested(EditableField::Body)]
        );
    }

    #[test]
    fn page_keys_should_scroll_response_but_page_history_when_focused() {
        let ctx = context(UiMode::Normal, Widget::Tabs, Tab::Response);
        assert_eq!(
            route(&ctx, KeyCode::PageDown, KeyModifiers::NONE),
            vec![CommandEvent::ScrollRequested(ScrollDirection::PageDown)]
        );

        let ctx = context(UiMode::Normal, Widget::History, Tab::Response);
        assert_eq!(
            route(&ctx, KeyCode::PageDown, KeyModifiers::NONE),
            vec![CommandEvent::HistoryPageRequested(ScrollDirection::PageDown)]
        );
    }

    #[test]
    fn unbound_key_should_produce_no_action() {
        let ctx = context(UiMode::Normal, Widget::Method, Tab::Request);
        assert_eq!(
            route(&ctx, KeyCode::Char('z'), KeyModifiers::NONE),
            vec![CommandEvent::NoAction]
        );
    }
}

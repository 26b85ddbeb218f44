//! # Navigation Commands
//!
//! Focus traversal, tab switching, content paging and the history sidebar.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::repl::events::{ScrollDirection, Tab, UiMode, Widget};

fn is_normal(context: &CommandContext) -> bool {
    context.state.mode == UiMode::Normal
}

fn page_direction(code: KeyCode) -> Option<ScrollDirection> {
    match code {
        KeyCode::PageUp => Some(ScrollDirection::PageUp),
        KeyCode::PageDown => Some(ScrollDirection::PageDown),
        _ => None,
    }
}

/// Tab moves focus forward
pub struct FocusNextCommand;

impl Command for FocusNextCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_normal(context)
            && event.code == KeyCode::Tab
            && !event.modifiers.contains(KeyModifiers::SHIFT)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::FocusNextRequested])
    }

    fn name(&self) -> &'static str {
        "FocusNext"
    }
}

/// Shift+Tab moves focus backward
pub struct FocusPreviousCommand;

impl Command for FocusPreviousCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_normal(context)
            && (event.code == KeyCode::BackTab
                || (event.code == KeyCode::Tab && event.modifiers.contains(KeyModifiers::SHIFT)))
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::FocusPreviousRequested])
    }

    fn name(&self) -> &'static str {
        "FocusPrevious"
    }
}

/// Ctrl+L / Ctrl+H cycle the tabs
pub struct SwitchTabCommand;

impl Command for SwitchTabCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        !context.state.mode.is_modal()
            && event.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(event.code, KeyCode::Char('l' | 'h'))
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let forward = event.code == KeyCode::Char('l');
        Ok(vec![CommandEvent::tab_switch(forward)])
    }

    fn name(&self) -> &'static str {
        "SwitchTab"
    }
}

/// Left/Right on the focused tab strip
pub struct TabStripCommand;

impl Command for TabStripCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_normal(context)
            && context.state.focus == Widget::Tabs
            && matches!(event.code, KeyCode::Left | KeyCode::Right)
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::tab_switch(event.code == KeyCode::Right)])
    }

    fn name(&self) -> &'static str {
        "TabStrip"
    }
}

/// PageUp/PageDown on the Response and Metrics tabs
pub struct ScrollCommand;

impl Command for ScrollCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_normal(context)
            && context.state.active_tab != Tab::Request
            && page_direction(event.code).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(page_direction(event.code)
            .map(CommandEvent::ScrollRequested)
            .into_iter()
            .collect())
    }

    fn name(&self) -> &'static str {
        "Scroll"
    }
}

/// Arrows, paging and Enter on the focused history list
pub struct HistoryNavigationCommand;

impl Command for HistoryNavigationCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_normal(context)
            && context.state.focus == Widget::History
            && matches!(
                event.code,
                KeyCode::Up | KeyCode::Down | KeyCode::Enter | KeyCode::PageUp | KeyCode::PageDown
            )
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let command_event = match event.code {
            KeyCode::Up => CommandEvent::history_move(true),
            KeyCode::Down => CommandEvent::history_move(false),
            KeyCode::Enter => CommandEvent::HistorySelectRequested,
            code => match page_direction(code) {
                Some(direction) => CommandEvent::HistoryPageRequested(direction),
                None => CommandEvent::NoAction,
            },
        };
        Ok(vec![command_event])
    }

    fn name(&self) -> &'static str {
        "HistoryNavigation"
    }
}

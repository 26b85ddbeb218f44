//! # Command Context
//!
//! Read-only view of the state commands need to decide relevance.

use crate::repl::events::{Tab, UiMode, Widget};
use crate::repl::view_models::ViewModel;

/// Read-only snapshot of ViewModel state for commands
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModelSnapshot {
    pub mode: UiMode,
    pub focus: Widget,
    pub active_tab: Tab,
    pub history_len: usize,
    pub is_loading: bool,
    pub terminal_dimensions: (u16, u16),
}

impl ViewModelSnapshot {
    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self {
            mode: view_model.mode(),
            focus: view_model.focus(),
            active_tab: view_model.active_tab(),
            history_len: view_model.history().len(),
            is_loading: view_model.is_loading(),
            terminal_dimensions: view_model.terminal_size(),
        }
    }
}

/// Base context available to all commands
pub struct CommandContext {
    pub state: ViewModelSnapshot,
}

impl CommandContext {
    pub fn new(state: ViewModelSnapshot) -> Self {
        Self { state }
    }

    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self::new(ViewModelSnapshot::from_view_model(view_model))
    }
}

//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands suggest, the controller decides.

use crossterm::event::KeyEvent;

use crate::repl::events::{EditableField, ScrollDirection};

#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    QuitRequested,

    /// Validate and send the draft
    SendRequested,

    FocusNextRequested,
    FocusPreviousRequested,

    TabSwitchRequested { forward: bool },

    /// Page the Response/Metrics content
    ScrollRequested(ScrollDirection),

    OpenFieldEditorRequested(EditableField),
    OpenHeadersEditorRequested,
    OpenThemePickerRequested,
    OpenExportDialogRequested,

    HistorySearchStartRequested,
    HistoryMoveRequested { up: bool },
    HistoryPageRequested(ScrollDirection),
    /// Load the selected history entry into the draft
    HistorySelectRequested,

    /// Hand the key to the open modal
    ModalKeyRequested(KeyEvent),
    /// Hand the key to the history search line
    HistorySearchKeyRequested(KeyEvent),

    NoAction,
}

impl CommandEvent {
    pub fn tab_switch(forward: bool) -> Self {
        Self::TabSwitchRequested { forward }
    }

    pub fn history_move(up: bool) -> Self {
        Self::HistoryMoveRequested { up }
    }
}

//! # View Models
//!
//! Presentation state for the workbench. `ViewModel` owns the draft, the last
//! result, history, the active theme, focus and the open modal. Each modal has
//! its own small state machine that turns keys into an outcome.

pub mod core;
pub mod export_dialog;
pub mod field_editor;
pub mod focus;
pub mod history_list;
pub mod key_value_editor;
pub mod modal;
pub mod modal_manager;
pub mod navigation_manager;
pub mod panels;
pub mod request_manager;
pub mod theme_picker;
pub mod viewport;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub use core::{StatusKind, StatusMessage, ViewModel, SPINNER_FRAMES};
pub use export_dialog::{ExportAction, ExportDialog, ExportRow};
pub use field_editor::FieldEditor;
pub use focus::{FocusRing, FocusScope};
pub use history_list::HistoryList;
pub use key_value_editor::{KeyValueColumn, KeyValueEditor};
pub use modal::{Modal, ModalOutcome};
pub use theme_picker::ThemePicker;
pub use viewport::{ContentNode, Viewport};

/// Printable character for a key, ignoring Ctrl/Alt chords
pub(crate) fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(ch)
        }
        _ => None,
    }
}

//! # Modal Overlays
//!
//! At most one modal is open. While it is, every key goes to it; the outcome
//! tells the controller what, if anything, to do with the result.

use crossterm::event::KeyEvent;

use super::export_dialog::{ExportDialog, ExportOutcome};
use super::field_editor::{FieldEditor, FieldEditorOutcome};
use super::key_value_editor::{KeyValueEditor, KeyValueOutcome};
use super::theme_picker::{ThemePicker, ThemePickerOutcome};
use crate::repl::events::{EditableField, UiMode};
use crate::repl::models::{HeaderPair, Theme};
use crate::repl::services::ExportFormat;

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    FieldEditor(FieldEditor),
    HeadersEditor(KeyValueEditor),
    ThemePicker(ThemePicker),
    ExportDialog(ExportDialog),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalOutcome {
    /// Key consumed, modal stays open
    Continue,
    /// Modal closes without changing anything
    Close,
    CommitField(EditableField, String),
    SaveHeaders(Vec<HeaderPair>),
    /// Picker stays open after applying
    ApplyTheme(Theme),
    /// Dialog stays open to show the result
    CopyExport(ExportFormat),
    SaveExport {
        format: ExportFormat,
        file_name: String,
    },
}

impl ModalOutcome {
    pub fn keeps_modal_open(&self) -> bool {
        matches!(
            self,
            ModalOutcome::Continue
                | ModalOutcome::ApplyTheme(_)
                | ModalOutcome::CopyExport(_)
                | ModalOutcome::SaveExport { .. }
        )
    }
}

impl Modal {
    pub fn mode(&self) -> UiMode {
        match self {
            Modal::FieldEditor(_) => UiMode::FieldEditor,
            Modal::HeadersEditor(_) => UiMode::HeadersEditor,
            Modal::ThemePicker(_) => UiMode::ThemePicker,
            Modal::ExportDialog(_) => UiMode::ExportDialog,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ModalOutcome {
        match self {
            Modal::FieldEditor(editor) => match editor.handle_key(key) {
                FieldEditorOutcome::Continue => ModalOutcome::Continue,
                FieldEditorOutcome::Cancel => ModalOutcome::Close,
                FieldEditorOutcome::Commit(text) => ModalOutcome::CommitField(editor.field(), text),
            },
            Modal::HeadersEditor(editor) => match editor.handle_key(key) {
                KeyValueOutcome::Continue => ModalOutcome::Continue,
                KeyValueOutcome::Cancel => ModalOutcome::Close,
                KeyValueOutcome::Save(pairs) => ModalOutcome::SaveHeaders(pairs),
            },
            Modal::ThemePicker(picker) => match picker.handle_key(key) {
                ThemePickerOutcome::Continue => ModalOutcome::Continue,
                ThemePickerOutcome::Apply(theme) => ModalOutcome::ApplyTheme(theme),
                ThemePickerOutcome::Close => ModalOutcome::Close,
            },
            Modal::ExportDialog(dialog) => match dialog.handle_key(key) {
                ExportOutcome::Continue => ModalOutcome::Continue,
                ExportOutcome::Close => ModalOutcome::Close,
                ExportOutcome::Copy(format) => ModalOutcome::CopyExport(format),
                ExportOutcome::Save { format, file_name } => {
                    ModalOutcome::SaveExport { format, file_name }
                }
            },
        }
    }
}

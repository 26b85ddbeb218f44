//! # Modal Management
//!
//! Opening and closing the single modal slot. Opening while another modal is
//! open is refused.

use std::time::Instant;

use super::core::ViewModel;
use super::export_dialog::ExportDialog;
use super::field_editor::FieldEditor;
use super::key_value_editor::KeyValueEditor;
use super::modal::Modal;
use super::theme_picker::ThemePicker;
use crate::repl::events::EditableField;

impl ViewModel {
    pub fn open_modal(&mut self, modal: Modal) -> bool {
        if let Some(open) = &self.modal {
            tracing::debug!("Ignoring {:?} while {:?} is open", modal.mode(), open.mode());
            return false;
        }
        tracing::debug!("Opening modal {:?}", modal.mode());
        self.modal = Some(modal);
        true
    }

    pub fn open_field_editor(&mut self, field: EditableField) -> bool {
        let editor = FieldEditor::new(
            field,
            &self.field_value(field),
            self.field_suggestions(field),
        );
        self.open_modal(Modal::FieldEditor(editor))
    }

    pub fn open_headers_editor(&mut self) -> bool {
        let editor = KeyValueEditor::new(self.draft.headers());
        self.open_modal(Modal::HeadersEditor(editor))
    }

    pub fn open_theme_picker(&mut self) -> bool {
        let picker = ThemePicker::new(&self.theme.name);
        self.open_modal(Modal::ThemePicker(picker))
    }

    pub fn open_export_dialog(&mut self) -> bool {
        self.open_modal(Modal::ExportDialog(ExportDialog::new()))
    }

    /// Remove the modal to hand it a key; put it back with `restore_modal`
    pub fn take_modal(&mut self) -> Option<Modal> {
        self.modal.take()
    }

    pub fn restore_modal(&mut self, modal: Modal) {
        self.modal = Some(modal);
    }

    pub fn close_modal(&mut self) {
        if let Some(modal) = self.modal.take() {
            tracing::debug!("Closed modal {:?}", modal.mode());
        }
    }

    pub fn export_dialog_mut(&mut self) -> Option<&mut ExportDialog> {
        match &mut self.modal {
            Some(Modal::ExportDialog(dialog)) => Some(dialog),
            _ => None,
        }
    }

    /// Close a finished export dialog once its delay has passed
    pub fn expire_modal(&mut self, now: Instant) -> bool {
        let expired = matches!(&self.modal, Some(Modal::ExportDialog(d)) if d.should_close(now));
        if expired {
            self.close_modal();
        }
        expired
    }
}

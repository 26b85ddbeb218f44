//! # Terminal Renderer
//!
//! Full-frame renderer. Every frame clears the screen and redraws:
//!
//! ```text
//! row 0      PostBoy                                   <status / progress>
//! row 1..    HISTORY sidebar (30%)  │ tab strip
//!                                   │ tab content (viewport)
//! row h-2                           │ scroll indicator
//! row h-1    key hints
//! ```
//!
//! An open modal is drawn last, centered over everything else.

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use crate::repl::events::{EditableField, Tab, Widget};
use crate::repl::io::RenderStream;
use crate::repl::models::{
    HistoryEntry, ResponseStatus, StyledLine, StyledSpan, Theme, ThemeRole,
};
use crate::repl::services::ExportFormat;
use crate::repl::utils::{format_bytes, local_time_of_day, shorten_url, truncate_to_width};
use crate::repl::view_models::{
    ExportAction, ExportDialog, ExportRow, FieldEditor, KeyValueColumn, KeyValueEditor, Modal,
    StatusKind, ThemePicker, ViewModel,
};

const TITLE: &str = "PostBoy";
const FOOTER_HINTS: &str = "[Q] Quit | [Ctrl+Enter] Send | [Ctrl+L/H] Switch Tabs | [T] Theme Menu | [E] Export | [/] Search | [Tab] Navigate";
const LABEL_WIDTH: usize = 8;
const BODY_PREVIEW_ROWS: usize = 6;
const MODAL_MAX_WIDTH: u16 = 72;
const EXPORT_PREVIEW_ROWS: usize = 8;
/// First row of history items: title, heading, search line, gap
const HISTORY_TOP: u16 = 4;

pub trait ViewRenderer {
    /// Prepare the terminal (raw mode, alternate screen)
    fn initialize(&mut self) -> Result<()>;

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Restore the terminal
    fn cleanup(&mut self) -> Result<()>;
}

pub struct TerminalRenderer<RS: RenderStream> {
    stream: RS,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn new(stream: RS) -> Self {
        Self { stream }
    }

    pub fn stream(&self) -> &RS {
        &self.stream
    }

    pub fn into_stream(self) -> RS {
        self.stream
    }

    pub fn terminal_size(&self) -> Result<(u16, u16)> {
        self.stream.get_size()
    }

    /// Write one span at the cursor, clipped to `max_width` columns.
    /// Returns the columns used.
    fn write_span(&mut self, theme: &Theme, span: &StyledSpan, max_width: usize) -> Result<usize> {
        if max_width == 0 || span.text.is_empty() {
            return Ok(0);
        }
        let text = truncate_to_width(&span.text, max_width);
        let role = span.role.unwrap_or(ThemeRole::Primary);
        self.stream.set_foreground(theme.color(role))?;
        if span.bold {
            self.stream.set_bold(true)?;
        }
        write!(self.stream, "{text}")?;
        self.stream.reset_style()?;
        Ok(text.width())
    }

    fn draw_line(
        &mut self,
        theme: &Theme,
        x: u16,
        y: u16,
        max_width: usize,
        line: &StyledLine,
    ) -> Result<()> {
        self.stream.move_cursor(x, y)?;
        let mut used = 0;
        for span in &line.spans {
            used += self.write_span(theme, span, max_width.saturating_sub(used))?;
            if used >= max_width {
                break;
            }
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        theme: &Theme,
        x: u16,
        y: u16,
        max_width: usize,
        text: &str,
        role: ThemeRole,
    ) -> Result<()> {
        self.draw_line(theme, x, y, max_width, &StyledLine::colored(text, role))
    }

    fn render_header(&mut self, vm: &ViewModel, width: u16) -> Result<()> {
        let theme = vm.theme();
        self.draw_line(
            theme,
            1,
            0,
            width as usize,
            &StyledLine::new(vec![StyledSpan::colored(TITLE, ThemeRole::Accent).bold()]),
        )?;

        let (text, role) = if vm.is_loading() {
            (
                format!("{} {}", vm.spinner_frame(), progress_text(vm)),
                ThemeRole::Cool,
            )
        } else if let Some(status) = vm.status() {
            let role = match status.kind {
                StatusKind::Info => ThemeRole::Secondary,
                StatusKind::Success => ThemeRole::Success,
                StatusKind::Error => ThemeRole::Error,
            };
            (status.text.clone(), role)
        } else {
            return Ok(());
        };

        let room = (width as usize).saturating_sub(TITLE.len() + 4);
        let text = truncate_to_width(&text, room);
        let x = width.saturating_sub(text.width() as u16 + 1);
        self.draw_text(theme, x, 0, room, &text, role)
    }

    fn render_sidebar(&mut self, vm: &ViewModel, sidebar_width: u16, height: u16) -> Result<()> {
        let theme = vm.theme();
        let inner = sidebar_width.saturating_sub(2) as usize;
        let focused = vm.focus() == Widget::History;

        let heading = StyledSpan::colored("H I S T O R Y", if focused {
            ThemeRole::Accent
        } else {
            ThemeRole::Secondary
        })
        .bold();
        self.draw_line(theme, 1, 1, inner, &StyledLine::new(vec![heading]))?;

        let list = vm.history_list();
        let search = if list.is_searching() {
            StyledLine::colored(format!("🔍 {}▌", list.query()), ThemeRole::White)
        } else if !list.query().is_empty() {
            StyledLine::new(vec![
                StyledSpan::colored("Press / to search", ThemeRole::Muted),
                StyledSpan::colored(format!(" (filtered: \"{}\")", list.query()), ThemeRole::Cool),
            ])
        } else {
            StyledLine::colored("Press / to search", ThemeRole::Muted)
        };
        self.draw_line(theme, 1, 2, inner, &search)?;

        let filtered = vm.filtered_history();
        if filtered.is_empty() {
            let empty = if vm.history().is_empty() {
                "No requests yet"
            } else {
                "No matches found"
            };
            return self.draw_text(theme, 1, HISTORY_TOP, inner, empty, ThemeRole::Muted);
        }

        let bottom = height.saturating_sub(2);
        let mut y = HISTORY_TOP;
        for index in vm.history_window() {
            if y + 1 >= bottom {
                break;
            }
            let Some(entry) = filtered.get(index) else {
                break;
            };
            let selected = index == list.selected();
            let [first, second] = history_item_lines(entry, selected, focused);
            self.draw_line(theme, 1, y, inner, &first)?;
            self.draw_line(theme, 1, y + 1, inner, &second)?;
            y += 2;
        }
        Ok(())
    }

    fn render_separator(&mut self, vm: &ViewModel, x: u16, height: u16) -> Result<()> {
        for y in 1..height.saturating_sub(1) {
            self.draw_text(vm.theme(), x, y, 1, "│", ThemeRole::Muted)?;
        }
        Ok(())
    }

    fn render_tab_strip(&mut self, vm: &ViewModel, x: u16, width: usize) -> Result<()> {
        let focused = vm.focus() == Widget::Tabs;
        let mut spans = Vec::new();
        for tab in Tab::ALL {
            if tab == vm.active_tab() {
                let marker = if focused { "▸" } else { " " };
                spans.push(
                    StyledSpan::colored(format!("{marker}[ {} ]", tab.title()), ThemeRole::Accent)
                        .bold(),
                );
            } else {
                spans.push(StyledSpan::colored(
                    format!("   {}  ", tab.title()),
                    ThemeRole::Muted,
                ));
            }
        }
        self.draw_line(vm.theme(), x, 1, width, &StyledLine::new(spans))
    }

    fn field_line(vm: &ViewModel, label: &str, widget: Widget, value: &str, placeholder: &str) -> StyledLine {
        let focused = vm.focus() == widget;
        let mut line = StyledLine::new(vec![StyledSpan::colored(
            format!("{label:<LABEL_WIDTH$}"),
            if focused {
                ThemeRole::Accent
            } else {
                ThemeRole::Muted
            },
        )]);
        if value.is_empty() {
            line.push(StyledSpan::colored(placeholder, ThemeRole::Muted));
        } else {
            line.push(StyledSpan::colored(
                value,
                if focused {
                    ThemeRole::White
                } else {
                    ThemeRole::Primary
                },
            ));
        }
        if focused {
            line.push(StyledSpan::colored(" (Press Enter to edit)", ThemeRole::Muted));
        }
        line
    }

    fn render_request_tab(&mut self, vm: &ViewModel, x: u16, width: usize, bottom: u16) -> Result<()> {
        let theme = vm.theme();
        let draft = vm.draft();

        let method = draft.method().to_string();
        let headers = draft
            .headers()
            .iter()
            .map(|h| format!("{}: {}", h.key, h.value))
            .collect::<Vec<_>>()
            .join(", ");
        let headers = match draft.unparsed_headers() {
            Some(raw) => raw.to_string(),
            None => headers,
        };

        let mut lines = vec![
            Self::field_line(vm, "Method", Widget::Method, &method, EditableField::Method.placeholder()),
            Self::field_line(vm, "URL", Widget::Url, draft.url(), EditableField::Url.placeholder()),
            Self::field_line(vm, "Headers", Widget::Headers, &headers, "No headers"),
        ];

        let mut body_lines = draft.body().lines();
        let first = body_lines.next().unwrap_or_default();
        lines.push(Self::field_line(vm, "Body", Widget::Body, first, EditableField::Body.placeholder()));
        let rest: Vec<&str> = body_lines.collect();
        for (shown, text) in rest.iter().enumerate() {
            if shown + 1 >= BODY_PREVIEW_ROWS {
                lines.push(StyledLine::colored(
                    format!("{:LABEL_WIDTH$}… {} more lines", "", rest.len() - shown),
                    ThemeRole::Muted,
                ));
                break;
            }
            lines.push(StyledLine::colored(
                format!("{:LABEL_WIDTH$}{text}", ""),
                ThemeRole::Primary,
            ));
        }
        lines.push(StyledLine::default());

        let send_focused = vm.focus() == Widget::Send;
        let button = if vm.is_loading() {
            format!("[ {} SENDING ]", vm.spinner_frame())
        } else {
            "[ SEND ]".to_string()
        };
        let mut button = StyledSpan::colored(
            button,
            if send_focused {
                ThemeRole::Accent
            } else {
                ThemeRole::Primary
            },
        );
        if send_focused {
            button = button.bold();
        }
        lines.push(StyledLine::new(vec![button]));

        for (offset, line) in lines.iter().enumerate() {
            let y = 2 + offset as u16;
            if y >= bottom {
                break;
            }
            self.draw_line(theme, x, y, width, line)?;
        }
        Ok(())
    }

    fn render_main(&mut self, vm: &ViewModel, x: u16, width: usize, height: u16) -> Result<()> {
        self.render_tab_strip(vm, x, width)?;
        let bottom = height.saturating_sub(2);

        if vm.active_tab() == Tab::Request {
            return self.render_request_tab(vm, x, width, bottom);
        }

        let theme = vm.theme();
        for (offset, line) in vm.visible_content().iter().enumerate() {
            let y = 2 + offset as u16;
            if y >= bottom {
                break;
            }
            self.draw_line(theme, x, y, width, line)?;
        }
        if let Some(status) = vm.viewport().status_line() {
            self.draw_text(theme, x, bottom, width, &status, ThemeRole::Muted)?;
        }
        Ok(())
    }

    fn render_footer(&mut self, vm: &ViewModel, width: u16, height: u16) -> Result<()> {
        self.draw_text(
            vm.theme(),
            1,
            height.saturating_sub(1),
            (width as usize).saturating_sub(2),
            FOOTER_HINTS,
            ThemeRole::Muted,
        )
    }

    fn render_modal(&mut self, vm: &ViewModel, modal: &Modal, width: u16, height: u16) -> Result<()> {
        let (title, lines) = match modal {
            Modal::FieldEditor(editor) => field_editor_lines(editor),
            Modal::HeadersEditor(editor) => headers_editor_lines(editor),
            Modal::ThemePicker(picker) => theme_picker_lines(picker),
            Modal::ExportDialog(dialog) => export_dialog_lines(dialog, vm),
        };

        let box_width = width.saturating_sub(4).min(MODAL_MAX_WIDTH).max(title.width() as u16 + 4);
        let box_width = box_width.min(width);
        let inner = box_width.saturating_sub(4) as usize;
        let max_body = height.saturating_sub(4) as usize;
        let shown = lines.len().min(max_body);
        let box_height = shown as u16 + 4;
        let left = (width.saturating_sub(box_width)) / 2;
        let top = (height.saturating_sub(box_height)) / 2;
        let theme = vm.theme();

        let horizontal = "─".repeat(box_width.saturating_sub(2) as usize);
        let blank = " ".repeat(box_width.saturating_sub(2) as usize);
        self.draw_text(theme, left, top, box_width as usize, &format!("┌{horizontal}┐"), ThemeRole::Accent)?;
        for y in top + 1..top + box_height - 1 {
            self.draw_text(theme, left, y, box_width as usize, &format!("│{blank}│"), ThemeRole::Accent)?;
        }
        self.draw_text(
            theme,
            left,
            top + box_height - 1,
            box_width as usize,
            &format!("└{horizontal}┘"),
            ThemeRole::Accent,
        )?;

        self.draw_line(
            theme,
            left + 2,
            top + 1,
            inner,
            &StyledLine::new(vec![StyledSpan::colored(title, ThemeRole::Accent).bold()]),
        )?;
        for (offset, line) in lines.iter().take(shown).enumerate() {
            self.draw_line(theme, left + 2, top + 3 + offset as u16, inner, line)?;
        }
        Ok(())
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.stream.enable_raw_mode()?;
        self.stream.enter_alternate_screen()?;
        self.stream.hide_cursor()?;
        self.stream.clear_screen()?;
        self.stream.flush()?;
        Ok(())
    }

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()> {
        let (width, height) = view_model.terminal_size();
        self.stream.hide_cursor()?;
        self.stream.clear_screen()?;

        let sidebar_width = (width * 3 / 10).max(12).min(width);
        let main_x = sidebar_width.saturating_add(2);
        let main_width = width.saturating_sub(main_x + 1) as usize;

        self.render_header(view_model, width)?;
        self.render_sidebar(view_model, sidebar_width, height)?;
        self.render_separator(view_model, sidebar_width, height)?;
        self.render_main(view_model, main_x, main_width, height)?;
        self.render_footer(view_model, width, height)?;
        if let Some(modal) = view_model.modal() {
            self.render_modal(view_model, modal, width, height)?;
        }

        self.stream.reset_style()?;
        self.stream.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.stream.reset_style()?;
        self.stream.clear_screen()?;
        self.stream.show_cursor()?;
        self.stream.leave_alternate_screen()?;
        self.stream.disable_raw_mode()?;
        self.stream.flush()?;
        Ok(())
    }
}

fn progress_text(vm: &ViewModel) -> String {
    let Some(progress) = vm.progress() else {
        return "Sending...".to_string();
    };
    let speed = format!("{}/s", format_bytes(progress.bytes_per_sec));
    match progress.percent() {
        Some(percent) => format!(
            "Downloading {}/{} ({percent:.0}%) {speed}",
            format_bytes(progress.received as f64),
            format_bytes(progress.total as f64)
        ),
        None => format!(
            "Downloading {} {speed}",
            format_bytes(progress.received as f64)
        ),
    }
}

fn history_item_lines(entry: &HistoryEntry, selected: bool, focused: bool) -> [StyledLine; 2] {
    let (status, role) = match entry.response_status {
        Some(code) => (
            format!("{code:>3}"),
            ResponseStatus::Code(code).color_role(),
        ),
        None => ("---".to_string(), ThemeRole::Muted),
    };
    let marker = match (selected, focused) {
        (true, true) => StyledSpan::colored("▶ ", ThemeRole::Accent),
        (true, false) => StyledSpan::colored("▷ ", ThemeRole::Muted),
        _ => StyledSpan::plain("  "),
    };
    let mut url = StyledSpan::colored(
        shorten_url(&entry.url),
        if selected {
            ThemeRole::White
        } else {
            ThemeRole::Primary
        },
    );
    if selected {
        url = url.bold();
    }
    let first = StyledLine::new(vec![
        marker,
        StyledSpan::colored(status, role),
        StyledSpan::plain(" "),
        StyledSpan::colored(format!("{:<7}", entry.method), ThemeRole::Accent),
        url,
    ]);

    let time = entry
        .response_time
        .map(|ms| format!("{}ms ", ms.round()))
        .unwrap_or_default();
    let second = StyledLine::colored(
        format!("      {time}{}", local_time_of_day(entry.timestamp)),
        ThemeRole::Muted,
    );
    [first, second]
}

fn field_editor_lines(editor: &FieldEditor) -> (String, Vec<StyledLine>) {
    let title = format!(
        "Edit {} (Enter to save, Esc to cancel)",
        editor.field().label()
    );
    let mut lines = vec![StyledLine::new(vec![
        StyledSpan::colored("> ", ThemeRole::Accent),
        StyledSpan::colored(format!("{}▌", editor.buffer()), ThemeRole::White),
    ])];
    if editor.is_suggesting() {
        lines.push(StyledLine::default());
        for (index, suggestion) in editor.suggestions().iter().enumerate() {
            let line = if index == editor.highlighted() {
                StyledLine::new(vec![
                    StyledSpan::colored(format!("▸ {suggestion}"), ThemeRole::Accent).bold(),
                ])
            } else {
                StyledLine::colored(format!("  {suggestion}"), ThemeRole::Primary)
            };
            lines.push(line);
        }
    }
    (title, lines)
}

fn headers_editor_lines(editor: &KeyValueEditor) -> (String, Vec<StyledLine>) {
    let title =
        "Edit Headers (Tab: switch field, Enter: new row, Ctrl+S: save, Esc: cancel)".to_string();
    let mut lines = vec![StyledLine::colored(
        format!("  {:<24} {}", "Key", "Value"),
        ThemeRole::Secondary,
    )];
    for (index, row) in editor.rows().iter().enumerate() {
        let active = index == editor.active_row();
        let cell = |text: &str, column: KeyValueColumn| {
            if active && editor.active_column() == column {
                StyledSpan::colored(format!("{text}▌"), ThemeRole::White).bold()
            } else {
                StyledSpan::colored(text.to_string(), ThemeRole::Primary)
            }
        };
        let key = cell(&row.key, KeyValueColumn::Key);
        let pad = 24usize.saturating_sub(key.text.width());
        lines.push(StyledLine::new(vec![
            StyledSpan::colored(if active { "▸ " } else { "  " }, ThemeRole::Accent),
            key,
            StyledSpan::plain(" ".repeat(pad + 1)),
            cell(&row.value, KeyValueColumn::Value),
        ]));
    }
    (title, lines)
}

fn theme_picker_lines(picker: &ThemePicker) -> (String, Vec<StyledLine>) {
    let title = "Theme Menu (↑/↓ to change, Esc to close)".to_string();
    let lines = picker
        .themes()
        .iter()
        .enumerate()
        .map(|(index, theme)| {
            if index == picker.selected() {
                StyledLine::new(vec![
                    StyledSpan::colored(format!("▶ {}", theme.name), ThemeRole::Accent).bold(),
                ])
            } else {
                StyledLine::colored(format!("  {}", theme.name), ThemeRole::Primary)
            }
        })
        .collect();
    (title, lines)
}

fn toggle_spans(options: [(&str, bool); 2]) -> Vec<StyledSpan> {
    options
        .into_iter()
        .map(|(label, chosen)| {
            if chosen {
                StyledSpan::colored(format!("[{label}] "), ThemeRole::Accent).bold()
            } else {
                StyledSpan::colored(format!(" {label}  "), ThemeRole::Muted)
            }
        })
        .collect()
}

fn export_dialog_lines(dialog: &ExportDialog, vm: &ViewModel) -> (String, Vec<StyledLine>) {
    let title = "Export Request (Tab: switch, ←→: select, Enter: confirm, Esc: cancel)".to_string();
    let row_marker = |row: ExportRow| {
        StyledSpan::colored(
            if dialog.active_row() == row { "▸ " } else { "  " },
            ThemeRole::Accent,
        )
    };

    let format = dialog.format();
    let mut format_line = vec![row_marker(ExportRow::Format), StyledSpan::plain("Format:  ")];
    format_line.extend(toggle_spans([
        ("cURL", format == ExportFormat::Curl),
        ("Fetch", format == ExportFormat::Fetch),
    ]));

    let action = dialog.action();
    let mut action_line = vec![row_marker(ExportRow::Action), StyledSpan::plain("Action:  ")];
    action_line.extend(toggle_spans([
        ("Copy to clipboard", action == ExportAction::Copy),
        ("Save to file", action == ExportAction::Save),
    ]));

    let mut lines = vec![StyledLine::new(format_line), StyledLine::new(action_line)];
    if dialog.active_row() == ExportRow::Path {
        lines.push(StyledLine::new(vec![
            row_marker(ExportRow::Path),
            StyledSpan::plain("File:    "),
            StyledSpan::colored(format!("{}▌", dialog.file_path()), ThemeRole::White),
            StyledSpan::colored(format!("  ({})", format.extension()), ThemeRole::Muted),
        ]));
    }

    lines.push(StyledLine::default());
    let preview = format.render(vm.draft());
    let preview_lines: Vec<&str> = preview.lines().collect();
    for text in preview_lines.iter().take(EXPORT_PREVIEW_ROWS) {
        lines.push(StyledLine::colored(*text, ThemeRole::Cool));
    }
    if preview_lines.len() > EXPORT_PREVIEW_ROWS {
        lines.push(StyledLine::colored("…", ThemeRole::Muted));
    }

    if let Some(message) = dialog.message() {
        lines.push(StyledLine::default());
        let role = if message.starts_with('✓') || message.starts_with("Copied") {
            ThemeRole::Success
        } else {
            ThemeRole::Error
        };
        for text in message.lines() {
            lines.push(StyledLine::colored(text, role));
        }
    }
    (title, lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::io::MockRenderStream;
    use crate::repl::models::{ExecutionResult, HistoryEntry};

    fn render(vm: &ViewModel) -> MockRenderStream {
        let mut renderer = TerminalRenderer::new(MockRenderStream::with_size(vm.terminal_size()));
        renderer.render_full(vm).unwrap();
        renderer.into_stream()
    }

    fn entry(url: &str, status: Option<u16>) -> HistoryEntry {
        HistoryEntry {
            method: "GET".to_string(),
            url: url.to_string(),
            headers: String::new(),
            body: String::new(),
            timestamp: 0,
            response_status: status,
            response_time: Some(12.4),
        }
    }

    #[test]
    fn fresh_session_should_show_chrome() {
        let screen = render(&ViewModel::default());
        assert!(screen.row_text(0).contains("PostBoy"));
        assert!(screen.screen_contains("H I S T O R Y"));
        assert!(screen.screen_contains("No requests yet"));
        assert!(screen.screen_contains("[ SEND ]"));
        assert!(screen.row_text(23).contains("[Q] Quit"));
    }

    #[test]
    fn focused_field_should_show_edit_hint() {
        let screen = render(&ViewModel::default());
        assert!(screen.screen_contains("Method  GET (Press Enter to edit)"));
    }

    #[test]
    fn history_items_should_show_status_and_time() {
        let mut vm = ViewModel::default();
        vm.set_terminal_size(120, 30);
        vm.set_history(vec![entry("https://api.test/users", Some(200)), entry("http://x", None)]);
        let screen = render(&vm);
        assert!(screen.screen_contains("200 GET    api.test/users"));
        assert!(screen.screen_contains("--- GET    x"));
        assert!(screen.screen_contains("12ms"));
    }

    #[test]
    fn response_tab_should_render_result() {
        let mut vm = ViewModel::default();
        vm.show_result(ExecutionResult::invalid_json("bad headers"));
        let screen = render(&vm);
        assert!(screen.screen_contains("Invalid JSON"));
        assert!(screen.screen_contains("bad headers"));
    }

    #[test]
    fn theme_picker_should_render_over_content() {
        let mut vm = ViewModel::default();
        vm.open_theme_picker();
        let screen = render(&vm);
        assert!(screen.screen_contains("Theme Menu"));
        assert!(screen.screen_contains("▶ Tokyo Night"));
    }

    #[test]
    fn cleanup_should_restore_terminal() {
        let mut renderer = TerminalRenderer::new(MockRenderStream::new());
        renderer.initialize().unwrap();
        assert!(renderer.stream().is_raw_mode());
        renderer.cleanup().unwrap();
        assert!(!renderer.stream().is_raw_mode());
        assert!(!renderer.stream().is_alternate_screen());
        assert!(renderer.stream().is_cursor_visible());
    }
}

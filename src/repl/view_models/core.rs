//! # Core ViewModel Structure
//!
//! Everything the renderer needs to draw a frame. The controller is the only
//! writer; behavior is split across the `*_manager` modules as `impl ViewModel`
//! blocks.

use std::time::{Duration, Instant};

use super::focus::FocusRing;
use super::history_list::HistoryList;
use super::modal::Modal;
use super::viewport::Viewport;
use crate::config::VIEWPORT_CHROME_ROWS;
use crate::repl::events::{Tab, UiMode, Widget};
use crate::repl::models::{
    DownloadProgress, ExecutionResult, HistoryEntry, RequestDraft, StyledLine, Theme,
};

/// Rows the history sidebar spends on things other than entries:
/// title, heading, search line, gap, status row and footer
pub(super) const HISTORY_CHROME_ROWS: u16 = 6;
/// Each history entry takes two rows
pub(super) const HISTORY_ITEM_ROWS: u16 = 2;

pub const SPINNER_FRAMES: [&str; 4] = ["▖", "▘", "▝", "▗"];
pub(super) const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Spinner {
    pub frame: usize,
    pub last_tick: Instant,
}

pub struct ViewModel {
    pub(super) draft: RequestDraft,
    pub(super) result: Option<ExecutionResult>,
    pub(super) history: Vec<HistoryEntry>,
    pub(super) history_list: HistoryList,
    pub(super) theme: Theme,
    pub(super) focus: FocusRing,
    pub(super) active_tab: Tab,
    pub(super) modal: Option<Modal>,
    pub(super) viewport: Viewport,
    /// Flattened rows of the active scrollable tab
    pub(super) content: Vec<StyledLine>,
    pub(super) status: Option<StatusMessage>,
    pub(super) loading: bool,
    pub(super) progress: Option<DownloadProgress>,
    pub(super) spinner: Spinner,
    pub(super) terminal_size: (u16, u16),
}

impl ViewModel {
    pub fn new(theme: Theme, history: Vec<HistoryEntry>) -> Self {
        let terminal_size: (u16, u16) = (80, 24);
        Self {
            draft: RequestDraft::new(),
            result: None,
            history,
            history_list: HistoryList::default(),
            theme,
            focus: FocusRing::default(),
            active_tab: Tab::Request,
            modal: None,
            viewport: Viewport::new(terminal_size.1.saturating_sub(VIEWPORT_CHROME_ROWS) as usize),
            content: Vec::new(),
            status: None,
            loading: false,
            progress: None,
            spinner: Spinner {
                frame: 0,
                last_tick: Instant::now(),
            },
            terminal_size,
        }
    }

    pub fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    pub fn result(&self) -> Option<&ExecutionResult> {
        self.result.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_list(&self) -> &HistoryList {
        &self.history_list
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn focus(&self) -> Widget {
        self.focus.current()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Input owner right now
    pub fn mode(&self) -> UiMode {
        match &self.modal {
            Some(modal) => modal.mode(),
            None if self.history_list.is_searching() => UiMode::HistorySearch,
            None => UiMode::Normal,
        }
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn progress(&self) -> Option<&DownloadProgress> {
        self.progress.as_ref()
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner.frame % SPINNER_FRAMES.len()]
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Rows of the active tab's content that fit on screen
    pub fn visible_content(&self) -> &[StyledLine] {
        self.viewport.visible(&self.content)
    }

    /// Entries per page of the history sidebar
    pub fn history_page_size(&self) -> usize {
        (self.terminal_size.1.saturating_sub(HISTORY_CHROME_ROWS) / HISTORY_ITEM_ROWS).max(1)
            as usize
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new(Theme::default(), Vec::new())
    }
}

//! # Navigation Management
//!
//! Focus movement, tab switching, paging and the history sidebar cursor.

use std::ops::Range;

use crossterm::event::KeyEvent;

use super::core::ViewModel;
use super::focus::FocusScope;
use super::panels::{metrics_content, response_content};
use crate::config::VIEWPORT_CHROME_ROWS;
use crate::repl::events::{ScrollDirection, Tab, Widget};
use crate::repl::models::HistoryEntry;

impl ViewModel {
    pub fn focus_scope(&self) -> FocusScope {
        FocusScope {
            active_tab: self.active_tab,
            history_len: self.history.len(),
        }
    }

    pub fn focus_next(&mut self) {
        let scope = self.focus_scope();
        self.focus.next(scope);
        tracing::debug!("Focus moved forward to {:?}", self.focus.current());
    }

    pub fn focus_previous(&mut self) {
        let scope = self.focus_scope();
        self.focus.previous(scope);
        tracing::debug!("Focus moved back to {:?}", self.focus.current());
    }

    pub fn focus_widget(&mut self, widget: Widget) -> bool {
        let scope = self.focus_scope();
        self.focus.focus(widget, scope)
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        if tab != self.active_tab {
            tracing::debug!("Switching tab {:?} -> {:?}", self.active_tab, tab);
            self.active_tab = tab;
            self.viewport.reset();
        }
        self.refresh_content();
        let scope = self.focus_scope();
        self.focus.ensure_valid(scope);
    }

    pub fn next_tab(&mut self) {
        self.switch_tab(self.active_tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.switch_tab(self.active_tab.previous());
    }

    /// Rebuild the rows of the active tab and re-clamp the viewport
    pub(super) fn refresh_content(&mut self) {
        let result = self.result.as_ref();
        self.content = match self.active_tab {
            Tab::Request => Vec::new(),
            Tab::Response => response_content(result).into_lines(),
            Tab::Metrics => metrics_content(result).into_lines(),
        };
        self.viewport.set_content_height(self.content.len());
    }

    pub fn scroll(&mut self, direction: ScrollDirection) {
        match direction {
            ScrollDirection::PageUp => self.viewport.page_up(),
            ScrollDirection::PageDown => self.viewport.page_down(),
        }
    }

    pub fn set_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.viewport
            .set_max_height(height.saturating_sub(VIEWPORT_CHROME_ROWS) as usize);
        self.sync_history_window();
    }

    pub fn filtered_history(&self) -> Vec<&HistoryEntry> {
        self.history_list.filter(&self.history)
    }

    /// Positions within `filtered_history()` that are drawn
    pub fn history_window(&self) -> Range<usize> {
        let len = self.filtered_history().len();
        self.history_list
            .visible_range(len, self.history_page_size())
    }

    pub(super) fn sync_history_window(&mut self) {
        let len = self.filtered_history().len();
        let page = self.history_page_size();
        self.history_list.clamp(len);
        self.history_list.window(len, page);
    }

    pub fn history_move_up(&mut self) {
        self.history_list.move_up();
        self.sync_history_window();
    }

    pub fn history_move_down(&mut self) {
        let len = self.filtered_history().len();
        self.history_list.move_down(len);
        self.sync_history_window();
    }

    pub fn history_page(&mut self, direction: ScrollDirection) {
        let len = self.filtered_history().len();
        let page = self.history_page_size();
        match direction {
            ScrollDirection::PageUp => self.history_list.page_up(page),
            ScrollDirection::PageDown => self.history_list.page_down(page, len),
        }
        self.sync_history_window();
    }

    pub fn selected_history_entry(&self) -> Option<HistoryEntry> {
        self.filtered_history()
            .get(self.history_list.selected())
            .map(|entry| (*entry).clone())
    }

    pub fn start_history_search(&mut self) {
        self.history_list.start_search();
        self.focus_widget(Widget::History);
        tracing::debug!("History search started");
    }

    pub fn handle_history_search_key(&mut self, key: KeyEvent) {
        self.history_list.handle_search_key(key);
        self.sync_history_window();
    }
}

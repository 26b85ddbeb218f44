//! # History List
//!
//! Selection, scroll window and fuzzy search state for the history sidebar.
//! The entries themselves live on the view model; this only tracks the cursor
//! into the filtered view of them.

use crossterm::event::{KeyCode, KeyEvent};
use std::ops::Range;

use super::typed_char;
use crate::repl::models::HistoryEntry;
use crate::repl::utils::fuzzy_filter;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryList {
    selected: usize,
    scroll: usize,
    query: String,
    searching: bool,
}

impl HistoryList {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn start_search(&mut self) {
        self.searching = true;
    }

    /// Entries matching the query, best match first
    pub fn filter<'a>(&self, entries: &'a [HistoryEntry]) -> Vec<&'a HistoryEntry> {
        fuzzy_filter(entries.iter().collect(), &self.query, |e| e.search_key())
    }

    fn set_query(&mut self, query: String) {
        if query != self.query {
            self.query = query;
            self.selected = 0;
            self.scroll = 0;
        }
    }

    /// Key while the query is being typed
    pub fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.searching = false;
                self.set_query(String::new());
            }
            KeyCode::Enter => self.searching = false,
            KeyCode::Backspace | KeyCode::Delete => {
                let mut query = self.query.clone();
                query.pop();
                self.set_query(query);
            }
            _ => {
                if let Some(ch) = typed_char(&key) {
                    let query = format!("{}{ch}", self.query);
                    self.set_query(query);
                }
            }
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self, filtered_len: usize) {
        if self.selected + 1 < filtered_len {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, page: usize) {
        self.selected = self.selected.saturating_sub(page.max(1));
    }

    pub fn page_down(&mut self, page: usize, filtered_len: usize) {
        self.selected = (self.selected + page.max(1)).min(filtered_len.saturating_sub(1));
    }

    /// Keep the selection inside a list that may have shrunk
    pub fn clamp(&mut self, filtered_len: usize) {
        self.selected = self.selected.min(filtered_len.saturating_sub(1));
        self.scroll = self.scroll.min(filtered_len.saturating_sub(1));
    }

    /// Scroll just enough to keep the selection visible, returning the window
    pub fn window(&mut self, filtered_len: usize, max_items: usize) -> Range<usize> {
        if max_items == 0 {
            return 0..0;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + max_items {
            self.scroll = self.selected + 1 - max_items;
        }
        self.visible_range(filtered_len, max_items)
    }

    /// Indices into the filtered list currently drawn
    pub fn visible_range(&self, filtered_len: usize, max_items: usize) -> Range<usize> {
        let start = self.scroll.min(filtered_len);
        start..(start + max_items).min(filtered_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn entry(method: &str, url: &str) -> HistoryEntry {
        HistoryEntry {
            method: method.to_string(),
            url: url.to_string(),
            headers: String::new(),
            body: String::new(),
            timestamp: 0,
            response_status: None,
            response_time: None,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn query_should_filter_by_method_and_url() {
        let entries = vec![
            entry("GET", "http://a/users"),
            entry("POST", "http://a/orders"),
        ];
        let mut list = HistoryList::default();
        list.start_search();
        for ch in "pst".chars() {
            list.handle_search_key(key(KeyCode::Char(ch)));
        }
        let filtered = list.filter(&entries);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].url, "http://a/orders");
    }

    #[test]
    fn query_change_should_reset_selection() {
        let mut list = HistoryList::default();
        list.move_down(3);
        list.move_down(3);
        assert_eq!(list.selected(), 2);
        list.start_search();
        list.handle_search_key(key(KeyCode::Char('g')));
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn escape_should_clear_query_and_leave_search() {
        let mut list = HistoryList::default();
        list.start_search();
        list.handle_search_key(key(KeyCode::Char('x')));
        list.handle_search_key(key(KeyCode::Esc));
        assert!(!list.is_searching());
        assert_eq!(list.query(), "");
    }

    #[test]
    fn enter_should_keep_query_and_leave_search() {
        let mut list = HistoryList::default();
        list.start_search();
        list.handle_search_key(key(KeyCode::Char('x')));
        list.handle_search_key(key(KeyCode::Enter));
        assert!(!list.is_searching());
        assert_eq!(list.query(), "x");
    }

    #[test]
    fn selection_should_clamp_to_list() {
        let mut list = HistoryList::default();
        list.move_up();
        assert_eq!(list.selected(), 0);
        list.move_down(2);
        list.move_down(2);
        assert_eq!(list.selected(), 1);
    }

    #[test]
    fn paging_should_move_selection_by_page() {
        let mut list = HistoryList::default();
        list.page_down(2, 5);
        assert_eq!(list.selected(), 2);
        list.page_down(2, 5);
        list.page_down(2, 5);
        assert_eq!(list.selected(), 4);
        list.page_up(3);
        assert_eq!(list.selected(), 1);
    }

    #[test]
    fn window_should_follow_selection() {
        let mut list = HistoryList::default();
        for _ in 0..4 {
            list.move_down(5);
        }
        assert_eq!(list.window(5, 2), 3..5);
        list.move_up();
        list.move_up();
        assert_eq!(list.window(5, 2), 2..4);
    }
}

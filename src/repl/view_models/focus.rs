//! # Focus Ring
//!
//! Exactly one widget owns non-global input. Which widgets can take focus
//! depends on the active tab and whether there is any history to browse.

use crate::repl::events::{Tab, Widget};

/// What the ring needs to know to decide which widgets are focusable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusScope {
    pub active_tab: Tab,
    pub history_len: usize,
}

impl FocusScope {
    pub fn is_focusable(&self, widget: Widget) -> bool {
        match widget {
            Widget::History => self.history_len > 0,
            Widget::Tabs => self.active_tab != Tab::Request,
            w => w.belongs_to_request_tab() && self.active_tab == Tab::Request,
        }
    }

    pub fn focusable(&self) -> Vec<Widget> {
        Widget::ORDER
            .into_iter()
            .filter(|&w| self.is_focusable(w))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRing {
    current: Widget,
}

impl Default for FocusRing {
    fn default() -> Self {
        Self {
            current: Widget::Method,
        }
    }
}

impl FocusRing {
    pub fn current(&self) -> Widget {
        self.current
    }

    pub fn next(&mut self, scope: FocusScope) {
        self.step(scope, 1);
    }

    pub fn previous(&mut self, scope: FocusScope) {
        self.step(scope, -1);
    }

    fn step(&mut self, scope: FocusScope, delta: isize) {
        let ring = scope.focusable();
        if ring.is_empty() {
            return;
        }
        let len = ring.len() as isize;
        let next = match ring.iter().position(|&w| w == self.current) {
            Some(pos) => (pos as isize + delta).rem_euclid(len) as usize,
            // Current widget just became unfocusable; land on the ring's edge
            None if delta > 0 => 0,
            None => ring.len() - 1,
        };
        self.current = ring[next];
    }

    /// Focus `widget` if it can take focus right now
    pub fn focus(&mut self, widget: Widget, scope: FocusScope) -> bool {
        if scope.is_focusable(widget) {
            self.current = widget;
            true
        } else {
            false
        }
    }

    /// Move to the first focusable widget if the current one no longer is
    pub fn ensure_valid(&mut self, scope: FocusScope) {
        if !scope.is_focusable(self.current) {
            if let Some(&first) = scope.focusable().first() {
                self.current = first;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(tab: Tab, history_len: usize) -> FocusScope {
        FocusScope {
            active_tab: tab,
            history_len,
        }
    }

    #[test]
    fn five_tabs_should_cycle_back_to_method_on_fresh_session() {
        let mut ring = FocusRing::default();
        let mut visited = Vec::new();
        for _ in 0..5 {
            ring.next(scope(Tab::Request, 0));
            visited.push(ring.current());
        }
        assert_eq!(
            visited,
            vec![
                Widget::Url,
                Widget::Headers,
                Widget::Body,
                Widget::Send,
                Widget::Method
            ]
        );
    }

    #[test]
    fn history_should_join_ring_when_present() {
        let mut ring = FocusRing::default();
        ring.previous(scope(Tab::Request, 2));
        assert_eq!(ring.current(), Widget::History);
    }

    #[test]
    fn response_tab_should_offer_history_and_tabs() {
        assert_eq!(
            scope(Tab::Response, 3).focusable(),
            vec![Widget::History, Widget::Tabs]
        );
        assert_eq!(scope(Tab::Metrics, 0).focusable(), vec![Widget::Tabs]);
    }

    #[test]
    fn ensure_valid_should_leave_hidden_widgets() {
        let mut ring = FocusRing::default();
        ring.ensure_valid(scope(Tab::Response, 0));
        assert_eq!(ring.current(), Widget::Tabs);

        ring.ensure_valid(scope(Tab::Request, 0));
        assert_eq!(ring.current(), Widget::Method);
    }

    #[test]
    fn focus_should_refuse_unfocusable_widget() {
        let mut ring = FocusRing::default();
        assert!(!ring.focus(Widget::History, scope(Tab::Request, 0)));
        assert_eq!(ring.current(), Widget::Method);
        assert!(ring.focus(Widget::History, scope(Tab::Request, 1)));
        assert_eq!(ring.current(), Widget::History);
    }
}

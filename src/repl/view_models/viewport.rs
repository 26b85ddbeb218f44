//! # Viewport Virtualizer
//!
//! Shows a fixed-height window onto content of any length. Content is a small
//! tree whose height is estimated structurally: text counts its lines, groups
//! sum their children, a styled line is one row, empty nodes take no space.

use crate::repl::models::StyledLine;

#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Empty,
    Text(String),
    Line(StyledLine),
    Group(Vec<ContentNode>),
}

impl ContentNode {
    pub fn estimate_height(&self) -> usize {
        match self {
            ContentNode::Empty => 0,
            ContentNode::Text(text) => text.split('\n').count(),
            ContentNode::Line(_) => 1,
            ContentNode::Group(children) => children.iter().map(Self::estimate_height).sum(),
        }
    }

    /// Flatten into terminal rows; yields exactly `estimate_height` rows
    pub fn into_lines(self) -> Vec<StyledLine> {
        let mut lines = Vec::new();
        self.flatten_into(&mut lines);
        lines
    }

    fn flatten_into(self, lines: &mut Vec<StyledLine>) {
        match self {
            ContentNode::Empty => {}
            ContentNode::Text(text) => lines.extend(text.split('\n').map(StyledLine::plain)),
            ContentNode::Line(line) => lines.push(line),
            ContentNode::Group(children) => {
                for child in children {
                    child.flatten_into(lines);
                }
            }
        }
    }
}

/// Scroll state for one scrollable area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    offset: usize,
    max_height: usize,
    content_height: usize,
}

impl Viewport {
    pub fn new(max_height: usize) -> Self {
        Self {
            offset: 0,
            max_height,
            content_height: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn max_height(&self) -> usize {
        self.max_height
    }

    pub fn content_height(&self) -> usize {
        self.content_height
    }

    fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.max_height)
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    /// New terminal height; keeps the offset in range
    pub fn set_max_height(&mut self, max_height: usize) {
        self.max_height = max_height;
        self.clamp();
    }

    /// New content; keeps the offset in range when content shrinks
    pub fn set_content_height(&mut self, content_height: usize) {
        self.content_height = content_height;
        self.clamp();
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.max_height);
    }

    pub fn page_down(&mut self) {
        self.offset = (self.offset + self.max_height).min(self.max_offset());
    }

    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.max_height
    }

    /// Slice of `lines` that fits in the window
    pub fn visible<'a, T>(&self, lines: &'a [T]) -> &'a [T] {
        let start = self.offset.min(lines.len());
        let end = (self.offset + self.max_height).min(lines.len());
        &lines[start..end]
    }

    /// `"a-b/c"` position text, only when content overflows
    pub fn status_line(&self) -> Option<String> {
        self.is_scrollable().then(|| {
            format!(
                "Scroll (PgUp/PgDn) {}-{}/{}",
                self.offset + 1,
                (self.offset + self.max_height).min(self.content_height),
                self.content_height
            )
        })
    }
}

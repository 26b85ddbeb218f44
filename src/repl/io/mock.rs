//! # Mock I/O
//!
//! Headless stand-ins for the terminal. `MockRenderStream` records every
//! command and also keeps a character grid of what would be on screen, so tests
//! can assert on rendered text by row.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::Event;
use crossterm::style::Color;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use unicode_width::UnicodeWidthChar;

/// Pre-programmed input events
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    SetForeground(Color),
    SetBold(bool),
    ResetStyle,
    GetSize,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Write(String),
    Flush,
}

type CommandHistory = Arc<Mutex<Vec<RenderCommand>>>;

/// Continuation cell of a double-width character
const WIDE_FILLER: char = '\0';

pub struct MockRenderStream {
    commands: CommandHistory,
    screen: Vec<Vec<char>>,
    cursor: (u16, u16),
    terminal_size: TerminalSize,
    cursor_visible: bool,
    raw_mode: bool,
    alternate_screen: bool,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            screen: blank_screen(size),
            cursor: (0, 0),
            terminal_size: size,
            cursor_visible: true,
            raw_mode: false,
            alternate_screen: false,
        }
    }

    /// Change the size reported to the renderer, as a terminal resize would
    pub fn resize(&mut self, size: TerminalSize) {
        self.terminal_size = size;
        self.screen = blank_screen(size);
    }

    pub fn get_commands(&self) -> Vec<RenderCommand> {
        self.commands
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default()
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.commands
            .lock()
            .map(|commands| commands.contains(command))
            .unwrap_or(false)
    }

    /// Text of one screen row with trailing blanks removed
    pub fn row_text(&self, y: u16) -> String {
        self.screen
            .get(y as usize)
            .map(|row| {
                row.iter()
                    .filter(|&&c| c != WIDE_FILLER)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .unwrap_or_default()
    }

    pub fn screen_contains(&self, needle: &str) -> bool {
        (0..self.terminal_size.1).any(|y| self.row_text(y).contains(needle))
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.alternate_screen
    }

    fn record(&self, command: RenderCommand) {
        if let Ok(mut commands) = self.commands.lock() {
            commands.push(command);
        }
    }

    fn put_text(&mut self, text: &str) {
        let (width, height) = self.terminal_size;
        for ch in text.chars() {
            let (x, y) = self.cursor;
            if ch == '\n' {
                self.cursor = (0, y.saturating_add(1));
                continue;
            }
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if x + w <= width && y < height {
                let row = &mut self.screen[y as usize];
                row[x as usize] = ch;
                if w == 2 {
                    row[x as usize + 1] = WIDE_FILLER;
                }
            }
            self.cursor = (x.saturating_add(w), y);
        }
    }
}

fn blank_screen((width, height): TerminalSize) -> Vec<Vec<char>> {
    vec![vec![' '; width as usize]; height as usize]
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf).to_string();
        self.put_text(&text);
        self.record(RenderCommand::Write(text));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::ClearScreen);
        self.screen = blank_screen(self.terminal_size);
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.record(RenderCommand::MoveCursor(x, y));
        self.cursor = (x, y);
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::HideCursor);
        self.cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::ShowCursor);
        self.cursor_visible = true;
        Ok(())
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        self.record(RenderCommand::SetForeground(color));
        Ok(())
    }

    fn set_bold(&mut self, bold: bool) -> Result<()> {
        self.record(RenderCommand::SetBold(bold));
        Ok(())
    }

    fn reset_style(&mut self) -> Result<()> {
        self.record(RenderCommand::ResetStyle);
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        self.record(RenderCommand::GetSize);
        Ok(self.terminal_size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::EnterAlternateScreen);
        self.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::LeaveAlternateScreen);
        self.alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::EnableRawMode);
        self.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::DisableRawMode);
        self.raw_mode = false;
        Ok(())
    }
}

impl Default for MockEventStream {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn mock_event_stream_should_provide_events_in_order() {
        let mut stream = MockEventStream::new(vec![
            Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
            Event::Key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE)),
        ]);

        assert!(stream.poll(Duration::ZERO).unwrap());
        assert!(matches!(stream.read().unwrap(), Event::Key(k) if k.code == KeyCode::Char('a')));
        assert!(matches!(stream.read().unwrap(), Event::Key(k) if k.code == KeyCode::Char('b')));
        assert!(!stream.poll(Duration::ZERO).unwrap());
        assert!(stream.read().is_err());
    }

    #[test]
    fn mock_render_stream_should_record_commands() {
        let mut stream = MockRenderStream::new();

        stream.clear_screen().unwrap();
        stream.move_cursor(10, 20).unwrap();
        stream.hide_cursor().unwrap();
        stream.write_all(b"Hello").unwrap();
        stream.flush().unwrap();

        assert_eq!(
            stream.get_commands(),
            vec![
                RenderCommand::ClearScreen,
                RenderCommand::MoveCursor(10, 20),
                RenderCommand::HideCursor,
                RenderCommand::Write("Hello".to_string()),
                RenderCommand::Flush,
            ]
        );
    }

    #[test]
    fn mock_render_stream_should_place_text_on_grid() {
        let mut stream = MockRenderStream::with_size((20, 3));
        stream.move_cursor(2, 1).unwrap();
        write!(stream, "héllo 日本").unwrap();

        assert_eq!(stream.row_text(1), "  héllo 日本");
        assert_eq!(stream.row_text(0), "");
        assert!(stream.screen_contains("日本"));
    }

    #[test]
    fn mock_render_stream_should_clip_at_right_edge() {
        let mut stream = MockRenderStream::with_size((5, 1));
        write!(stream, "abcdefgh").unwrap();
        assert_eq!(stream.row_text(0), "abcde");
    }

    #[test]
    fn mock_render_stream_should_track_state() {
        let mut stream = MockRenderStream::with_size((120, 40));
        assert_eq!(stream.get_size().unwrap(), (120, 40));

        stream.hide_cursor().unwrap();
        stream.enable_raw_mode().unwrap();
        stream.enter_alternate_screen().unwrap();

        assert!(!stream.is_cursor_visible());
        assert!(stream.is_raw_mode());
        assert!(stream.is_alternate_screen());
    }
}

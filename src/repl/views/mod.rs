//! # View Layer
//!
//! Draws the view model onto a `RenderStream`.

pub mod terminal_renderer;

pub use terminal_renderer::{TerminalRenderer, ViewRenderer};

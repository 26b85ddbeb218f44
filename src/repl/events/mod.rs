//! # Event Types
//!
//! Identifiers shared by the router, view models and renderer.

pub mod types;

pub use types::{EditableField, ScrollDirection, Tab, UiMode, Widget};

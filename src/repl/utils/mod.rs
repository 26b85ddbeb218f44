//! # Utils Module
//!
//! Helpers shared by the view models: fuzzy matching, JSON highlighting and
//! small formatting functions.

pub mod format;
pub mod fuzzy;
pub mod json_highlight;

pub use format::{
    format_bytes, format_duration_ms, local_time_of_day, shorten_url, truncate_to_width,
};
pub use fuzzy::{fuzzy_filter, fuzzy_match, FuzzyMatch};
pub use json_highlight::{highlight_json, pretty_json};

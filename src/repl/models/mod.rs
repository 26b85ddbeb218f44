//! # Models Module
//!
//! Plain data the session owns: the request draft, execution results,
//! history documents and themes. No I/O happens here.

pub mod history;
pub mod request_model;
pub mod response_model;
pub mod styled_text;
pub mod theme;

pub use history::{HistoryDocument, HistoryEntry};
pub use request_model::{HeaderPair, HttpMethod, RequestDraft};
pub use response_model::{
    DownloadProgress, ExecutionResult, PhaseCheckpoints, PhaseTimings, ResponseStatus,
};
pub use styled_text::{StyledLine, StyledSpan};
pub use theme::{builtin_themes, default_theme, Theme, ThemeRole};

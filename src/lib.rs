//! # PostBoy - Terminal HTTP Workbench
//!
//! Compose HTTP requests, send them and inspect the response and its timing
//! breakdown without leaving the keyboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   draws    ┌──────────────┐   reads    ┌─────────────┐
//! │    View     │◄───────────│  ViewModel   │◄───────────│   Models    │
//! │ (renderer)  │            │ (focus, tabs,│            │ draft,result│
//! └─────────────┘            │  modals)     │            │ history,    │
//!                            └──────────────┘            │ theme       │
//!                                   ▲                    └─────────────┘
//!                                   │ applies CommandEvents
//!                            ┌──────────────┐   spawn    ┌─────────────┐
//!  keys ────────────────────▶│  Controller  │───────────▶│ HttpService │
//!        (CommandRegistry)   │  event loop  │◀───────────│ (tokio task)│
//!                            └──────────────┘  channel   └─────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

pub use repl::*;

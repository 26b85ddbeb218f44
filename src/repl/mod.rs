//! # Interactive Session
//!
//! MVVM layout: `models` hold data, `view_models` hold presentation state,
//! `views` draw it, `commands` map keys to intents and `controllers` run the
//! loop that ties them together. `services` and `store` do the I/O.

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;
pub mod view_models;
pub mod views;

pub use commands::{Command, CommandContext, CommandEvent, CommandRegistry, ViewModelSnapshot};
pub use controllers::AppController;
pub use io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream};
pub use view_models::ViewModel;
pub use views::{TerminalRenderer, ViewRenderer};

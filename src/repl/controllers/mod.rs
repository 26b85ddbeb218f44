//! # Controllers
//!
//! The session controller owns the event loop and is the only writer of the
//! view model.

pub mod app_controller;

pub use app_controller::AppController;

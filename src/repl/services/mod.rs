//! # Services Layer
//!
//! Work with side effects that the view models delegate: running HTTP
//! requests and exporting the draft.

pub mod decoder;
pub mod engine;
pub mod export;
pub mod http;

pub use engine::{
    EngineError, EngineRequest, EngineResponse, HttpEngine, HyperEngine, ProgressSink,
};
pub use export::ExportFormat;
pub use http::{prepare_request, HttpResponseMessage, HttpService, ValidationError};

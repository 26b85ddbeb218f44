//! Shared helpers for driving a headless session

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use postboy::config::ConfigPaths;
use postboy::repl::io::{MockEventStream, MockRenderStream};
use postboy::repl::services::{
    EngineError, EngineRequest, EngineResponse, HttpEngine, HyperEngine, ProgressSink,
};
use postboy::AppController;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

pub type TestController = AppController<MockEventStream, MockRenderStream>;

/// Engine that counts calls and refuses to connect
#[derive(Default)]
pub struct CountingEngine {
    calls: AtomicUsize,
}

impl CountingEngine {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl HttpEngine for CountingEngine {
    async fn execute(
        &self,
        _request: EngineRequest,
        _progress: Option<ProgressSink>,
    ) -> Result<EngineResponse, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(EngineError::Protocol("connection refused".to_string()))
    }
}

pub fn controller_with(dir: &TempDir, engine: Arc<dyn HttpEngine>) -> TestController {
    AppController::with_engine(
        ConfigPaths::new(dir.path()),
        engine,
        MockEventStream::empty(),
        MockRenderStream::with_size((100, 30)),
    )
    .expect("controller")
}

pub fn counting_controller(dir: &TempDir) -> (TestController, Arc<CountingEngine>) {
    let engine = Arc::new(CountingEngine::default());
    (controller_with(dir, engine.clone()), engine)
}

pub fn hyper_controller(dir: &TempDir) -> TestController {
    controller_with(dir, Arc::new(HyperEngine::new().expect("engine")))
}

pub fn press(controller: &mut TestController, code: KeyCode) {
    controller
        .process_key_event(KeyEvent::new(code, KeyModifiers::NONE))
        .expect("key");
}

pub fn ctrl(controller: &mut TestController, ch: char) {
    controller
        .process_key_event(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
        .expect("key");
}

pub fn type_text(controller: &mut TestController, text: &str) {
    for ch in text.chars() {
        press(controller, KeyCode::Char(ch));
    }
}

//! # HTTP Service
//!
//! Validates the request draft, runs the engine on a background task and hands
//! results back to the event loop over a channel. Only the newest request is
//! tracked: starting another one aborts the previous task, and messages from an
//! older generation are discarded.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::engine::{EngineError, EngineRequest, EngineResponse, HttpEngine, ProgressSink};
use crate::repl::models::{
    DownloadProgress, ExecutionResult, PhaseTimings, RequestDraft, ResponseStatus,
};

const CHANNEL_CAPACITY: usize = 64;

/// Local validation failure; the request never reaches the network
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Headers are not a valid JSON object: {0}")]
    InvalidHeaders(String),

    #[error("Body is not valid JSON: {0}")]
    InvalidBody(String),
}

impl From<ValidationError> for ExecutionResult {
    fn from(err: ValidationError) -> Self {
        ExecutionResult::invalid_json(err.to_string())
    }
}

/// Turn the draft into an engine request, checking headers and body are JSON
pub fn prepare_request(draft: &RequestDraft) -> Result<EngineRequest, ValidationError> {
    if let Some(raw) = draft.unparsed_headers() {
        let reason = match serde_json::from_str::<Value>(raw) {
            Err(e) => e.to_string(),
            Ok(_) => "expected an object of header names to values".to_string(),
        };
        return Err(ValidationError::InvalidHeaders(reason));
    }

    let body = draft.body();
    if !body.trim().is_empty() {
        serde_json::from_str::<Value>(body)
            .map_err(|e| ValidationError::InvalidBody(e.to_string()))?;
    }

    let headers = draft
        .header_map()
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect();

    Ok(EngineRequest {
        method: draft.method(),
        url: draft.url().trim().to_string(),
        headers,
        body: (!body.trim().is_empty()).then(|| body.to_string()),
    })
}

/// Map an engine outcome onto the result shown to the user
pub fn execution_result(outcome: Result<EngineResponse, EngineError>) -> ExecutionResult {
    match outcome {
        Ok(response) => ExecutionResult {
            status: ResponseStatus::Code(response.status),
            status_text: response.status_text,
            headers: response.headers,
            body: response.body,
            metrics: response.metrics,
            error: None,
        },
        Err(e) => {
            tracing::error!("HTTP request failed: {}", e);
            ExecutionResult::request_failed(e.to_string(), PhaseTimings::default())
        }
    }
}

/// Messages from the background request task
#[derive(Debug, Clone, PartialEq)]
pub enum HttpResponseMessage {
    Progress {
        generation: u64,
        progress: DownloadProgress,
    },
    Completed {
        generation: u64,
        result: ExecutionResult,
    },
}

impl HttpResponseMessage {
    pub fn generation(&self) -> u64 {
        match self {
            HttpResponseMessage::Progress { generation, .. }
            | HttpResponseMessage::Completed { generation, .. } => *generation,
        }
    }
}

/// Service for running requests off the input loop
pub struct HttpService {
    engine: Arc<dyn HttpEngine>,
    response_receiver: mpsc::Receiver<HttpResponseMessage>,
    response_sender: mpsc::Sender<HttpResponseMessage>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    /// Set from send until the current `Completed` message is handed out
    awaiting_result: bool,
}

impl HttpService {
    pub fn new(engine: Arc<dyn HttpEngine>) -> Self {
        let (response_sender, response_receiver) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            engine,
            response_receiver,
            response_sender,
            generation: 0,
            in_flight: None,
            awaiting_result: false,
        }
    }

    /// True until the newest request's result has been taken from the channel.
    /// A finished task whose result is still queued counts as busy.
    pub fn is_busy(&self) -> bool {
        self.awaiting_result
    }

    /// Run a request on a tokio task. Any request still running is aborted.
    pub fn execute_async(&mut self, request: EngineRequest) -> u64 {
        self.cancel();
        self.generation += 1;
        self.awaiting_result = true;
        let generation = self.generation;

        let progress_sender = self.response_sender.clone();
        let progress: ProgressSink = Arc::new(move |progress| {
            // Progress is best effort; a full channel just skips an update
            let _ = progress_sender.try_send(HttpResponseMessage::Progress {
                generation,
                progress,
            });
        });

        let engine = Arc::clone(&self.engine);
        let result_sender = self.response_sender.clone();
        tracing::debug!("Spawning request generation {}", generation);
        self.in_flight = Some(tokio::spawn(async move {
            let result = execution_result(engine.execute(request, Some(progress)).await);
            // Receiver may be gone if the session is shutting down
            let _ = result_sender
                .send(HttpResponseMessage::Completed { generation, result })
                .await;
        }));
        generation
    }

    /// Abort the running request, if any. Its messages will be ignored.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                tracing::info!("Aborting in-flight request generation {}", self.generation);
            }
            handle.abort();
        }
        self.awaiting_result = false;
    }

    fn is_current(&self, message: &HttpResponseMessage) -> bool {
        message.generation() == self.generation
    }

    fn accept(&mut self, message: HttpResponseMessage) -> HttpResponseMessage {
        if matches!(message, HttpResponseMessage::Completed { .. }) {
            self.awaiting_result = false;
        }
        message
    }

    /// Next message for the current request without blocking
    pub fn poll_response(&mut self) -> Option<HttpResponseMessage> {
        while let Ok(message) = self.response_receiver.try_recv() {
            if self.is_current(&message) {
                return Some(self.accept(message));
            }
            tracing::debug!("Dropping stale message from generation {}", message.generation());
        }
        None
    }

    /// Wait for the next message for the current request
    pub async fn next_response(&mut self) -> Option<HttpResponseMessage> {
        while let Some(message) = self.response_receiver.recv().await {
            if self.is_current(&message) {
                return Some(self.accept(message));
            }
        }
        None
    }
}

impl Drop for HttpService {
    fn drop(&mut self) {
        self.cancel();
    }
}

//! # Application Controller
//!
//! Orchestrates the session: routes input through the command registry,
//! applies the resulting events to the view model, starts requests, folds
//! background results back in, persists history and theme, and redraws.
//!
//! All view model mutation happens on the loop in [`AppController::run`]. The
//! only concurrent work is the HTTP request task, which reports back through
//! the service's channel.

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cmd_args::CommandLineArgs;
use crate::config::{resolve_config_dir, ConfigPaths};
use crate::repl::{
    commands::{CommandContext, CommandEvent, CommandRegistry},
    events::EditableField,
    io::{EventStream, RenderStream},
    models::{history::now_millis, ExecutionResult, HistoryEntry, RequestDraft},
    services::{
        export, prepare_request, HttpEngine, HttpResponseMessage, HttpService, HyperEngine,
    },
    store::{HistoryStore, ThemeStore},
    view_models::{ModalOutcome, StatusKind, ViewModel},
    views::{TerminalRenderer, ViewRenderer},
};

/// How long one loop iteration waits for input
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct AppController<ES: EventStream, RS: RenderStream> {
    view_model: ViewModel,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    event_stream: ES,
    http_service: HttpService,
    history_store: HistoryStore,
    theme_store: ThemeStore,
    paths: ConfigPaths,
    /// Draft as it was when the in-flight request was sent
    pending_draft: Option<RequestDraft>,
    should_quit: bool,
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Controller for a real session: config dir from the args, hyper engine
    pub fn with_io_streams(
        cmd_args: &CommandLineArgs,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let paths = ConfigPaths::new(resolve_config_dir(cmd_args.config_dir()));
        let engine = HyperEngine::new().context("Failed to initialize HTTP engine")?;
        let mut controller = Self::with_engine(paths, Arc::new(engine), event_stream, render_stream)?;
        controller.apply_args(cmd_args);
        Ok(controller)
    }

    /// Controller with an injected engine
    pub fn with_engine(
        paths: ConfigPaths,
        engine: Arc<dyn HttpEngine>,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        tracing::info!("Using config directory {}", paths.root().display());
        let history_store = HistoryStore::new(paths.history_file());
        let theme_store = ThemeStore::new(paths.theme_file());

        let mut view_model = ViewModel::new(theme_store.load(), history_store.entries());
        let view_renderer = TerminalRenderer::new(render_stream);
        let (width, height) = view_renderer.terminal_size()?;
        view_model.set_terminal_size(width, height);

        Ok(Self {
            view_model,
            view_renderer,
            command_registry: CommandRegistry::new(),
            event_stream,
            http_service: HttpService::new(engine),
            history_store,
            theme_store,
            paths,
            pending_draft: None,
            should_quit: false,
        })
    }

    /// Prefill the draft from command line arguments
    pub fn apply_args(&mut self, cmd_args: &CommandLineArgs) {
        if let Some(method) = cmd_args.method() {
            self.view_model.commit_field(EditableField::Method, method);
        }
        if let Some(url) = cmd_args.url() {
            self.view_model.commit_field(EditableField::Url, url);
        }
        if let Some(body) = cmd_args.body() {
            self.view_model.commit_field(EditableField::Body, body);
        }
        if let Some(headers) = cmd_args.headers() {
            let mut draft = self.view_model.draft().clone();
            draft.set_headers_text(headers);
            self.view_model.set_draft(draft);
        }
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    pub fn render_stream(&self) -> &RS {
        self.view_renderer.stream()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop. The terminal is restored even when the
    /// loop fails.
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        let outcome = self.event_loop().await;

        self.http_service.cancel();
        let cleanup = self.view_renderer.cleanup();
        tracing::info!("Session ended");
        outcome.and(cleanup)
    }

    async fn event_loop(&mut self) -> Result<()> {
        self.view_renderer.render_full(&self.view_model)?;

        while !self.should_quit {
            let mut dirty = self.drain_responses();

            if self.event_stream.poll(POLL_INTERVAL)? {
                let event = self.event_stream.read()?;
                self.handle_event(event)?;
                dirty = true;
            }

            dirty |= self.tick(Instant::now());
            if dirty && !self.should_quit {
                self.view_renderer.render_full(&self.view_model)?;
            }

            // Let the request task make progress on a single-threaded runtime
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    pub fn render(&mut self) -> Result<()> {
        self.view_renderer.render_full(&self.view_model)
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.process_key_event(key),
            Event::Resize(width, height) => {
                tracing::debug!("Terminal resized to {}x{}", width, height);
                self.view_model.set_terminal_size(width, height);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Route one key through the command registry and apply the result
    pub fn process_key_event(&mut self, key: KeyEvent) -> Result<()> {
        tracing::debug!("Received key event: {:?}", key);
        let context = CommandContext::from_view_model(&self.view_model);
        let events = self.command_registry.process_event(key, &context)?;
        for event in events {
            self.apply_command_event(event)?;
        }
        Ok(())
    }

    /// Spinner frames and timed modal closes; true when a redraw is due
    pub fn tick(&mut self, now: Instant) -> bool {
        let spun = self.view_model.tick_spinner(now);
        let expired = self.view_model.expire_modal(now);
        spun || expired
    }

    fn apply_command_event(&mut self, event: CommandEvent) -> Result<()> {
        let vm = &mut self.view_model;
        match event {
            CommandEvent::QuitRequested => {
                tracing::info!("Quit requested");
                self.should_quit = true;
            }
            CommandEvent::SendRequested => self.send_request(),
            CommandEvent::FocusNextRequested => vm.focus_next(),
            CommandEvent::FocusPreviousRequested => vm.focus_previous(),
            CommandEvent::TabSwitchRequested { forward: true } => vm.next_tab(),
            CommandEvent::TabSwitchRequested { forward: false } => vm.previous_tab(),
            CommandEvent::ScrollRequested(direction) => vm.scroll(direction),
            CommandEvent::OpenFieldEditorRequested(field) => {
                vm.open_field_editor(field);
            }
            CommandEvent::OpenHeadersEditorRequested => {
                vm.open_headers_editor();
            }
            CommandEvent::OpenThemePickerRequested => {
                vm.open_theme_picker();
            }
            CommandEvent::OpenExportDialogRequested => {
                vm.open_export_dialog();
            }
            CommandEvent::HistorySearchStartRequested => vm.start_history_search(),
            CommandEvent::HistoryMoveRequested { up: true } => vm.history_move_up(),
            CommandEvent::HistoryMoveRequested { up: false } => vm.history_move_down(),
            CommandEvent::HistoryPageRequested(direction) => vm.history_page(direction),
            CommandEvent::HistorySelectRequested => {
                if let Some(entry) = vm.selected_history_entry() {
                    vm.load_history_entry(&entry);
                }
            }
            CommandEvent::ModalKeyRequested(key) => self.handle_modal_key(key)?,
            CommandEvent::HistorySearchKeyRequested(key) => vm.handle_history_search_key(key),
            CommandEvent::NoAction => {}
        }
        Ok(())
    }

    fn send_request(&mut self) {
        // A result may already be queued; record it before deciding
        self.drain_responses();
        if self.http_service.is_busy() {
            self.view_model
                .set_status("Request already in progress", StatusKind::Info);
            return;
        }

        let draft = self.view_model.draft().clone();
        match prepare_request(&draft) {
            Ok(request) => {
                tracing::info!("Sending {} {}", request.method, request.url);
                self.http_service.execute_async(request);
                self.pending_draft = Some(draft);
                self.view_model.begin_request();
            }
            Err(e) => {
                tracing::warn!("Request rejected before sending: {}", e);
                self.view_model.show_result(ExecutionResult::from(e));
            }
        }
    }

    /// Apply every message the request task has sent so far
    fn drain_responses(&mut self) -> bool {
        let mut changed = false;
        while let Some(message) = self.http_service.poll_response() {
            self.handle_response(message);
            changed = true;
        }
        changed
    }

    /// Wait until the in-flight request completes and apply its result
    pub async fn wait_for_response(&mut self) -> Result<()> {
        while let Some(message) = self.http_service.next_response().await {
            let done = matches!(message, HttpResponseMessage::Completed { .. });
            self.handle_response(message);
            if done {
                return Ok(());
            }
        }
        anyhow::bail!("Response channel closed")
    }

    fn handle_response(&mut self, message: HttpResponseMessage) {
        match message {
            HttpResponseMessage::Progress { progress, .. } => {
                self.view_model.update_progress(progress)
            }
            HttpResponseMessage::Completed { result, .. } => self.finish_request(result),
        }
    }

    fn finish_request(&mut self, result: ExecutionResult) {
        let mut save_error = None;
        if let Some(draft) = self.pending_draft.take() {
            let code = result.status.code();
            let elapsed_ms = code.map(|_| result.metrics.total.as_secs_f64() * 1000.0);
            let entry = HistoryEntry::from_draft(&draft, now_millis(), code, elapsed_ms);
            match self.history_store.add_entry(entry) {
                Ok(entries) => self.view_model.set_history(entries),
                Err(e) => {
                    tracing::error!("Failed to save history: {}", e);
                    save_error = Some(e);
                }
            }
        }

        self.view_model.show_result(result);
        if let Some(e) = save_error {
            self.view_model
                .set_status(format!("Failed to save history: {e}"), StatusKind::Error);
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(mut modal) = self.view_model.take_modal() else {
            return Ok(());
        };
        let outcome = modal.handle_key(key);
        if outcome.keeps_modal_open() {
            self.view_model.restore_modal(modal);
        }

        match outcome {
            ModalOutcome::Continue | ModalOutcome::Close => {}
            ModalOutcome::CommitField(field, text) => self.view_model.commit_field(field, &text),
            ModalOutcome::SaveHeaders(pairs) => self.view_model.set_headers(pairs),
            ModalOutcome::ApplyTheme(theme) => {
                if let Err(e) = self.theme_store.save(&theme) {
                    tracing::error!("Failed to save theme: {}", e);
                    self.view_model
                        .set_status(format!("Failed to save theme: {e}"), StatusKind::Error);
                }
                self.view_model.apply_theme(theme);
            }
            ModalOutcome::CopyExport(format) => {
                let content = format.render(self.view_model.draft());
                let (message, kind) = match export::copy_to_clipboard(&content) {
                    Ok(()) => ("Copied to clipboard!".to_string(), StatusKind::Success),
                    Err(e) => {
                        tracing::warn!("Clipboard export failed: {:#}", e);
                        (
                            "Failed to copy. Try saving to file.".to_string(),
                            StatusKind::Error,
                        )
                    }
                };
                self.report_export(message, kind);
            }
            ModalOutcome::SaveExport { format, file_name } => {
                let content = format.render(self.view_model.draft());
                let file_name = export::export_file_name(&file_name, format);
                let (message, kind) =
                    match export::save_to_file(&content, &self.paths.exports_dir(), &file_name) {
                        Ok(path) => (
                            format!("✓ File saved to:\n{}", path.display()),
                            StatusKind::Success,
                        ),
                        Err(e) => {
                            tracing::error!("File export failed: {:#}", e);
                            ("Failed to save file".to_string(), StatusKind::Error)
                        }
                    };
                self.report_export(message, kind);
            }
        }
        Ok(())
    }

    fn report_export(&mut self, message: String, kind: StatusKind) {
        self.view_model
            .set_status(message.replace('\n', " "), kind);
        if let Some(dialog) = self.view_model.export_dialog_mut() {
            dialog.report(message, Instant::now());
        }
    }
}

impl<ES: EventStream, RS: RenderStream> Drop for AppController<ES, RS> {
    fn drop(&mut self) {
        self.http_service.cancel();
    }
}

mod common;

use common::{counting_controller, ctrl, press, type_text, CountingEngine};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use postboy::config::ConfigPaths;
use postboy::repl::events::{Tab, UiMode, Widget};
use postboy::repl::io::{MockEventStream, MockRenderStream, RenderCommand};
use postboy::repl::models::HistoryEntry;
use postboy::repl::store::{HistoryStore, ThemeStore};
use postboy::AppController;
use std::sync::Arc;
use tempfile::TempDir;

fn seed_history(dir: &TempDir, urls: &[&str]) {
    let store = HistoryStore::new(ConfigPaths::new(dir.path()).history_file());
    for (i, url) in urls.iter().enumerate() {
        store
            .add_entry(HistoryEntry {
                method: "GET".to_string(),
                url: url.to_string(),
                headers: String::new(),
                body: String::new(),
                timestamp: i as i64,
                response_status: Some(200),
                response_time: Some(10.0),
            })
            .unwrap();
    }
}

#[test]
fn tab_should_cycle_request_widgets_back_to_method() {
    let dir = TempDir::new().unwrap();
    let (mut controller, _) = counting_controller(&dir);

    let mut seen = vec![controller.view_model().focus()];
    for _ in 0..5 {
        press(&mut controller, KeyCode::Tab);
        seen.push(controller.view_model().focus());
    }

    assert_eq!(
        seen,
        vec![
            Widget::Method,
            Widget::Url,
            Widget::Headers,
            Widget::Body,
            Widget::Send,
            Widget::Method
        ]
    );
}

#[test]
fn back_tab_should_walk_backwards() {
    let dir = TempDir::new().unwrap();
    let (mut controller, _) = counting_controller(&dir);
    controller
        .process_key_event(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT))
        .unwrap();
    assert_eq!(controller.view_model().focus(), Widget::Send);
}

#[test]
fn letter_shortcuts_should_be_text_inside_an_editor() {
    let dir = TempDir::new().unwrap();
    let (mut controller, _) = counting_controller(&dir);
    press(&mut controller, KeyCode::Tab);
    press(&mut controller, KeyCode::Enter);

    type_text(&mut controller, "tqe/");

    let vm = controller.view_model();
    assert_eq!(vm.mode(), UiMode::FieldEditor);
    assert!(!controller.should_quit());

    press(&mut controller, KeyCode::Enter);
    assert_eq!(controller.view_model().draft().url(), "tqe/");
}

#[test]
fn escape_should_discard_field_edit() {
    let dir = TempDir::new().unwrap();
    let (mut controller, _) = counting_controller(&dir);
    press(&mut controller, KeyCode::Enter);
    type_text(&mut controller, "XYZ");
    press(&mut controller, KeyCode::Esc);

    let vm = controller.view_model();
    assert_eq!(vm.mode(), UiMode::Normal);
    assert_eq!(vm.draft().method().to_string(), "GET");
}

#[test]
fn headers_editor_should_save_rows() {
    let dir = TempDir::new().unwrap();
    let (mut controller, _) = counting_controller(&dir);
    press(&mut controller, KeyCode::Tab);
    press(&mut controller, KeyCode::Tab);
    press(&mut controller, KeyCode::Enter);
    assert_eq!(controller.view_model().mode(), UiMode::HeadersEditor);

    type_text(&mut controller, "Accept");
    press(&mut controller, KeyCode::Tab);
    type_text(&mut controller, "text/plain");
    ctrl(&mut controller, 's');

    let vm = controller.view_model();
    assert_eq!(vm.mode(), UiMode::Normal);
    assert_eq!(vm.draft().headers().len(), 1);
    assert_eq!(vm.draft().headers()[0].key, "Accept");
    assert_eq!(vm.draft().headers()[0].value, "text/plain");
}

#[test]
fn theme_picker_should_persist_each_change() {
    let dir = TempDir::new().unwrap();
    let (mut controller, _) = counting_controller(&dir);
    press(&mut controller, KeyCode::Char('t'));
    assert_eq!(controller.view_model().mode(), UiMode::ThemePicker);

    press(&mut controller, KeyCode::Down);
    let applied = controller.view_model().theme().name.clone();
    assert_ne!(applied, "Tokyo Night");
    assert_eq!(controller.view_model().mode(), UiMode::ThemePicker);

    let saved = ThemeStore::new(ConfigPaths::new(dir.path()).theme_file()).load();
    assert_eq!(saved.name, applied);

    press(&mut controller, KeyCode::Esc);
    assert_eq!(controller.view_model().mode(), UiMode::Normal);
}

#[test]
fn saved_theme_should_load_on_startup() {
    let dir = TempDir::new().unwrap();
    let paths = ConfigPaths::new(dir.path());
    let nord = postboy::repl::models::builtin_themes()
        .into_iter()
        .find(|t| t.name == "Nord")
        .unwrap();
    ThemeStore::new(paths.theme_file()).save(&nord).unwrap();

    let (controller, _) = counting_controller(&dir);
    assert_eq!(controller.view_model().theme().name, "Nord");
}

#[test]
fn ctrl_tab_keys_should_cycle_tabs() {
    let dir = TempDir::new().unwrap();
    let (mut controller, _) = counting_controller(&dir);
    ctrl(&mut controller, 'l');
    assert_eq!(controller.view_model().active_tab(), Tab::Response);
    ctrl(&mut controller, 'l');
    assert_eq!(controller.view_model().active_tab(), Tab::Metrics);
    ctrl(&mut controller, 'l');
    assert_eq!(controller.view_model().active_tab(), Tab::Request);
    ctrl(&mut controller, 'h');
    assert_eq!(controller.view_model().active_tab(), Tab::Metrics);
}

#[test]
fn history_entry_should_load_into_draft() {
    let dir = TempDir::new().unwrap();
    seed_history(&dir, &["http://one", "http://two"]);
    let (mut controller, _) = counting_controller(&dir);
    assert_eq!(controller.view_model().history().len(), 2);

    // Method, Url, Headers, Body, Send, History
    for _ in 0..5 {
        press(&mut controller, KeyCode::Tab);
    }
    assert_eq!(controller.view_model().focus(), Widget::History);

    press(&mut controller, KeyCode::Down);
    press(&mut controller, KeyCode::Enter);

    let vm = controller.view_model();
    assert_eq!(vm.draft().url(), "http://one");
    assert_eq!(vm.active_tab(), Tab::Request);
}

#[test]
fn history_search_should_filter_and_keep_query() {
    let dir = TempDir::new().unwrap();
    seed_history(&dir, &["http://api/users", "http://api/orders"]);
    let (mut controller, _) = counting_controller(&dir);

    press(&mut controller, KeyCode::Char('/'));
    assert_eq!(controller.view_model().mode(), UiMode::HistorySearch);
    type_text(&mut controller, "ord");
    assert_eq!(controller.view_model().filtered_history().len(), 1);

    // q is part of the query, not quit
    press(&mut controller, KeyCode::Char('q'));
    assert!(!controller.should_quit());
    press(&mut controller, KeyCode::Backspace);

    press(&mut controller, KeyCode::Enter);
    let vm = controller.view_model();
    assert_eq!(vm.mode(), UiMode::Normal);
    assert_eq!(vm.history_list().query(), "ord");
    assert_eq!(vm.filtered_history()[0].url, "http://api/orders");
}

#[test]
fn export_should_save_file_under_exports_dir() {
    let dir = TempDir::new().unwrap();
    let (mut controller, _) = counting_controller(&dir);
    controller.apply_args(&postboy::cmd_args::CommandLineArgs::parse_from([
        "postboy",
        "http://api/x",
    ]));

    press(&mut controller, KeyCode::Char('e'));
    assert_eq!(controller.view_model().mode(), UiMode::ExportDialog);
    press(&mut controller, KeyCode::Tab);
    press(&mut controller, KeyCode::Right);
    press(&mut controller, KeyCode::Enter);
    type_text(&mut controller, "snippet");
    press(&mut controller, KeyCode::Enter);

    let saved = std::fs::read_to_string(dir.path().join("exports").join("snippet.sh")).unwrap();
    assert!(saved.starts_with("curl"));
    assert!(saved.contains("'http://api/x'"));

    // Dialog stays up to show where the file went, then closes itself
    assert_eq!(controller.view_model().mode(), UiMode::ExportDialog);
    controller.tick(std::time::Instant::now() + std::time::Duration::from_secs(5));
    assert_eq!(controller.view_model().mode(), UiMode::Normal);
}

#[test]
fn ctrl_c_should_quit_from_a_modal() {
    let dir = TempDir::new().unwrap();
    let (mut controller, _) = counting_controller(&dir);
    press(&mut controller, KeyCode::Char('t'));
    ctrl(&mut controller, 'c');
    assert!(controller.should_quit());
}

#[tokio::test]
async fn run_should_draw_and_restore_terminal() {
    let dir = TempDir::new().unwrap();
    let events = vec![
        Event::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
        Event::Resize(90, 20),
        Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
    ];
    let mut controller = AppController::with_engine(
        ConfigPaths::new(dir.path()),
        Arc::new(CountingEngine::default()),
        MockEventStream::new(events),
        MockRenderStream::new(),
    )
    .unwrap();

    controller.run().await.unwrap();

    assert!(controller.should_quit());
    assert_eq!(controller.view_model().terminal_size(), (90, 20));
    let stream = controller.render_stream();
    assert!(stream.has_command(&RenderCommand::EnterAlternateScreen));
    assert!(stream.has_command(&RenderCommand::LeaveAlternateScreen));
    assert!(!stream.is_raw_mode());
    assert!(!stream.is_alternate_screen());
    let written: String = stream
        .get_commands()
        .into_iter()
        .filter_map(|c| match c {
            RenderCommand::Write(text) => Some(text),
            _ => None,
        })
        .collect();
    assert!(written.contains("PostBoy"));
}

// End-to-end picker behaviour: keys, mouse, paste, download and open-folder
// against a fixture tree, with fake network and desktop collaborators
#![cfg(feature = "runtime")]

mod common;

use common::fixtures::TestFixture;
use common::harness::{FakeDownloader, HarnessOptions, PickerTestHarness};
use common::tracing::init_tracing_from_env;
use crossterm::event::{KeyCode, KeyModifiers};
use paraload::app::{Focus, SelectionState};
use paraload::services::clipboard::Clipboard;
use std::path::{PathBuf, MAIN_SEPARATOR};
use std::time::{Duration, Instant};

fn harness() -> PickerTestHarness {
    init_tracing_from_env();
    PickerTestHarness::new(80, 24).unwrap()
}

fn harness_with(options: HarnessOptions) -> PickerTestHarness {
    init_tracing_from_env();
    PickerTestHarness::with_options(TestFixture::standard().unwrap(), options, 80, 24).unwrap()
}

fn path_value(h: &PickerTestHarness) -> String {
    h.app().navigation().path_field().value().to_string()
}

fn status_text(h: &PickerTestHarness) -> String {
    h.app()
        .status()
        .map(|s| s.text.clone())
        .unwrap_or_default()
}

fn status_is_error(h: &PickerTestHarness) -> bool {
    h.app().status().is_some_and(|s| s.is_error)
}

#[test]
fn test_tab_cycles_focus() {
    let mut h = harness();
    assert_eq!(h.app().focus(), Focus::Tree);

    h.press(KeyCode::Tab);
    assert_eq!(h.app().focus(), Focus::List);
    h.press(KeyCode::Tab);
    assert_eq!(h.app().focus(), Focus::Path);
    assert!(h.app().navigation().path_field().is_focused());
    h.press(KeyCode::Tab);
    assert_eq!(h.app().focus(), Focus::Url);
    h.press(KeyCode::Tab);
    assert_eq!(h.app().focus(), Focus::Tree);

    h.send_key(KeyCode::BackTab, KeyModifiers::SHIFT);
    assert_eq!(h.app().focus(), Focus::Url);
}

#[test]
fn test_tree_keys_drive_list_and_path() {
    let mut h = harness();
    let docs = h.fixture.path("docs");

    h.press(KeyCode::Right);
    h.press(KeyCode::Down);

    let nav = h.app().navigation();
    assert_eq!(nav.tree().get_selected(), Some(docs.as_str()));
    assert_eq!(nav.state(), SelectionState::TreeDriven);
    assert_eq!(
        nav.list().adapter().entries(),
        &[h.fixture.path("docs/README"), h.fixture.path("docs/guide")]
    );
    assert_eq!(path_value(&h), docs);

    // Left on a collapsed child does not move the selection
    h.press(KeyCode::Left);
    assert_eq!(h.app().navigation().tree().get_selected(), Some(docs.as_str()));

    h.press(KeyCode::Up);
    assert_eq!(path_value(&h), h.fixture.root_string());
}

#[test]
fn test_list_enter_on_file_chooses_it() {
    let mut h = harness();
    h.press(KeyCode::Tab);
    h.press(KeyCode::End);
    assert_eq!(path_value(&h), h.fixture.path("notes"));
    assert_eq!(h.app().navigation().state(), SelectionState::ListDriven);

    h.press(KeyCode::Enter);
    assert_eq!(h.app().chosen(), Some(h.fixture.path("notes").as_str()));
    assert!(h.app().should_quit());
}

#[test]
fn test_list_enter_on_directory_descends() {
    let mut h = harness();
    h.press(KeyCode::Tab);
    h.press(KeyCode::Home);
    h.press(KeyCode::Enter);

    let docs = h.fixture.path("docs");
    assert_eq!(h.app().navigation().tree().get_selected(), Some(docs.as_str()));
    assert_eq!(path_value(&h), docs);
    assert!(h.app().chosen().is_none());
    assert!(!h.app().should_quit());
}

#[test]
fn test_typed_path_commit() {
    let mut h = harness();
    h.press(KeyCode::Tab);
    h.press(KeyCode::Tab);
    h.type_text(&format!("{}docs{}guide", MAIN_SEPARATOR, MAIN_SEPARATOR));
    h.press(KeyCode::Enter);

    let guide = h.fixture.path("docs/guide");
    let nav = h.app().navigation();
    assert_eq!(nav.state(), SelectionState::TextDriven);
    assert_eq!(nav.tree().get_selected(), Some(guide.as_str()));
    assert_eq!(nav.list().adapter().entries(), &[h.fixture.path("docs/guide/intro")]);
    assert!(h.app().status().is_none());
}

#[test]
fn test_unresolved_commit_reports_error() {
    let mut h = harness();
    h.press(KeyCode::Tab);
    h.press(KeyCode::Tab);
    h.type_text(&format!("{}nowhere", MAIN_SEPARATOR));
    h.press(KeyCode::Enter);

    assert!(status_is_error(&h));
    assert!(status_text(&h).starts_with("Cannot find"));
    // The tree and list keep the previous directory
    let root = h.fixture.root_string();
    assert_eq!(h.app().navigation().tree().get_selected(), Some(root.as_str()));
    assert_eq!(h.app().navigation().list().adapter().count(), 3);
}

#[test]
fn test_paste_then_download_into_selected_directory() {
    let mut h = harness();
    h.ctrl('v');
    assert_eq!(h.app().url(), "https://example.com/files/report");

    h.ctrl('d');
    assert!(h.app().is_downloading());
    h.app_mut().wait_for_download();
    assert!(!h.app().is_downloading());

    let saved = h.fixture.root.join("report");
    assert_eq!(std::fs::read(&saved).unwrap(), b"downloaded bytes");
    assert!(!status_is_error(&h));
    assert!(status_text(&h).starts_with("Saved"), "{}", status_text(&h));

    let (outcome, size) = h.app().last_download().unwrap();
    assert_eq!(outcome.file, saved);
    assert_eq!(outcome.bytes_written, 16);
    // Fixture files plus the download
    assert_eq!(size.bytes, 35 + 16);

    // The list shows the new file because its directory is selected
    let report = h.fixture.path("report");
    assert!(h.app().navigation().list().adapter().index_of(&report).is_some());
}

#[test]
fn test_second_download_is_rejected_while_running() {
    let mut h = harness();
    h.app_mut().set_url("https://example.com/a");
    h.ctrl('d');
    h.ctrl('d');
    assert!(status_is_error(&h));
    assert_eq!(status_text(&h), "A download is already running");

    h.app_mut().wait_for_download();
    assert!(h.fixture.root.join("a").exists());
}

#[test]
fn test_download_without_url_is_not_started() {
    let mut h = harness();
    h.ctrl('d');
    assert!(!h.app().is_downloading());
    assert!(status_text(&h).starts_with("Download not started"));
}

#[test]
fn test_download_into_file_path_is_not_started() {
    let mut h = harness();
    h.app_mut().set_url("https://example.com/a");
    h.press(KeyCode::Tab);
    h.press(KeyCode::End);
    h.ctrl('d');
    assert!(!h.app().is_downloading());
    assert!(status_is_error(&h));
}

#[test]
fn test_failed_download_reports_error() {
    let mut h = harness_with(HarnessOptions {
        downloader: FakeDownloader::failing(),
        ..HarnessOptions::default()
    });
    h.app_mut().set_url("https://example.com/a");
    h.press(KeyCode::Tab);
    h.press(KeyCode::Tab);
    h.press(KeyCode::Tab);
    h.press(KeyCode::Enter);
    h.app_mut().wait_for_download();

    assert!(status_is_error(&h));
    assert!(status_text(&h).contains("503"));
    assert!(h.app().last_download().is_none());
}

#[test]
fn test_process_async_messages_picks_up_result() {
    let mut h = harness();
    h.app_mut().set_url("https://example.com/b");
    h.ctrl('d');

    let deadline = Instant::now() + Duration::from_secs(5);
    while !h.app_mut().process_async_messages() {
        assert!(Instant::now() < deadline, "download never reported");
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(h.app().last_download().is_some());
}

#[test]
fn test_empty_clipboard_reports_error() {
    let mut h = harness_with(HarnessOptions {
        clipboard: Clipboard::with_fixed_text("   "),
        ..HarnessOptions::default()
    });
    h.ctrl('v');
    assert!(status_is_error(&h));
    assert!(status_text(&h).starts_with("Paste failed"));
    assert_eq!(h.app().url(), "");
}

#[test]
fn test_bracketed_paste_goes_to_focused_field() {
    let mut h = harness();
    h.app_mut().paste_text(" https://example.com/x \n");
    assert_eq!(h.app().url(), "https://example.com/x");

    h.press(KeyCode::Tab);
    h.press(KeyCode::Tab);
    h.app_mut().paste_text(&format!("{}docs", MAIN_SEPARATOR));
    assert_eq!(path_value(&h), h.fixture.path("docs"));
}

#[test]
fn test_open_folder_uses_parent_of_file() {
    let mut h = harness();
    h.press(KeyCode::Tab);
    h.press(KeyCode::End);
    h.ctrl('o');

    let opened = h.opener.opened.lock().unwrap().clone();
    assert_eq!(opened, vec![h.fixture.root.clone()]);
    assert!(!status_is_error(&h));
}

#[test]
fn test_open_folder_failure_is_reported() {
    let mut h = harness_with(HarnessOptions {
        opener_fails: true,
        ..HarnessOptions::default()
    });
    h.ctrl('o');
    assert!(status_is_error(&h));
    assert!(status_text(&h).contains("no file manager"));
}

#[test]
fn test_click_and_double_click_in_tree() {
    let mut h = harness();
    h.press(KeyCode::Right);
    h.render().unwrap();

    let row = h.find_row("▶ docs").unwrap();
    let t0 = Instant::now();
    assert!(h.click_at(3, row, t0));
    assert_eq!(path_value(&h), h.fixture.path("docs"));
    assert!(!h.app().navigation().tree().is_expanded(&h.fixture.path("docs")));

    h.click_at(3, row, t0 + Duration::from_millis(100));
    assert!(h.app().navigation().tree().is_expanded(&h.fixture.path("docs")));

    h.render().unwrap();
    h.assert_screen_contains("▼ docs");
    h.assert_screen_contains("▶ guide");
}

#[test]
fn test_slow_second_click_is_not_a_double_click() {
    let mut h = harness();
    h.press(KeyCode::Right);
    h.render().unwrap();

    let row = h.find_row("▶ docs").unwrap();
    let t0 = Instant::now();
    h.click_at(3, row, t0);
    h.click_at(3, row, t0 + Duration::from_secs(2));
    assert!(!h.app().navigation().tree().is_expanded(&h.fixture.path("docs")));
}

#[test]
fn test_double_click_file_in_list_chooses_it() {
    let mut h = harness();
    h.render().unwrap();

    let row = h.find_row("notes").unwrap();
    let t0 = Instant::now();
    h.click_at(40, row, t0);
    assert_eq!(h.app().focus(), Focus::List);
    assert_eq!(path_value(&h), h.fixture.path("notes"));

    h.click_at(40, row, t0 + Duration::from_millis(50));
    assert_eq!(h.app().chosen(), Some(h.fixture.path("notes").as_str()));
}

#[test]
fn test_click_on_fields_moves_focus() {
    let mut h = harness();
    h.render().unwrap();

    assert!(h.click_at(10, 22, Instant::now()));
    assert_eq!(h.app().focus(), Focus::Url);
    assert!(h.click_at(10, 21, Instant::now()));
    assert_eq!(h.app().focus(), Focus::Path);
    // Status bar is not clickable
    assert!(!h.click_at(10, 23, Instant::now()));
}

#[test]
fn test_click_inside_field_places_cursor() {
    let mut h = harness();
    h.app_mut().set_url("https://example.com/x");
    h.render().unwrap();

    // "URL : [" puts the first character of the value at column 7
    assert!(h.click_at(15, 22, Instant::now()));
    assert_eq!(h.app().focus(), Focus::Url);
    h.type_text("Z");
    assert_eq!(h.app().url(), "https://Zexample.com/x");
}

#[test]
fn test_wheel_scrolls_long_list() {
    let fixture = TestFixture::new().unwrap();
    for i in 0..40 {
        fixture.file(&format!("file{:02}", i), "x").unwrap();
    }
    let mut h = PickerTestHarness::with_options(fixture, HarnessOptions::default(), 80, 24).unwrap();
    h.render().unwrap();
    h.assert_screen_contains("file00");

    assert!(h.scroll_at(40, 5, true));
    assert_eq!(h.app().navigation().list().get_scroll_offset(), 3);
    h.render().unwrap();
    h.assert_screen_not_contains("file00");
    h.assert_screen_contains("file03");

    h.scroll_at(40, 5, false);
    assert_eq!(h.app().navigation().list().get_scroll_offset(), 0);
}

#[test]
fn test_escape_quits_without_choice() {
    let mut h = harness();
    h.press(KeyCode::Esc);
    assert!(h.app().should_quit());
    assert!(h.app().chosen().is_none());
}

#[test]
fn test_start_dir_outside_roots_reports_error() {
    let mut h = harness();
    let elsewhere = PathBuf::from(format!("{}nonexistent-root", MAIN_SEPARATOR));
    h.app_mut().start_at(&elsewhere);
    assert!(status_is_error(&h));
}

// Behavioral tests for the central App: copy acknowledgment timing, save
// banners, and the saved-prompt browser. The clock is injected as plain
// `Instant` values, so deadlines are exercised without sleeping.

use std::time::{Duration, Instant};

use anyhow::anyhow;
use crossterm::event::KeyCode;

use crate::client::{ApiError, MockPromptApi};
use crate::clipboard::MockClipboardSink;
use crate::models::{PromptPreview, SaveResponse};

use super::app::{App, BannerKind};
use super::forms::PromptForm;

fn success_response() -> SaveResponse {
    SaveResponse {
        success: true,
        id: Some(1),
        formatted_prompt: None,
        error: None,
    }
}

fn app_with(client: MockPromptApi, clipboard: MockClipboardSink) -> App {
    App::new(Box::new(client), Box::new(clipboard)).expect("app should initialize")
}

fn type_text(app: &mut App, text: &str, now: Instant) {
    for ch in text.chars() {
        app.handle_key(KeyCode::Char(ch), now).unwrap();
    }
}

#[test]
fn preview_is_initialized_and_tracks_typing() {
    let mut app = app_with(MockPromptApi::new(), MockClipboardSink::new());
    assert!(app.preview_text().contains("\"weirdness\": 50"));

    let now = Instant::now();
    type_text(&mut app, "Song", now);
    assert!(app.preview_text().contains("\"title\": \"Song\""));
    // Always valid JSON, recomputed from scratch.
    serde_json::from_str::<serde_json::Value>(app.preview_text()).unwrap();
}

#[test]
fn copy_writes_preview_text_and_reverts_label_after_deadline() {
    let expected = PromptForm::default().preview_json().unwrap();

    let mut clipboard = MockClipboardSink::new();
    clipboard
        .expect_write_text()
        .withf(move |text| text == expected)
        .times(1)
        .returning(|_| Ok(()));

    let mut app = app_with(MockPromptApi::new(), clipboard);
    let t0 = Instant::now();

    assert_eq!(app.copy_label(), "Copy JSON");
    app.handle_copy(t0).unwrap();
    assert_eq!(app.copy_label(), "Copied!");

    app.tick(t0 + Duration::from_millis(1999));
    assert_eq!(app.copy_label(), "Copied!");

    app.tick(t0 + Duration::from_millis(2000));
    assert_eq!(app.copy_label(), "Copy JSON");
}

#[test]
fn retriggered_copy_restarts_the_deadline() {
    let mut clipboard = MockClipboardSink::new();
    clipboard
        .expect_write_text()
        .times(2)
        .returning(|_| Ok(()));

    let mut app = app_with(MockPromptApi::new(), clipboard);
    let t0 = Instant::now();

    app.handle_copy(t0).unwrap();
    app.handle_copy(t0 + Duration::from_millis(1500)).unwrap();

    // The first deadline has passed, the second has not; last timer wins.
    app.tick(t0 + Duration::from_millis(2500));
    assert_eq!(app.copy_label(), "Copied!");
    app.tick(t0 + Duration::from_millis(3501));
    assert_eq!(app.copy_label(), "Copy JSON");
}

#[test]
fn failed_copy_shows_no_acknowledgment() {
    let mut clipboard = MockClipboardSink::new();
    clipboard
        .expect_write_text()
        .times(1)
        .returning(|_| Err(anyhow!("clipboard denied")));

    let mut app = app_with(MockPromptApi::new(), clipboard);
    app.handle_copy(Instant::now()).unwrap();
    assert_eq!(app.copy_label(), "Copy JSON");
}

#[test]
fn successful_save_clears_form_and_shows_timed_banner() {
    let mut client = MockPromptApi::new();
    client
        .expect_save_prompt()
        .withf(|payload| payload.title == "Song" && payload.styles == "disco, rap")
        .times(1)
        .returning(|_| Ok(success_response()));

    let mut app = app_with(client, MockClipboardSink::new());
    let t0 = Instant::now();
    type_text(&mut app, "Song", t0);
    app.handle_key(KeyCode::Tab, t0).unwrap(); // lyrics
    app.handle_key(KeyCode::Tab, t0).unwrap(); // subject
    app.handle_key(KeyCode::Tab, t0).unwrap(); // styles
    type_text(&mut app, "disco, rap", t0);

    app.handle_save(t0).unwrap();

    assert!(app.form().title.is_empty());
    assert!(app.form().styles.is_empty());
    assert!(app.preview_text().contains("\"title\": \"\""));
    assert_eq!(app.banner_text(), Some("Prompt saved successfully!"));
    assert!(matches!(app.banner_kind(), Some(BannerKind::Success)));

    app.tick(t0 + Duration::from_millis(2999));
    assert!(app.banner_text().is_some());
    app.tick(t0 + Duration::from_millis(3000));
    assert!(app.banner_text().is_none());
}

#[test]
fn failed_save_keeps_form_and_shows_error_banner_longer() {
    let mut client = MockPromptApi::new();
    client
        .expect_save_prompt()
        .times(1)
        .returning(|_| Err(ApiError::Application("X".to_string())));

    let mut app = app_with(client, MockClipboardSink::new());
    let t0 = Instant::now();
    type_text(&mut app, "Song", t0);

    app.handle_save(t0).unwrap();

    assert_eq!(app.form().title, "Song");
    let banner = app.banner_text().expect("error banner should be present");
    assert!(banner.contains("X"));
    assert!(matches!(app.banner_kind(), Some(BannerKind::Error)));

    app.tick(t0 + Duration::from_millis(4999));
    assert!(app.banner_text().is_some());
    app.tick(t0 + Duration::from_millis(5000));
    assert!(app.banner_text().is_none());
}

#[test]
fn transport_failure_reads_like_any_other_save_error() {
    let mut client = MockPromptApi::new();
    client
        .expect_save_prompt()
        .times(1)
        .returning(|_| Err(ApiError::Transport("connection refused".to_string())));

    let mut app = app_with(client, MockClipboardSink::new());
    app.handle_save(Instant::now()).unwrap();

    let banner = app.banner_text().unwrap();
    assert!(banner.starts_with("Error saving prompt:"));
    assert!(banner.contains("connection refused"));
}

#[test]
fn browser_loads_a_saved_prompt_back_into_the_form() {
    let saved = PromptPreview {
        title: "Saved".to_string(),
        lyrics: "words".to_string(),
        styles: vec!["disco".to_string(), "rap".to_string()],
        excluded_styles: vec![],
        weirdness: 70,
        style_influence: 30,
        instrumental: true,
    };
    let listing = vec![saved.clone()];

    let mut client = MockPromptApi::new();
    client
        .expect_fetch_prompts()
        .times(1)
        .returning(move || Ok(listing.clone()));

    let mut app = app_with(client, MockClipboardSink::new());
    let t0 = Instant::now();

    app.open_prompts(t0).unwrap();
    app.handle_key(KeyCode::Enter, t0).unwrap();

    assert_eq!(app.form().title, "Saved");
    assert_eq!(app.form().styles, "disco, rap");
    assert!(app.form().instrumental);
    assert!(app.preview_text().contains("\"weirdness\": 70"));
}

#[test]
fn failed_prompt_fetch_leaves_the_form_usable() {
    let mut client = MockPromptApi::new();
    client
        .expect_fetch_prompts()
        .times(1)
        .returning(|| Err(ApiError::Transport("connection refused".to_string())));

    let mut app = app_with(client, MockClipboardSink::new());
    let t0 = Instant::now();
    app.open_prompts(t0).unwrap();

    assert!(app.banner_text().unwrap().starts_with("Error loading prompts:"));
    // Still on the form: typing keeps working.
    type_text(&mut app, "a", t0);
    assert!(app.preview_text().contains("\"title\": \"a\""));
}

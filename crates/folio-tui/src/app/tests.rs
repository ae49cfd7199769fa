use std::sync::Arc;
use std::time::Duration;

use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use folio_core::contact::mock::{MockResponse, MockTransport};
use folio_core::contact::{MSG_EMPTY_FIELDS, MSG_SENT};
use folio_core::{ContactTransport, SubmissionStatus, TransportResponse};

use super::*;
use crate::action::Action;
use crate::tui_event::BackendEvent;

fn config() -> Config {
    Config {
        secret: Some("s3cret".into()),
        ..Config::default()
    }
}

/// Create a minimal App for testing (no backend), 80x24 with one footer row.
fn test_app(t0: Instant) -> App {
    App::new(&config(), Theme::slate(), 80, 24, t0)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn fill_form(app: &mut App) {
    let form = app.surface.form_mut();
    form.name = "Ada".into();
    form.email = "ada@example.com".into();
    form.message = "Hello".into();
}

fn with_backend(app: &mut App) -> mpsc::UnboundedReceiver<BackendCommand> {
    let (tx, rx) = mpsc::unbounded_channel();
    app.backend_cmd_tx = Some(tx);
    rx
}

/// Tick until any smooth scroll settles.
fn settle(app: &mut App, now: Instant) {
    for _ in 0..200 {
        if app.viewport.scroll_target.is_none() {
            break;
        }
        app.update_at(Action::Tick, now);
    }
}

// ── Initial state ───────────────────────────────────────────────

#[test]
fn starts_at_top_with_nothing_shown() {
    let app = test_app(Instant::now());
    assert_eq!(app.viewport.height, 23);
    assert_eq!(app.viewport.offset, 0);
    assert!(app.viewport.document_height > app.viewport.height);
    assert!(!app.surface.idle_visible());
    assert!(!app.surface.at_bottom());
    assert_eq!(app.surface.submission(), &SubmissionStatus::Idle);
    assert_eq!(app.input_mode, InputMode::Browse);
}

// ── Idle affordance ─────────────────────────────────────────────

#[test]
fn affordance_appears_after_idle_timeout() {
    let t0 = Instant::now();
    let mut app = test_app(t0);

    app.update_at(Action::Tick, t0 + ms(4999));
    assert!(!app.surface.idle_visible());

    app.update_at(Action::Tick, t0 + ms(5000));
    assert!(app.surface.idle_visible());
}

#[test]
fn pointer_motion_postpones_affordance() {
    let t0 = Instant::now();
    let mut app = test_app(t0);

    app.update_at(Action::PointerMoved, t0 + ms(3000));
    app.update_at(Action::Tick, t0 + ms(5000));
    assert!(!app.surface.idle_visible());

    app.update_at(Action::Tick, t0 + ms(8000));
    assert!(app.surface.idle_visible());
}

#[test]
fn resize_is_not_activity() {
    let t0 = Instant::now();
    let mut app = test_app(t0);

    app.update_at(Action::Resize(100, 30), t0 + ms(4000));
    app.update_at(Action::Tick, t0 + ms(5000));
    assert!(app.surface.idle_visible());
}

#[test]
fn activation_mid_page_scrolls_one_viewport_down() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::Tick, t0 + ms(5000));
    assert!(app.surface.idle_visible());

    let expected = 23.min(app.viewport.max_offset());
    app.update_at(Action::ActivateAffordance, t0 + ms(5100));
    assert!(!app.surface.idle_visible());
    assert_eq!(app.viewport.scroll_target, Some(expected));

    settle(&mut app, t0 + ms(5200));
    assert_eq!(app.viewport.offset, expected);
}

#[test]
fn activation_at_bottom_returns_to_top() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::GoBottom, t0);
    assert!(app.surface.at_bottom());

    app.update_at(Action::Tick, t0 + ms(5000));
    assert!(app.surface.idle_visible());
    assert_eq!(app.surface.glyph(), folio_core::Glyph::GoToTop);

    app.update_at(Action::ActivateAffordance, t0 + ms(5100));
    assert!(!app.surface.idle_visible());
    assert_eq!(app.viewport.scroll_target, Some(0));

    settle(&mut app, t0 + ms(5200));
    assert_eq!(app.viewport.offset, 0);
    assert!(!app.surface.at_bottom());
}

#[test]
fn hidden_affordance_does_nothing() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::ActivateAffordance, t0 + ms(100));
    assert_eq!(app.viewport.scroll_target, None);
    assert_eq!(app.viewport.offset, 0);
}

#[test]
fn affordance_reappears_after_dismissal() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::Tick, t0 + ms(5000));
    app.update_at(Action::ActivateAffordance, t0 + ms(6000));
    settle(&mut app, t0 + ms(6000));
    assert!(!app.surface.idle_visible());

    app.update_at(Action::Tick, t0 + ms(10_999));
    assert!(!app.surface.idle_visible());
    app.update_at(Action::Tick, t0 + ms(11_000));
    assert!(app.surface.idle_visible());
}

#[test]
fn clicking_the_affordance_activates_it() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::Tick, t0 + ms(5000));
    app.last_affordance_area = Some(Rect::new(71, 18, 5, 3));

    app.update_at(Action::ClickAt(73, 19), t0 + ms(5050));
    assert!(!app.surface.idle_visible());
    assert!(app.viewport.scroll_target.is_some());
}

// ── Scrolling ───────────────────────────────────────────────────

#[test]
fn scrolling_updates_bottom_flag() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::GoBottom, t0);
    assert_eq!(app.viewport.offset, app.viewport.max_offset());
    assert!(app.surface.at_bottom());

    for _ in 0..10 {
        app.update_at(Action::ScrollUp, t0);
    }
    assert!(!app.surface.at_bottom());

    app.update_at(Action::GoTop, t0);
    assert_eq!(app.viewport.offset, 0);
    app.update_at(Action::ScrollUp, t0);
    assert_eq!(app.viewport.offset, 0);
}

#[test]
fn resize_clamps_offset() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::GoBottom, t0);

    app.update_at(Action::Resize(80, 400), t0);
    assert_eq!(app.viewport.height, 399);
    assert_eq!(app.viewport.offset, app.viewport.max_offset());
}

#[test]
fn narrowing_rechecks_bottom_flag() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::GoBottom, t0);
    assert!(app.surface.at_bottom());

    // Rewrapping at half width makes the page taller; the offset stays put.
    app.update_at(Action::Resize(40, 24), t0);
    assert!(app.viewport.offset < app.viewport.max_offset());
    assert_eq!(
        app.surface.at_bottom(),
        folio_core::is_at_bottom(app.viewport.metrics(), folio_core::DEFAULT_SCROLL_TOLERANCE)
    );
    assert!(!app.surface.at_bottom());
    assert_eq!(app.surface.glyph(), folio_core::Glyph::ScrollDown);
}

#[test]
fn widening_near_bottom_sets_bottom_flag() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::Resize(40, 24), t0);
    app.update_at(Action::GoBottom, t0);
    for _ in 0..10 {
        app.update_at(Action::ScrollUp, t0);
    }
    assert!(!app.surface.at_bottom());

    app.update_at(Action::Resize(200, 24), t0);
    assert_eq!(
        app.surface.at_bottom(),
        folio_core::is_at_bottom(app.viewport.metrics(), folio_core::DEFAULT_SCROLL_TOLERANCE)
    );
}

#[test]
fn resize_recheck_keeps_idle_schedule() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::GoBottom, t0);

    app.update_at(Action::Resize(40, 24), t0 + ms(4000));
    app.update_at(Action::Tick, t0 + ms(5000));
    assert!(app.surface.idle_visible());
    assert_eq!(app.surface.glyph(), folio_core::Glyph::ScrollDown);
}

// ── Contact form ────────────────────────────────────────────────

#[test]
fn focus_form_scrolls_to_contact_block() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::FocusForm, t0);
    assert_eq!(app.input_mode, InputMode::Form);
    assert_eq!(app.focus, FormField::Name);
    assert_eq!(app.viewport.scroll_target, Some(app.viewport.max_offset()));

    settle(&mut app, t0);
    assert!(app.surface.at_bottom());
}

#[test]
fn typing_edits_focused_field() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::FocusForm, t0);
    for ch in "Adaa".chars() {
        app.update_at(Action::TextInput(ch), t0);
    }
    app.update_at(Action::Backspace, t0);
    app.update_at(Action::NextField, t0);
    app.update_at(Action::TextInput('x'), t0);

    assert_eq!(app.surface.form().name, "Ada");
    assert_eq!(app.surface.form().email, "x");

    app.update_at(Action::PrevField, t0);
    assert_eq!(app.focus, FormField::Name);
}

#[test]
fn clicking_a_field_focuses_it() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.last_field_areas = vec![
        (FormField::Name, Rect::new(0, 10, 80, 1)),
        (FormField::Email, Rect::new(0, 11, 80, 1)),
    ];

    app.update_at(Action::ClickAt(4, 11), t0);
    assert_eq!(app.input_mode, InputMode::Form);
    assert_eq!(app.focus, FormField::Email);

    app.update_at(Action::ClickAt(4, 2), t0);
    assert_eq!(app.input_mode, InputMode::Browse);
}

#[test]
fn empty_fields_are_rejected_without_dispatch() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    let mut rx = with_backend(&mut app);

    app.update_at(Action::FocusForm, t0);
    app.update_at(Action::TextInput(' '), t0);
    app.update_at(Action::Submit, t0);

    assert_eq!(
        app.surface.submission(),
        &SubmissionStatus::Error(MSG_EMPTY_FIELDS.into())
    );
    assert!(rx.try_recv().is_err());
}

#[test]
fn honeypot_drops_silently() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    let mut rx = with_backend(&mut app);
    fill_form(&mut app);
    app.surface.form_mut().website = "http://spam.example".into();

    app.update_at(Action::Submit, t0);
    assert_eq!(app.surface.submission(), &SubmissionStatus::Idle);
    assert!(rx.try_recv().is_err());
}

#[test]
fn repeated_submit_sends_one_request() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    let mut rx = with_backend(&mut app);
    fill_form(&mut app);

    app.update_at(Action::FocusForm, t0);
    app.focus = FormField::Message;
    app.update_at(Action::Submit, t0);
    app.update_at(Action::Confirm, t0);
    app.update_at(Action::Submit, t0);

    assert!(app.surface.submission().is_submitting());
    match rx.try_recv() {
        Ok(BackendCommand::Submit { endpoint, payload }) => {
            assert_eq!(endpoint, folio_core::DEFAULT_ENDPOINT);
            assert_eq!(payload.name, "Ada");
            assert_eq!(payload.secret, "s3cret");
        }
        Err(e) => panic!("expected a submit command, got {e:?}"),
    }
    assert!(rx.try_recv().is_err());
}

#[test]
fn confirm_advances_before_submitting() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    let mut rx = with_backend(&mut app);
    fill_form(&mut app);
    app.update_at(Action::FocusForm, t0);

    app.update_at(Action::Confirm, t0);
    app.update_at(Action::Confirm, t0);
    assert_eq!(app.focus, FormField::Message);
    assert!(rx.try_recv().is_err());

    app.update_at(Action::Confirm, t0);
    assert!(rx.try_recv().is_ok());
}

#[test]
fn opaque_outcome_clears_form() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    let _rx = with_backend(&mut app);
    fill_form(&mut app);
    app.update_at(Action::Submit, t0);

    app.handle_backend_event(BackendEvent::SubmissionFinished(Ok(TransportResponse::Opaque)));
    assert_eq!(
        app.surface.submission(),
        &SubmissionStatus::Success(MSG_SENT.into())
    );
    assert_eq!(app.surface.form(), &ContactForm::default());
}

#[test]
fn missing_backend_reports_error() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    fill_form(&mut app);

    app.update_at(Action::Submit, t0);
    match app.surface.submission() {
        SubmissionStatus::Error(msg) => assert!(msg.contains("not running")),
        other => panic!("expected error, got {other:?}"),
    }
    assert_eq!(app.surface.form().name, "Ada");
}

#[test]
fn missing_secret_is_reported() {
    let t0 = Instant::now();
    let mut app = App::new(&Config::default(), Theme::slate(), 80, 24, t0);
    let mut rx = with_backend(&mut app);
    fill_form(&mut app);

    app.update_at(Action::Submit, t0);
    assert!(matches!(app.surface.submission(), SubmissionStatus::Error(_)));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn backend_round_trip_sends_once() {
    let mock = Arc::new(MockTransport::new(MockResponse::Opaque).with_delay(ms(50)));
    let transport: Arc<dyn ContactTransport> = mock.clone();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let listener = tokio::spawn(crate::backend::run(
        transport,
        cmd_rx,
        event_tx,
        cancel.clone(),
    ));

    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.backend_cmd_tx = Some(cmd_tx);
    fill_form(&mut app);

    app.update_at(Action::Submit, t0);
    app.update_at(Action::Submit, t0);

    let event = event_rx.recv().await.expect("backend event");
    app.handle_backend_event(event);

    assert_eq!(mock.call_count(), 1);
    assert_eq!(
        app.surface.submission(),
        &SubmissionStatus::Success(MSG_SENT.into())
    );

    cancel.cancel();
    listener.await.unwrap();
}

#[tokio::test]
async fn backend_failure_keeps_form() {
    let mock = Arc::new(MockTransport::new(MockResponse::Readable {
        status: 200,
        body: r#"{"status":"error","message":"Invalid secret"}"#.into(),
    }));
    let transport: Arc<dyn ContactTransport> = mock.clone();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    tokio::spawn(crate::backend::run(transport, cmd_rx, event_tx, cancel.clone()));

    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.backend_cmd_tx = Some(cmd_tx);
    fill_form(&mut app);
    app.update_at(Action::Submit, t0);

    let event = event_rx.recv().await.expect("backend event");
    app.handle_backend_event(event);

    assert_eq!(
        app.surface.submission(),
        &SubmissionStatus::Error("Invalid secret".into())
    );
    assert_eq!(app.surface.form().email, "ada@example.com");
    cancel.cancel();
}

// ── Modals and teardown ─────────────────────────────────────────

#[test]
fn quit_requires_confirmation() {
    let t0 = Instant::now();
    let mut app = test_app(t0);

    assert!(!app.update_at(Action::Quit, t0));
    assert!(app.confirm_quit);

    app.update_at(Action::NavigateBack, t0);
    assert!(!app.confirm_quit);

    app.update_at(Action::Quit, t0);
    assert!(app.update_at(Action::Quit, t0));
    assert!(app.should_quit);
}

#[test]
fn help_swallows_navigation() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.update_at(Action::ToggleHelp, t0);
    assert!(app.show_help);

    app.update_at(Action::ScrollDown, t0);
    assert_eq!(app.viewport.offset, 0);

    app.update_at(Action::NavigateBack, t0);
    assert!(!app.show_help);
}

#[test]
fn teardown_stops_idle_timer() {
    let t0 = Instant::now();
    let mut app = test_app(t0);
    app.teardown();
    app.update_at(Action::Tick, t0 + ms(60_000));
    assert!(!app.surface.idle_visible());
}

//! Integration tests for the admin dashboard workflows.
//!
//! These tests drive the application the way an operator would: key
//! events go through the public shell and view APIs, and assertions
//! check the visible outcome (collections, navigation, toasts, files
//! on disk) rather than internals.
//!
//! # Test Categories
//!
//! - **Role-Based Navigation**: Section gating and cycling per session role
//! - **Recruitment Workflows**: Reviewing, shortlisting, and pruning
//!   applications; creating and retiring job postings
//! - **Inbox Replies**: The full composer-to-transport round trip
//! - **Preference Persistence**: Dark mode surviving a restart
//! - **Dashboard Aggregation**: Stats tracking live collection state
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test admin_workflows
//! ```
//!
//! # Test Isolation
//!
//! Every test that touches disk uses its own temporary data directory,
//! so preference writes never leak between tests or into a real config.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;
use tokio::sync::mpsc;

use opsdesk::config::AppConfig;
use opsdesk::core::model::{ApplicationStatus, JobStatus, MessageStatus};
use opsdesk::tui::app::AppState;
use opsdesk::tui::events::{Action, AppEvent, Section};
use opsdesk::tui::services::Services;
use opsdesk::tui::views::applications::ApplicationsViewState;
use opsdesk::tui::views::dashboard::DashboardStats;
use opsdesk::tui::views::inbox::InboxViewState;
use opsdesk::tui::views::jobs::JobsViewState;

fn test_config(role: &str, dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.session.role = role.into();
    config.data.data_dir = Some(dir.path().to_path_buf());
    config
}

/// A full application shell over a throwaway data directory.
fn build_app(role: &str) -> (AppState, TempDir) {
    let dir = TempDir::new().expect("temp data dir");
    let config = test_config(role, &dir);
    let (tx, rx) = mpsc::unbounded_channel();
    let services = Services::new(&config, tx);
    (AppState::new(&config, services, rx), dir)
}

/// Services plus the receiving end of the event channel, for driving a
/// single view and observing its toasts.
fn build_services() -> (Services, mpsc::UnboundedReceiver<AppEvent>, TempDir) {
    let dir = TempDir::new().expect("temp data dir");
    let config = test_config("admin", &dir);
    let (tx, rx) = mpsc::unbounded_channel();
    (Services::new(&config, tx), rx, dir)
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn shift(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT))
}

fn ctrl_enter() -> Event {
    Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL))
}

fn app_key(code: KeyCode) -> AppEvent {
    AppEvent::Input(key(code))
}

/// Drain every queued toast message off the event channel.
fn toast_messages(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<String> {
    let mut messages = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let AppEvent::Toast(toast) = event {
            messages.push(toast.message);
        }
    }
    messages
}

// ============================================================================
// Role-Based Navigation
// ============================================================================

/// An admin tab-cycles through every section and wraps back around.
#[test]
fn test_admin_tab_cycle_visits_every_section() {
    let (mut app, _dir) = build_app("admin");
    assert_eq!(app.section, Section::Dashboard);

    let mut visited = vec![app.section];
    for _ in 1..Section::ALL.len() {
        app.handle_event(app_key(KeyCode::Tab));
        visited.push(app.section);
    }
    assert_eq!(visited, Section::ALL.to_vec());

    app.handle_event(app_key(KeyCode::Tab));
    assert_eq!(app.section, Section::Dashboard, "cycle must wrap");
}

/// The hr role only sees recruitment-adjacent sections, and a focus
/// request for anything else is dropped.
#[test]
fn test_hr_role_navigation_is_gated() {
    let (mut app, _dir) = build_app("hr");
    assert_eq!(
        app.sidebar.allowed(),
        &[
            Section::Dashboard,
            Section::Jobs,
            Section::Applications,
            Section::Documents,
            Section::Tasks,
        ]
    );

    app.handle_event(AppEvent::Action(Action::Focus(Section::Pages)));
    assert_eq!(app.section, Section::Dashboard, "pages must stay gated");

    // Digits index into the permitted list, not the full section list.
    app.handle_event(app_key(KeyCode::Char('4')));
    assert_eq!(app.section, Section::Documents);
}

/// The editor role covers content but never recruitment.
#[test]
fn test_editor_cannot_reach_recruitment() {
    let (mut app, _dir) = build_app("editor");
    assert!(app.sidebar.allowed().contains(&Section::Pages));
    assert!(!app.sidebar.allowed().contains(&Section::Jobs));

    app.handle_event(AppEvent::Action(Action::Focus(Section::Applications)));
    assert_eq!(app.section, Section::Dashboard);
}

/// A role with a typo maps to zero permissions, not to admin.
#[test]
fn test_unknown_role_has_no_sections() {
    let (mut app, _dir) = build_app("administrator");
    assert!(app.sidebar.allowed().is_empty());

    // Navigation is inert but must not panic.
    app.handle_event(app_key(KeyCode::Tab));
    app.handle_event(app_key(KeyCode::Char('1')));
    assert_eq!(app.section, Section::Dashboard);
    assert!(app.running);
}

// ============================================================================
// Recruitment Workflows
// ============================================================================

/// Review, shortlist, then hire the first candidate, watching each
/// stage land in the collection and the toast stream.
#[test]
fn test_review_shortlist_hire_pipeline() {
    let (services, mut rx, _dir) = build_services();
    let mut view = ApplicationsViewState::new(10);

    assert_eq!(view.records()[0].status, ApplicationStatus::New);
    let name = view.records()[0].applicant.clone();

    // Opening the detail reviews a new application.
    assert!(view.handle_input(&key(KeyCode::Enter), &services));
    assert_eq!(view.records()[0].status, ApplicationStatus::Reviewed);

    assert!(view.handle_input(&key(KeyCode::Char('s')), &services));
    assert_eq!(view.records()[0].status, ApplicationStatus::Shortlisted);

    assert!(view.handle_input(&key(KeyCode::Char('h')), &services));
    assert_eq!(view.records()[0].status, ApplicationStatus::Hired);

    assert_eq!(
        toast_messages(&mut rx),
        vec![
            format!("Marked {name} as reviewed"),
            format!("Shortlisted {name}"),
            format!("Hired {name}"),
        ]
    );
}

/// Select two applications and delete them through the confirm modal.
#[test]
fn test_bulk_delete_applications() {
    let (services, mut rx, _dir) = build_services();
    let mut view = ApplicationsViewState::new(10);
    let before = view.records().len();
    let doomed: Vec<String> = view.records()[..2].iter().map(|a| a.id.clone()).collect();

    view.handle_input(&key(KeyCode::Char(' ')), &services);
    view.handle_input(&key(KeyCode::Char('j')), &services);
    view.handle_input(&key(KeyCode::Char(' ')), &services);
    view.handle_input(&shift('D'), &services);
    view.handle_input(&key(KeyCode::Char('y')), &services);

    assert_eq!(view.records().len(), before - 2);
    assert!(view.records().iter().all(|a| !doomed.contains(&a.id)));
    assert_eq!(toast_messages(&mut rx), vec!["Deleted 2 applications"]);
}

/// Select-all covers every page of the filtered set, not just the
/// visible one.
#[test]
fn test_select_all_spans_pages() {
    let (services, mut rx, _dir) = build_services();
    // Three rows per page forces the collection onto several pages.
    let mut view = ApplicationsViewState::new(3);
    let total = view.records().len();
    assert!(total > 3);

    view.handle_input(&shift('A'), &services);
    view.handle_input(&shift('D'), &services);
    view.handle_input(&key(KeyCode::Char('y')), &services);

    assert!(view.records().is_empty());
    assert_eq!(
        toast_messages(&mut rx),
        vec![format!("Deleted {total} applications")]
    );
}

/// Search narrows the grid so row shortcuts act on the matching record.
#[test]
fn test_search_then_act_on_match() {
    let (services, mut rx, _dir) = build_services();
    let mut view = JobsViewState::new(10);

    view.handle_input(&key(KeyCode::Char('/')), &services);
    for c in "intern".chars() {
        view.handle_input(&key(KeyCode::Char(c)), &services);
    }
    view.handle_input(&key(KeyCode::Enter), &services);

    // Only the internship posting matches, so the cursor is on it.
    view.handle_input(&key(KeyCode::Char('p')), &services);

    let intern = view
        .records()
        .iter()
        .find(|j| j.title == "Engineering Intern")
        .expect("seeded posting");
    assert_eq!(intern.status, JobStatus::Closed);
    assert_eq!(
        toast_messages(&mut rx),
        vec!["Engineering Intern is now Closed"]
    );
}

/// Fill the create form field by field and submit it with Ctrl+Enter.
#[test]
fn test_create_job_posting_through_form() {
    let (services, mut rx, _dir) = build_services();
    let mut view = JobsViewState::new(10);
    let before = view.records().len();

    let type_text = |view: &mut JobsViewState, text: &str, services: &Services| {
        for c in text.chars() {
            view.handle_input(&key(KeyCode::Char(c)), services);
        }
    };

    view.handle_input(&key(KeyCode::Char('a')), &services);
    type_text(&mut view, "QA Engineer", &services);
    // Title -> Department -> Location
    view.handle_input(&key(KeyCode::Tab), &services);
    view.handle_input(&key(KeyCode::Tab), &services);
    type_text(&mut view, "Remote", &services);
    // Location -> Type -> Experience
    view.handle_input(&key(KeyCode::Tab), &services);
    view.handle_input(&key(KeyCode::Tab), &services);
    type_text(&mut view, "2+ years", &services);
    view.handle_input(&key(KeyCode::Tab), &services);
    type_text(&mut view, "2024-12-01", &services);
    view.handle_input(&key(KeyCode::Tab), &services);
    type_text(&mut view, "Own release testing end to end.", &services);
    view.handle_input(&ctrl_enter(), &services);

    assert_eq!(view.records().len(), before + 1);
    let posting = &view.records()[0];
    assert_eq!(posting.title, "QA Engineer");
    assert_eq!(posting.location, "Remote");
    assert_eq!(posting.status, JobStatus::Active);
    assert_eq!(toast_messages(&mut rx), vec!["Posted QA Engineer"]);
}

/// Submitting an incomplete form keeps the modal open and adds nothing.
#[test]
fn test_create_form_rejects_missing_title() {
    let (services, mut rx, _dir) = build_services();
    let mut view = JobsViewState::new(10);
    let before = view.records().len();

    view.handle_input(&key(KeyCode::Char('a')), &services);
    view.handle_input(&ctrl_enter(), &services);

    assert_eq!(view.records().len(), before);
    assert!(toast_messages(&mut rx).is_empty());

    // The form is still open and swallowing keys.
    assert!(view.handle_input(&key(KeyCode::Char('x')), &services));
    view.handle_input(&key(KeyCode::Esc), &services);
    assert_eq!(view.records().len(), before);
}

// ============================================================================
// Inbox Replies
// ============================================================================

/// Compose a reply, let the simulated transport deliver it, and watch
/// the message flip to replied with the body recorded.
#[tokio::test(start_paused = true)]
async fn test_inbox_reply_round_trip() {
    let (services, mut rx, _dir) = build_services();
    let mut view = InboxViewState::new(10);

    let first = view.records()[0].clone();
    assert_eq!(first.status, MessageStatus::New);

    view.handle_input(&key(KeyCode::Char('r')), &services);
    for c in "Thanks, our team will follow up this week.".chars() {
        view.handle_input(&key(KeyCode::Char(c)), &services);
    }
    view.handle_input(&key(KeyCode::Enter), &services);

    // The transport runs in the background and posts its completion.
    let event = rx.recv().await.expect("reply completion");
    let AppEvent::ReplyFinished { message_id, result } = event else {
        panic!("expected reply completion, got {event:?}");
    };
    assert_eq!(message_id, first.id);
    view.on_reply_finished(&message_id, result, &services);

    let replied = &view.records()[0];
    assert_eq!(replied.status, MessageStatus::Replied);
    assert_eq!(
        replied.reply.as_deref(),
        Some("Thanks, our team will follow up this week.")
    );
    assert_eq!(
        toast_messages(&mut rx),
        vec![format!("Reply sent to {}", first.sender)]
    );
}

/// The shell routes reply completions to the inbox even when another
/// section is focused.
#[test]
fn test_reply_completion_routes_through_shell() {
    let (mut app, _dir) = build_app("admin");
    app.handle_event(AppEvent::Action(Action::Focus(Section::Jobs)));

    // No pending reply: the completion is dropped without side effects.
    app.handle_event(AppEvent::ReplyFinished {
        message_id: "msg-001".into(),
        result: Ok(()),
    });
    assert!(app
        .inbox
        .records()
        .iter()
        .all(|m| m.status != MessageStatus::Replied || m.id == "msg-003"));
}

// ============================================================================
// Preference Persistence
// ============================================================================

/// Toggling dark mode writes prefs.json immediately and a fresh app
/// instance starts with the stored palette.
#[test]
fn test_dark_mode_survives_restart() {
    let (mut app, dir) = build_app("admin");
    assert!(app.settings.dark_mode(), "dark palette is the default");

    app.handle_event(AppEvent::Action(Action::Focus(Section::Settings)));
    app.handle_event(app_key(KeyCode::Char(' ')));
    assert!(!app.settings.dark_mode());

    let raw = std::fs::read_to_string(dir.path().join("prefs.json")).expect("prefs written");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(parsed["dark_mode"], serde_json::Value::Bool(false));

    drop(app);
    let config = test_config("admin", &dir);
    let (tx, rx) = mpsc::unbounded_channel();
    let services = Services::new(&config, tx);
    let restarted = AppState::new(&config, services, rx);
    assert!(!restarted.settings.dark_mode(), "palette must persist");
}

// ============================================================================
// Dashboard Aggregation
// ============================================================================

/// Dashboard stats are derived from the live collections, so acting in
/// one screen shows up in the overview.
#[test]
fn test_dashboard_stats_track_live_collections() {
    let (mut app, _dir) = build_app("admin");

    let gather = |app: &AppState| {
        DashboardStats::gather(
            app.jobs.records(),
            app.applications.records(),
            app.pages.records(),
            app.media.records(),
            app.documents.records(),
            app.tasks.records(),
            app.inbox.records(),
        )
    };

    let before = gather(&app);
    assert_eq!(before.total_jobs, 8);
    assert_eq!(before.active_jobs, 5);
    assert_eq!(before.total_applications, 8);
    assert_eq!(before.new_applications, 3);
    assert_eq!(before.published_pages, 4);
    assert_eq!(before.unread_messages, 2);
    assert_eq!(before.open_tasks, 4);
    assert_eq!(before.overdue_tasks, 1);

    // Reviewing the first application removes it from the new count.
    app.handle_event(AppEvent::Action(Action::Focus(Section::Applications)));
    app.handle_event(app_key(KeyCode::Enter));

    let after = gather(&app);
    assert_eq!(after.new_applications, before.new_applications - 1);
    assert_eq!(after.total_applications, before.total_applications);
}

mod common;

use chrono::NaiveDate;
use common::{BASE, FakeBackend, Reply, client};
use futures::FutureExt;
use futures::executor::block_on;
use pmdash_core::error::{FailureCause, Surface};
use pmdash_core::views::{Listing, dashboard, gantt, header, ml, notes, projects, reports, tasks};
use pmdash_core::{Aborted, AppAction, AppState, ApiError, Method, Notice, Tab, TabController};
use pmdash_shared::{NoteUpdate, ProjectFilters, TaskFilters};
use serde_json::json;

fn two_tasks() -> serde_json::Value {
    json!([
        {"id": 1, "task_name": "Survey", "status": "Pending"},
        {"id": 2, "task_name": "Permit", "status": "Completed"}
    ])
}

#[test]
fn confirmed_task_delete_disappears_from_next_render() {
    let backend = FakeBackend::new()
        .on(
            Method::Get,
            "/tasks/",
            vec![
                Reply::Json(200, two_tasks()),
                Reply::Json(200, json!([{"id": 2, "task_name": "Permit", "status": "Completed"}])),
            ],
        )
        .json(Method::Delete, "/tasks/1", json!({"message": "deleted"}));
    let api = client(backend);

    let before = block_on(tasks::load(&api, &TaskFilters::default())).expect("load");
    assert_eq!(before.items()[0].title, "Pending (1)");

    let notice = block_on(tasks::delete(&api, 1, |prompt| {
        assert_eq!(prompt, tasks::DELETE_PROMPT);
        true
    }))
    .expect("delete");
    assert_eq!(notice, Some(Notice::success("Task deleted successfully")));

    let after = block_on(tasks::load(&api, &TaskFilters::default())).expect("reload");
    assert_eq!(after.items()[0].title, "Pending (0)");
    assert_eq!(after.items()[2].title, "Completed (1)");
}

#[test]
fn declined_delete_sends_nothing() {
    let api = client(FakeBackend::new().json(Method::Get, "/notes/P-1", json!([])));

    let outcome = block_on(notes::delete(&api, 7, |_| false)).expect("declined");
    assert_eq!(outcome, None);
    assert!(api.backend().sent_with(Method::Delete).is_empty());
}

#[test]
fn note_delete_failure_is_toasted() {
    let api = client(FakeBackend::new().on(
        Method::Delete,
        "/notes/7",
        vec![Reply::Json(500, json!({"detail": "db locked"}))],
    ));

    let failure = block_on(notes::delete(&api, 7, |_| true)).expect_err("server error");
    assert_eq!(failure.message, "Failed to delete note");
    assert_eq!(failure.surface, Surface::Toast);
    match failure.cause {
        FailureCause::Api(err) => {
            assert_eq!(err.status(), Some(500));
            assert_eq!(err.server_message(), Some("db locked"));
        }
        other => panic!("unexpected cause: {other:?}"),
    }
}

#[test]
fn ml_panel_needs_both_reads() {
    let api = client(
        FakeBackend::new()
            .json(
                Method::Get,
                "/ml/predict-delay/P-1",
                json!({"project_number": "P-1", "predicted_delay_days": 12, "risk_level": "Low", "confidence": 0.7}),
            )
            .on(
                Method::Get,
                "/ml/classify-risk/P-1",
                vec![Reply::Json(503, json!({"detail": "model not trained"}))],
            ),
    );

    let failure = block_on(ml::predict(&api, Some("P-1"))).expect_err("risk read failed");
    assert_eq!(failure.message, "Failed to run ML prediction");
    assert_eq!(failure.notice(), Some(Notice::error("Failed to run ML prediction")));
    assert_eq!(api.backend().sent_with(Method::Get).len(), 2);
}

#[test]
fn ml_panel_renders_when_both_succeed() {
    let api = client(
        FakeBackend::new()
            .json(
                Method::Get,
                "/ml/predict-delay/P-1",
                json!({
                    "project_number": "P-1",
                    "predicted_delay_days": 40,
                    "risk_level": "High",
                    "confidence": 0.8,
                    "factors": {"budget_variance": -0.25, "ccr_completion": 0.9}
                }),
            )
            .json(
                Method::Get,
                "/ml/classify-risk/P-1",
                json!({"project_number": "P-1", "risk_level": "High", "confidence": 0.65}),
            ),
    );

    let insights = block_on(ml::predict(&api, Some("P-1"))).expect("insights");
    assert_eq!(insights.delay.color_class, "text-orange-600");
    assert_eq!(insights.risk.label, "High");
    assert_eq!(insights.factors[0].name, "Budget Variance");
    assert_eq!(insights.factors[0].value, "-25%");
    assert_eq!(insights.recommendations.len(), 5);
}

#[test]
fn ml_panel_requires_selection() {
    let api = client(FakeBackend::new());
    let failure = block_on(ml::predict(&api, None)).expect_err("no project");
    assert_eq!(failure.message, "Please select a project");
    assert!(api.backend().sent.borrow().is_empty());
}

#[test]
fn empty_lists_show_their_messages() {
    let api = client(
        FakeBackend::new()
            .json(Method::Get, "/projects/", json!([]))
            .json(Method::Get, "/tasks/", json!([]))
            .json(Method::Get, "/notes/P-1", json!([]))
            .json(Method::Get, "/reports/history", json!([])),
    );

    let listing = block_on(projects::load(&api, &ProjectFilters::default())).expect("projects");
    assert_eq!(listing.empty_message(), Some("No projects found"));

    let board = block_on(tasks::load(&api, &TaskFilters::default())).expect("tasks");
    assert_eq!(board.empty_message(), Some("No tasks found"));

    let panel = block_on(notes::load(&api, Some("P-1"))).expect("notes");
    assert_eq!(panel, notes::NotesView::Empty);

    let history = block_on(reports::history(&api)).expect("history");
    assert_eq!(history, Listing::Empty("No reports generated yet"));
}

#[test]
fn notes_without_project_make_no_request() {
    let api = client(FakeBackend::new());
    let panel = block_on(notes::load(&api, None)).expect("placeholder");
    assert_eq!(panel, notes::NotesView::Placeholder);
    assert!(api.backend().sent.borrow().is_empty());
}

#[test]
fn note_update_goes_in_the_query() {
    let api = client(FakeBackend::new().json(
        Method::Put,
        "/notes/4?title=Site%20walk&content=a%26b&tags=x%2Cy",
        json!({"message": "updated"}),
    ));
    let edit = NoteUpdate {
        title: "Site walk".to_string(),
        content: "a&b".to_string(),
        tags: "x,y".to_string(),
    };

    let notice = block_on(notes::update(&api, 4, &edit)).expect("update");
    assert_eq!(notice, Notice::success("Note updated successfully"));
    let sent = api.backend().sent.borrow();
    assert_eq!(sent[0].body, None);
}

#[test]
fn missing_task_is_reported() {
    let api = client(FakeBackend::new().json(Method::Get, "/tasks/", two_tasks()));
    let failure = block_on(tasks::details(&api, 99)).expect_err("not there");
    assert_eq!(failure.message, "Task not found");
}

#[test]
fn dashboard_failure_is_log_only() {
    let api = client(FakeBackend::new().on(
        Method::Get,
        "/projects/",
        vec![Reply::Unreachable("connection refused".to_string())],
    ));
    let failure = block_on(dashboard::load(&api, 5)).expect_err("offline");
    assert_eq!(failure.surface, Surface::LogOnly);
    assert_eq!(failure.notice(), None);
}

#[test]
fn project_missing_name_is_a_decode_error() {
    let api = client(FakeBackend::new().json(
        Method::Get,
        "/projects/?status=ACTIVE",
        json!([{"PROJECT_NUMBER": "P-1"}]),
    ));
    let failure = block_on(projects::load(&api, &projects::status_filter("ACTIVE"))).expect_err("bad payload");
    assert!(matches!(
        failure.cause,
        FailureCause::Api(ApiError::Decode { .. })
    ));
}

#[test]
fn search_term_is_percent_encoded() {
    let api = client(FakeBackend::new().json(
        Method::Get,
        "/projects/search/north%20ring",
        json!([{"PROJECT_NUMBER": "P-9", "PROJECT_NAME": "North Ring"}]),
    ));
    let listing = block_on(projects::search(&api, "north ring")).expect("search");
    assert_eq!(listing.items()[0].name, "North Ring");
}

#[test]
fn retrain_rejection_is_toasted_verbatim() {
    let api = client(FakeBackend::new().json(
        Method::Post,
        "/ml/retrain",
        json!({"error": "Not enough completed projects"}),
    ));
    let failure = block_on(ml::retrain(&api, |_| true)).expect_err("rejected");
    assert_eq!(failure.message, "Not enough completed projects");
}

#[test]
fn report_generation_names_the_download() {
    let api = client(FakeBackend::new().on(
        Method::Post,
        "/reports/generate",
        vec![Reply::Bytes(200, b"%PDF-1.7".to_vec())],
    ));
    let (report, notice) = block_on(reports::generate(
        &api,
        "budget_variance",
        "PDF",
        Some("P-2"),
        1_700_000_000_123,
    ))
    .expect("generate");
    assert_eq!(report.file_name, "report_budget_variance_1700000000123.pdf");
    assert_eq!(report.bytes, b"%PDF-1.7".to_vec());
    assert_eq!(notice, Notice::success("Report generated successfully"));

    let sent = api.backend().sent.borrow();
    let body: serde_json::Value =
        serde_json::from_slice(sent[0].body.as_deref().expect("json body")).expect("decode body");
    assert_eq!(
        body,
        json!({
            "report_type": "budget_variance",
            "format": "PDF",
            "project_numbers": ["P-2"],
            "include_charts": true
        })
    );
}

#[test]
fn health_is_read_from_the_server_root() {
    let backend = FakeBackend::new();
    let api = client(backend);
    let _ = block_on(api.health());
    assert_eq!(
        api.backend().sent.borrow()[0].url,
        BASE.trim_end_matches("/api").to_string() + "/health"
    );
}

#[test]
fn gantt_load_toasts_success() {
    let api = client(FakeBackend::new().json(
        Method::Get,
        "/gantt/P-1",
        json!({"data": [{"id": 1, "text": "P-1", "start_date": "2024-01-01", "end_date": "2024-02-01", "progress": 0.5}], "links": []}),
    ));
    let today = NaiveDate::from_ymd_opt(2024, 1, 10).expect("date");
    let (view, notice) = block_on(gantt::load(&api, "P-1", today)).expect("gantt");
    assert_eq!(view.rows.len(), 1);
    assert!(view.today.is_some());
    assert_eq!(notice, Notice::success("Gantt chart loaded successfully"));
}

#[test]
fn response_after_tab_switch_is_dropped() {
    let backend = FakeBackend::new().json(Method::Get, "/tasks/", two_tasks());
    let release = backend.hold_next();
    let api = client(backend);

    let mut tabs = TabController::new(Tab::Tasks);
    let switch = tabs.current();
    let filters = TaskFilters::default();
    let mut pending = Box::pin(switch.scope.guard(tasks::load(&api, &filters)));
    assert!((&mut pending).now_or_never().is_none());

    tabs.activate(Tab::Notes);
    release.send(()).expect("backend waiting");

    assert_eq!(block_on(pending), Err(Aborted));
}

#[test]
fn startup_stops_when_the_backend_is_down() {
    let api = client(FakeBackend::new().on_root(
        Method::Get,
        "/health",
        vec![Reply::Unreachable("connection refused".to_string())],
    ));
    let failure = block_on(header::startup(&api)).expect_err("offline");
    assert_eq!(failure.notice(), Some(Notice::error("Failed to connect to API")));
    assert_eq!(api.backend().sent.borrow().len(), 1);
}

#[test]
fn startup_survives_a_failed_project_read() {
    let api = client(
        FakeBackend::new()
            .on_root(
                Method::Get,
                "/health",
                vec![Reply::Json(200, json!({"status": "healthy"}))],
            )
            .on(
                Method::Get,
                "/projects/",
                vec![Reply::Json(500, json!({"detail": "db down"}))],
            ),
    );
    let projects = block_on(header::startup(&api)).expect("startup continues");
    assert!(projects.is_empty());
}

fn healthy_with_projects() -> FakeBackend {
    FakeBackend::new()
        .on_root(
            Method::Get,
            "/health",
            vec![Reply::Json(200, json!({"status": "healthy"}))],
        )
        .json(
            Method::Get,
            "/projects/",
            json!([{"PROJECT_NUMBER": "P-1", "PROJECT_NAME": "Tower A"}]),
        )
}

#[test]
fn startup_survives_an_early_tab_switch() {
    let backend = healthy_with_projects();
    let release = backend.hold_next();
    let api = client(backend);
    let mut state = AppState::new();

    let mut pending = Box::pin(state.session_scope().guard(header::startup(&api)));
    assert!((&mut pending).now_or_never().is_none());

    state.apply(AppAction::SwitchTab(Tab::Gantt));
    release.send(()).expect("backend waiting");

    let projects = block_on(pending)
        .expect("session scope is never aborted")
        .expect("startup");
    state.apply(AppAction::ProjectsLoaded(projects));
    assert_eq!(state.projects().len(), 1);
    assert_eq!(state.project_options()[0].1, "P-1 - Tower A");
}

#[test]
fn failed_write_is_still_reported_after_a_tab_switch() {
    let backend = FakeBackend::new().on(
        Method::Delete,
        "/notes/4",
        vec![Reply::Json(500, json!({"detail": "db locked"}))],
    );
    let release = backend.hold_next();
    let api = client(backend);
    let mut state = AppState::new();
    state.apply(AppAction::SwitchTab(Tab::Notes));

    let mut pending = Box::pin(
        state
            .session_scope()
            .guard(notes::delete(&api, 4, |_| true)),
    );
    assert!((&mut pending).now_or_never().is_none());

    state.apply(AppAction::SwitchTab(Tab::Dashboard));
    release.send(()).expect("backend waiting");

    let failure = block_on(pending)
        .expect("write outcome kept")
        .expect_err("server error");
    assert_eq!(failure.notice(), Some(Notice::error("Failed to delete note")));
    assert_eq!(
        api.backend().sent_with(Method::Delete),
        vec![format!("{BASE}/notes/4")]
    );
}

#[test]
fn failed_header_search_stays_on_current_tab() {
    let api = client(FakeBackend::new().on(
        Method::Get,
        "/projects/search/tower",
        vec![Reply::Unreachable("connection reset".to_string())],
    ));
    let mut state = AppState::new();
    state.apply(AppAction::SwitchTab(Tab::Gantt));

    match block_on(header::search(&api, "tower")) {
        Ok((_, action)) => {
            state.apply(action);
        }
        Err(failure) => {
            assert_eq!(failure.notice(), Some(Notice::error("Search failed")));
        }
    }
    assert_eq!(state.current_tab(), Tab::Gantt);
    assert_eq!(state.project_query(), None);
}

#[test]
fn header_search_results_open_the_projects_tab() {
    let api = client(FakeBackend::new().json(
        Method::Get,
        "/projects/search/tower",
        json!([{"PROJECT_NUMBER": "P-1", "PROJECT_NAME": "Tower A"}]),
    ));
    let mut state = AppState::new();

    let (listing, action) = block_on(header::search(&api, "tower")).expect("search");
    let switch = state.apply(action).expect("switches tab");

    assert_eq!(switch.tab, Tab::Projects);
    assert_eq!(state.project_query(), Some("tower"));
    assert_eq!(listing.items()[0].number, "P-1");
}

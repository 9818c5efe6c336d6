use pmdash_shared::{
    CriticalPath, ErrorBody, GanttData, MlPrediction, ModelInfo, NoteDto, ProjectDto,
    ProjectMetrics, ReportRecord, ReportRequest, TaskCreate, TaskDto, TaskStatus,
};

#[test]
fn project_decodes_upper_case_columns() {
    let raw = r#"{
        "PROJECT_NUMBER": "P-1001",
        "PROJECT_NAME": "Fiber Expansion",
        "PROJECT_STATUS": "ACTIVE",
        "PM_NAME": "Dana",
        "BUDGET": 1234.5,
        "START_DATE": "2024-01-05T00:00:00",
        "REGION": "East"
    }"#;

    let project: ProjectDto = serde_json::from_str(raw).expect("decode project");
    assert_eq!(project.project_number, "P-1001");
    assert_eq!(project.project_status.as_deref(), Some("ACTIVE"));
    assert_eq!(project.budget, Some(1234.5));
    assert_eq!(project.end_date, None);
    assert_eq!(project.actual_cost, None);
}

#[test]
fn numeric_project_number_is_accepted() {
    let raw = r#"{"PROJECT_NUMBER": 4417, "PROJECT_NAME": "Tower"}"#;
    let project: ProjectDto = serde_json::from_str(raw).expect("decode project");
    assert_eq!(project.project_number, "4417");
}

#[test]
fn project_without_name_is_rejected() {
    let raw = r#"{"PROJECT_NUMBER": "P-1"}"#;
    let err = serde_json::from_str::<ProjectDto>(raw).expect_err("name is required");
    assert!(err.to_string().contains("PROJECT_NAME"));
}

#[test]
fn metrics_fill_missing_counters_with_zero() {
    let metrics: ProjectMetrics =
        serde_json::from_str(r#"{"total_ccrs": 4, "completed_ccrs": 1}"#).expect("decode metrics");
    assert_eq!(metrics.total_ccrs, 4);
    assert_eq!(metrics.total_orders, 0);
    assert_eq!(metrics.budget_variance, 0.0);
}

#[test]
fn task_status_maps_labels_and_keeps_unknown_values_apart() {
    let raw = r#"[
        {"id": 1, "task_name": "Survey", "status": "In Progress"},
        {"id": 2, "task_name": "Permits", "status": "Blocked"},
        {"id": 3, "task_name": "Splice", "status": null}
    ]"#;
    let tasks: Vec<TaskDto> = serde_json::from_str(raw).expect("decode tasks");
    assert_eq!(tasks[0].status, TaskStatus::InProgress);
    assert_eq!(tasks[1].status, TaskStatus::Other);
    assert_eq!(tasks[2].status, TaskStatus::Pending);
}

#[test]
fn task_create_serializes_status_label() {
    let create = TaskCreate {
        task_name: "Survey".to_string(),
        project_number: "P-1".to_string(),
        priority: "Medium".to_string(),
        due_date: None,
        assigned_to: String::new(),
        description: String::new(),
        status: TaskStatus::InProgress,
    };
    let value = serde_json::to_value(&create).expect("encode");
    assert_eq!(value["status"], "In Progress");
    assert!(value["due_date"].is_null());
}

#[test]
fn note_requires_title() {
    let err = serde_json::from_str::<NoteDto>(r#"{"id": 3, "content": "x"}"#)
        .expect_err("title is required");
    assert!(err.to_string().contains("title"));
}

#[test]
fn report_history_tolerates_null_columns() {
    let raw = r#"[{"id": 1, "report_type": null, "report_name": "Q1", "created_by": null}]"#;
    let history: Vec<ReportRecord> = serde_json::from_str(raw).expect("decode history");
    assert_eq!(history[0].report_type, "");
    assert_eq!(history[0].report_name, "Q1");
}

#[test]
fn report_request_omits_unset_date_range() {
    let request = ReportRequest {
        report_type: "project_summary".to_string(),
        format: "PDF".to_string(),
        project_numbers: None,
        start_date: None,
        end_date: None,
        include_charts: true,
    };
    let value = serde_json::to_value(&request).expect("encode");
    assert!(value.get("start_date").is_none());
    assert!(value["project_numbers"].is_null());
    assert_eq!(value["include_charts"], true);
}

#[test]
fn gantt_payload_decodes_items_and_links() {
    let raw = r#"{
        "data": [
            {"id": "project_P1", "text": "Fiber", "start_date": "2024-01-01T00:00:00",
             "end_date": "2024-03-01T00:00:00", "type": "project", "progress": 0},
            {"id": "ccr_77", "text": "CCR 77 - Build", "start_date": null, "end_date": null,
             "parent": "project_P1", "type": "task", "progress": 0.5}
        ],
        "links": [{"id": 1, "source": "ccr_77", "target": "project_P1", "type": "0"}]
    }"#;
    let gantt: GanttData = serde_json::from_str(raw).expect("decode gantt");
    assert_eq!(gantt.data.len(), 2);
    assert_eq!(gantt.data[1].parent.as_deref(), Some("project_P1"));
    assert_eq!(gantt.links[0].id.as_deref(), Some("1"));
}

#[test]
fn critical_path_accepts_numeric_item_numbers() {
    let raw = r#"{"critical_path": [{"type": "CCR", "number": 77, "duration": 12}], "total_duration": 12}"#;
    let path: CriticalPath = serde_json::from_str(raw).expect("decode critical path");
    assert_eq!(path.critical_path[0].number, "77");
    assert_eq!(path.total_duration, 12);
}

#[test]
fn prediction_keeps_factor_mapping() {
    let raw = r#"{
        "project_number": "P-1",
        "predicted_delay_days": 42,
        "risk_level": "High",
        "confidence": 0.83,
        "factors": {"budget_variance": -0.2, "ccr_completion": 0.4}
    }"#;
    let prediction: MlPrediction = serde_json::from_str(raw).expect("decode prediction");
    let factors = prediction.factors.expect("factors");
    assert_eq!(factors.get("budget_variance"), Some(&-0.2));
    assert_eq!(prediction.predicted_delay_days, Some(42));
}

#[test]
fn model_info_decodes_nested_catalog() {
    let raw = r#"{
        "training_history": [],
        "models": {
            "delay_predictor": {"type": "Neural Network", "features": ["a", "b"]},
            "risk_classifier": {"classes": ["Low", "High"]}
        }
    }"#;
    let info: ModelInfo = serde_json::from_str(raw).expect("decode model info");
    let models = info.models.expect("models");
    assert_eq!(
        models.delay_predictor.and_then(|model| model.kind).as_deref(),
        Some("Neural Network")
    );
    assert_eq!(info.training_history.map(|runs| runs.len()), Some(0));
}

#[test]
fn error_body_reads_fastapi_detail() {
    let body: ErrorBody =
        serde_json::from_str(r#"{"detail": "Project not found"}"#).expect("decode error body");
    assert_eq!(body.detail.as_deref(), Some("Project not found"));
    assert_eq!(body.error, None);
}

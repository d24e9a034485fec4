use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use crate::catalog::{CandidateId, CandidateQuery, JobQuery, StageId};
use crate::workflows::templates::{SaveOutcome, TemplateId, WorkflowTemplate};

use super::domain::{JobFilter, PipelineEvent};
use super::error::PipelineError;
use super::notify::NotificationPublisher;
use super::scoring::CandidateScorer;
use super::service::{PipelineService, PipelineServiceError};

type SharedService<N, S> = Arc<PipelineService<N, S>>;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BoardParams {
    #[serde(default)]
    job: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardParams {
    #[serde(default)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ActivityParams {
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StageRequest {
    name: String,
    #[serde(default = "default_stage_color")]
    color: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReorderRequest {
    source_index: usize,
    #[serde(default)]
    destination_index: Option<usize>,
}

fn default_stage_color() -> String {
    "bg-gray-500".to_string()
}

/// Router exposing the pipeline board, stage editor, dashboard, activity feed, candidate and
/// job search, tags and templates.
pub fn pipeline_router<N, S>(service: SharedService<N, S>) -> Router
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    Router::new()
        .route("/api/v1/pipeline", get(board_handler::<N, S>))
        .route("/api/v1/pipeline/events", post(event_handler::<N, S>))
        .route("/api/v1/pipeline/summary", get(summary_handler::<N, S>))
        .route("/api/v1/pipeline/stages", post(add_stage_handler::<N, S>))
        .route(
            "/api/v1/pipeline/stages/:stage_id",
            put(update_stage_handler::<N, S>).delete(delete_stage_handler::<N, S>),
        )
        .route("/api/v1/dashboard", get(dashboard_handler::<N, S>))
        .route("/api/v1/activities", get(activities_handler::<N, S>))
        .route("/api/v1/candidates", get(candidates_handler::<N, S>))
        .route(
            "/api/v1/candidates/:candidate_id",
            get(candidate_handler::<N, S>),
        )
        .route("/api/v1/jobs", get(jobs_handler::<N, S>))
        .route("/api/v1/tags", get(tags_handler::<N, S>))
        .route("/api/v1/templates", get(templates_handler::<N, S>))
        .route(
            "/api/v1/templates/:template_id",
            put(save_template_handler::<N, S>).delete(delete_template_handler::<N, S>),
        )
        .route(
            "/api/v1/templates/:template_id/stages",
            post(add_template_stage_handler::<N, S>)
                .patch(reorder_template_stages_handler::<N, S>),
        )
        .route(
            "/api/v1/templates/:template_id/stages/:stage_id",
            delete(remove_template_stage_handler::<N, S>),
        )
        .with_state(service)
}

pub(crate) async fn board_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Query(params): Query<BoardParams>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    let filter = params
        .job
        .as_deref()
        .map(JobFilter::from_token)
        .unwrap_or_default();
    (StatusCode::OK, axum::Json(service.board(filter))).into_response()
}

pub(crate) async fn event_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    axum::Json(event): axum::Json<PipelineEvent>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    match service.apply(event) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summary_handler<N, S>(State(service): State<SharedService<N, S>>) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    (StatusCode::OK, axum::Json(service.summary())).into_response()
}

pub(crate) async fn dashboard_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Query(params): Query<DashboardParams>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    let today = params
        .today
        .unwrap_or_else(|| Local::now().date_naive());
    (StatusCode::OK, axum::Json(service.dashboard(today))).into_response()
}

pub(crate) async fn activities_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Query(params): Query<ActivityParams>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    (StatusCode::OK, axum::Json(service.activities(params.limit))).into_response()
}

pub(crate) async fn add_stage_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    axum::Json(request): axum::Json<StageRequest>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    match service.add_stage(&request.name, &request.color) {
        Ok(column) => (StatusCode::CREATED, axum::Json(column)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_stage_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Path(stage_id): Path<u32>,
    axum::Json(request): axum::Json<StageRequest>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    match service.update_stage(StageId(stage_id), &request.name, &request.color) {
        Ok(column) => (StatusCode::OK, axum::Json(column)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_stage_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Path(stage_id): Path<u32>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    match service.delete_stage(StageId(stage_id)) {
        Ok(columns) => (StatusCode::OK, axum::Json(columns)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn candidates_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Query(query): Query<CandidateQuery>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    (StatusCode::OK, axum::Json(service.search_candidates(&query))).into_response()
}

pub(crate) async fn candidate_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Path(candidate_id): Path<u32>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    match service.candidate_detail(CandidateId(candidate_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn jobs_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Query(query): Query<JobQuery>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    (StatusCode::OK, axum::Json(service.search_jobs(&query))).into_response()
}

pub(crate) async fn tags_handler<N, S>(State(service): State<SharedService<N, S>>) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    (StatusCode::OK, axum::Json(service.tags())).into_response()
}

pub(crate) async fn templates_handler<N, S>(
    State(service): State<SharedService<N, S>>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    (StatusCode::OK, axum::Json(service.templates())).into_response()
}

pub(crate) async fn save_template_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Path(template_id): Path<String>,
    axum::Json(mut template): axum::Json<WorkflowTemplate>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    template.id = TemplateId(template_id);
    let body = template.clone();
    match service.save_template(template) {
        Ok(SaveOutcome::Created) => (StatusCode::CREATED, axum::Json(body)).into_response(),
        Ok(SaveOutcome::Updated) => (StatusCode::OK, axum::Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_template_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Path(template_id): Path<String>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    if service.delete_template(&TemplateId(template_id.clone())) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        let payload = json!({
            "error": format!("template {template_id} not found"),
        });
        (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
    }
}

pub(crate) async fn add_template_stage_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Path(template_id): Path<String>,
    axum::Json(request): axum::Json<StageRequest>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    match service.add_template_stage(&TemplateId(template_id), &request.name, &request.color) {
        Ok(stage) => (StatusCode::CREATED, axum::Json(stage)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reorder_template_stages_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Path(template_id): Path<String>,
    axum::Json(request): axum::Json<ReorderRequest>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    match service.reorder_template_stages(
        &TemplateId(template_id),
        request.source_index,
        request.destination_index,
    ) {
        Ok(template) => (StatusCode::OK, axum::Json(template)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_template_stage_handler<N, S>(
    State(service): State<SharedService<N, S>>,
    Path((template_id, stage_id)): Path<(String, String)>,
) -> Response
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    match service.remove_template_stage(&TemplateId(template_id), &stage_id) {
        Ok(template) => (StatusCode::OK, axum::Json(template)).into_response(),
        Err(error) => error_response(error),
    }
}

impl PipelineServiceError {
    /// HTTP status a rejected pipeline operation maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PipelineServiceError::Pipeline(PipelineError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            PipelineServiceError::Pipeline(PipelineError::Constraint(_)) => StatusCode::CONFLICT,
            PipelineServiceError::Pipeline(PipelineError::Defect(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            PipelineServiceError::Template(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            PipelineServiceError::Template(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PipelineServiceError::CandidateNotFound(_) => StatusCode::NOT_FOUND,
            PipelineServiceError::Notify(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

fn error_response(error: PipelineServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), axum::Json(payload)).into_response()
}

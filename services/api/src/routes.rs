use crate::infra::{ApiPipelineService, AppState, InMemoryNotificationPublisher};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use hireflow::workflows::messages::{messages_router, MessageService};
use hireflow::workflows::pipeline::{pipeline_router, PipelineNotice};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Notice as rendered by the toast feed.
#[derive(Debug, Serialize)]
pub(crate) struct NotificationEntry {
    pub(crate) title: String,
    pub(crate) description: String,
    #[serde(flatten)]
    pub(crate) notice: PipelineNotice,
}

impl From<PipelineNotice> for NotificationEntry {
    fn from(notice: PipelineNotice) -> Self {
        Self {
            title: notice.title(),
            description: notice.description(),
            notice,
        }
    }
}

pub(crate) fn with_pipeline_routes(
    service: Arc<ApiPipelineService>,
    messages: Arc<MessageService>,
    notifier: InMemoryNotificationPublisher,
) -> axum::Router {
    pipeline_router(service)
        .merge(messages_router(messages))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/notifications",
            axum::routing::get(notifications_endpoint),
        )
        .layer(Extension(notifier))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn notifications_endpoint(
    Extension(notifier): Extension<InMemoryNotificationPublisher>,
) -> Json<Vec<NotificationEntry>> {
    Json(
        notifier
            .notices()
            .into_iter()
            .map(NotificationEntry::from)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{message_service, pipeline_service};
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use hireflow::config::PipelineConfig;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app() -> axum::Router {
        let config = PipelineConfig {
            advisory_delay: Duration::ZERO,
            ..PipelineConfig::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date");
        let (service, notifier) = pipeline_service(config, today);
        with_pipeline_routes(service, message_service(today), notifier)
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();
        let state = AppState {
            readiness: Arc::new(std::sync::atomic::AtomicBool::new(false)),
            metrics: Arc::new(handle),
        };

        let response = readiness_endpoint(Extension(state.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state
            .readiness
            .store(true, std::sync::atomic::Ordering::Release);
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn notifications_follow_pipeline_events() {
        let app = app();

        let event = serde_json::json!({
            "kind": "move_candidate",
            "candidate_id": 4,
            "source_column_id": 4,
            "destination_column_id": 3,
            "destination_index": 5,
        });
        let response = app
            .clone()
            .oneshot(
                Request::post("/api/v1/pipeline/events")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&event).expect("event json")))
                    .expect("request"),
            )
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::OK);

        tokio::time::sleep(Duration::from_millis(20)).await;

        let response = app
            .oneshot(
                Request::get("/api/v1/notifications")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");
        let body = json_body(response).await;

        assert_eq!(body[0]["title"], "Candidate moved to Interview");
        assert_eq!(
            body[0]["description"],
            "James Wilson is now in the Interview stage."
        );
        assert_eq!(body[0]["kind"], "stage_changed");
        assert_eq!(body[1]["kind"], "advisory");
        assert_eq!(body[1]["title"], "AI Recommendation");
    }

    #[tokio::test]
    async fn messages_and_dashboard_are_served_alongside_the_board() {
        let app = app();

        let response = app
            .clone()
            .oneshot(
                Request::get("/api/v1/messages?search=sophia")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await[0]["candidate_name"], "Sophia Martinez");

        let response = app
            .oneshot(
                Request::get("/api/v1/dashboard?today=2025-10-01")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["totals"]["new_applications"], 5);
    }
}

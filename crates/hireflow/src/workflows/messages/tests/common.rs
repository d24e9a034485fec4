use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::catalog::EntityCatalog;
use crate::workflows::messages::{messages_router, MessageService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
}

pub(super) fn noon() -> NaiveDateTime {
    today().and_hms_opt(12, 0, 0).expect("valid time")
}

pub(super) fn build_service() -> Arc<MessageService> {
    Arc::new(MessageService::new(&EntityCatalog::seeded(today())))
}

pub(super) fn router_with_service(service: Arc<MessageService>) -> axum::Router {
    messages_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::catalog::ConversationId;

use super::inbox::MessageError;
use super::service::MessageService;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SendRequest {
    user_id: u32,
    content: String,
}

pub fn messages_router(service: Arc<MessageService>) -> Router {
    Router::new()
        .route("/api/v1/messages", get(conversations_handler))
        .route(
            "/api/v1/messages/:conversation_id",
            get(conversation_handler).post(send_handler),
        )
        .with_state(service)
}

pub(crate) async fn conversations_handler(
    State(service): State<Arc<MessageService>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let summaries = service.conversations(params.search.as_deref());
    (StatusCode::OK, axum::Json(summaries)).into_response()
}

pub(crate) async fn conversation_handler(
    State(service): State<Arc<MessageService>>,
    Path(conversation_id): Path<u32>,
) -> Response {
    match service.conversation(ConversationId(conversation_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn send_handler(
    State(service): State<Arc<MessageService>>,
    Path(conversation_id): Path<u32>,
    axum::Json(request): axum::Json<SendRequest>,
) -> Response {
    match service.send(
        ConversationId(conversation_id),
        request.user_id,
        &request.content,
    ) {
        Ok(message) => (StatusCode::CREATED, axum::Json(message)).into_response(),
        Err(error) => error_response(error),
    }
}

impl MessageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MessageError::EmptyMessage | MessageError::UnknownUser(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            MessageError::UnknownConversation(_) => StatusCode::NOT_FOUND,
        }
    }
}

fn error_response(error: MessageError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), axum::Json(payload)).into_response()
}

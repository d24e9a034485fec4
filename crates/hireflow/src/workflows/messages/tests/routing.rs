use super::common::*;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn conversation_list_route_applies_search() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(get("/api/v1/messages?search=emma"))
        .await
        .expect("router response");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(1));
    assert_eq!(payload[0]["candidate_name"], "Emma Thompson");
    assert_eq!(payload[0]["last_message"]["sender"], "user");
}

#[tokio::test]
async fn send_route_creates_message_and_thread_shows_it() {
    let router = router_with_service(build_service());

    let created = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/messages/2",
            json!({ "user_id": 2, "content": "Calendar invite sent." }),
        ))
        .await
        .expect("router response");
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(read_json_body(created).await["id"], 8);

    let thread = router
        .oneshot(get("/api/v1/messages/2"))
        .await
        .expect("router response");
    assert_eq!(thread.status(), StatusCode::OK);
    let payload = read_json_body(thread).await;
    assert_eq!(payload["candidate_name"], "Sophia Martinez");
    assert_eq!(payload["messages"][7]["content"], "Calendar invite sent.");
}

#[tokio::test]
async fn message_routes_map_errors() {
    let router = router_with_service(build_service());

    let blank = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/messages/1",
            json!({ "user_id": 1, "content": "" }),
        ))
        .await
        .expect("router response");
    assert_eq!(blank.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(read_json_body(blank).await["error"], "message cannot be empty");

    let stranger = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/messages/1",
            json!({ "user_id": 99, "content": "Hi" }),
        ))
        .await
        .expect("router response");
    assert_eq!(stranger.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let missing = router
        .oneshot(get("/api/v1/messages/5"))
        .await
        .expect("router response");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

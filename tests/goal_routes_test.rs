// ABOUTME: Integration tests for the REST surface via in-process requests
// ABOUTME: Covers identity handling, status codes, and the response envelope

mod common;

use axum::body::Body;
use axum::Router;
use common::create_test_resources;
use http::{header, Request, StatusCode};
use serde_json::{json, Value};
use strive_server::routes;
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    routes::router(create_test_resources())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, user: Option<Uuid>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user.to_string());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, user: Option<Uuid>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user.to_string());
    }
    builder.body(Body::empty()).unwrap()
}

fn create_goal_body() -> Value {
    let target_date = chrono::Utc::now() + chrono::Duration::days(30);
    json!({
        "title": "Lose 10 lbs",
        "goal_type": "weight",
        "target": 10.0,
        "unit": "lbs",
        "target_date": target_date.to_rfc3339()
    })
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let response = app()
        .oneshot(get_request("/api/goals", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_create_goal_returns_created_with_derived_fields() {
    let user = Uuid::new_v4();
    let response = app()
        .oneshot(post_json("/api/goals", Some(user), &create_goal_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    let data = &body["data"];
    assert_eq!(data["status"], "active");
    assert_eq!(data["owner_id"], user.to_string());
    assert_eq!(data["progress_percentage"], 0);
    assert_eq!(data["is_overdue"], false);
}

#[tokio::test]
async fn test_create_goal_validation_lists_fields() {
    let response = app()
        .oneshot(post_json(
            "/api/goals",
            Some(Uuid::new_v4()),
            &json!({ "title": "no target" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    let fields: Vec<&str> = body["error"]["details"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"goal_type"));
    assert!(fields.contains(&"target"));
    assert!(fields.contains(&"unit"));
    assert!(fields.contains(&"target_date"));
}

#[tokio::test]
async fn test_progress_flow_through_routes() {
    let app = app();
    let user = Uuid::new_v4();

    let response = app
        .clone()
        .oneshot(post_json("/api/goals", Some(user), &create_goal_body()))
        .await
        .unwrap();
    let goal_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_owned();

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/goals/{goal_id}/progress"),
            Some(user),
            &json!({ "value": 4.0, "notes": "first check-in" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["progress_percentage"], 40);

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/goals/{goal_id}/progress"),
            Some(user),
            &json!({ "value": 12.0 }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["progress_percentage"], 100);
    assert_eq!(body["data"]["current"], 12.0);
}

#[tokio::test]
async fn test_progress_requires_value() {
    let app = app();
    let user = Uuid::new_v4();

    let response = app
        .clone()
        .oneshot(post_json("/api/goals", Some(user), &create_goal_body()))
        .await
        .unwrap();
    let goal_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_owned();

    let response = app
        .oneshot(post_json(
            &format!("/api/goals/{goal_id}/progress"),
            Some(user),
            &json!({ "notes": "forgot the number" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_other_users_goal_is_not_found() {
    let app = app();
    let owner = Uuid::new_v4();

    let response = app
        .clone()
        .oneshot(post_json("/api/goals", Some(owner), &create_goal_body()))
        .await
        .unwrap();
    let goal_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_owned();

    let response = app
        .oneshot(get_request(
            &format!("/api/goals/{goal_id}"),
            Some(Uuid::new_v4()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_rejects_invalid_status_filter() {
    let response = app()
        .oneshot(get_request(
            "/api/goals?status=archived",
            Some(Uuid::new_v4()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_returns_page_envelope() {
    let app = app();
    let user = Uuid::new_v4();

    for _ in 0..3 {
        app.clone()
            .oneshot(post_json("/api/goals", Some(user), &create_goal_body()))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(get_request("/api/goals?page=1&limit=2", Some(user)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["goals"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["limit"], 2);
}

#[tokio::test]
async fn test_delete_returns_no_content() {
    let app = app();
    let user = Uuid::new_v4();

    let response = app
        .clone()
        .oneshot(post_json("/api/goals", Some(user), &create_goal_body()))
        .await
        .unwrap();
    let goal_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_owned();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/goals/{goal_id}"))
                .header("x-user-id", user.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get_request(&format!("/api/goals/{goal_id}"), Some(user)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analytics_requires_admin_role() {
    let response = app()
        .oneshot(get_request("/api/admin/analytics", Some(Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_analytics_report_for_admin() {
    let app = app();
    let user = Uuid::new_v4();

    app.clone()
        .oneshot(post_json("/api/goals", Some(user), &create_goal_body()))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/admin/analytics?granularity=day")
                .header("x-user-id", user.to_string())
                .header("x-user-role", "admin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["total_goals"], 1);
    assert_eq!(body["data"]["active_goals"], 1);
    assert_eq!(body["data"]["completion_rate"], 0.0);
}

#[tokio::test]
async fn test_health_is_open() {
    let response = app()
        .oneshot(get_request("/api/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["service"], "strive-server");
}

//! API endpoint integration tests

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

use chime_gateway::WeatherReport;

mod common;
use common::{api_state, boston_weather, ScriptedCompletion};

/// Build a test router with an always-succeeding stack
fn build_test_router(email_fails: bool) -> axum::Router {
    let state = api_state(
        ScriptedCompletion::text_only("Hello from the assistant"),
        boston_weather(),
        email_fails,
    );
    chime_gateway::api::router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = build_test_router(false);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("Chime"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_test_router(false);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_get_weather_success() {
    let app = build_test_router(false);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/get_weather/Boston")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["temp"], 15.0);
    assert_eq!(json["description"], "clear sky");
}

#[tokio::test]
async fn test_get_weather_failure_is_still_200() {
    let state = api_state(
        ScriptedCompletion::text_only("unused"),
        WeatherReport::Failed {
            message: "error: Unable to fetch weather data for Nowhere.".to_string(),
        },
        false,
    );
    let app = chime_gateway::api::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/get_weather/Nowhere")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "failed");
    assert!(json["message"].as_str().unwrap().contains("Nowhere"));
}

#[tokio::test]
async fn test_send_email_failure_round_trip() {
    // An always-failing collaborator still yields a 200 with the input echoed
    let app = build_test_router(true);

    let request_body = json!({
        "email_account": "user@example.com",
        "subject": "Weather",
        "message": "Clear skies today.",
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/send_email")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "failure");
    assert_eq!(json["receiver_email_account"], "user@example.com");
    assert_eq!(json["message"], "Clear skies today.");
}

#[tokio::test]
async fn test_send_email_success() {
    let app = build_test_router(false);

    let request_body = json!({
        "email_account": "user@example.com",
        "subject": "Hi",
        "message": "Hello!",
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/send_email")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["receiver_email_account"], "user@example.com");
}

#[tokio::test]
async fn test_generate_response_returns_extended_turns() {
    let app = build_test_router(false);

    let request_body = json!({
        "messages": [{"role": "user", "content": "Hi"}],
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate_response")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let turns = json.as_array().unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0]["role"], "user");
    assert_eq!(turns[1]["role"], "assistant");
    assert_eq!(turns[1]["content"], "Hello from the assistant");
}

#[tokio::test]
async fn test_generate_response_rejects_non_user_tail() {
    let app = build_test_router(false);

    let request_body = json!({
        "messages": [{"role": "assistant", "content": "I spoke last"}],
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate_response")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "bad_request");
}

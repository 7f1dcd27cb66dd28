//! HTTP-level tests for member registration input handling.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, build_test_app, post_json, test_auth_config};

#[tokio::test]
async fn test_register_accepts_string_birth_date() {
    let (app, backend) = build_test_app(test_auth_config(900));

    let body = serde_json::json!({
        "username": "bob",
        "password": "secret-pw",
        "nickname": "Bob",
        "birth": "1990/01/02"
    });
    let response = post_json(app.clone(), "/api/v1/members", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let registered = body_json(response).await;
    let member_id = registered["member_id"].as_i64().unwrap();
    let stored = backend.store.get(member_id).unwrap();
    assert_eq!(stored.birth.to_string(), "1990-01-02");
}

#[tokio::test]
async fn test_register_rejects_calendar_rollover() {
    let (app, backend) = build_test_app(test_auth_config(900));

    // April has 30 days; this must not become May 1.
    let body = serde_json::json!({
        "username": "carol",
        "password": "secret-pw",
        "nickname": "Carol",
        "birth": { "year": 2000, "month": 4, "day": 31 }
    });
    let response = post_json(app.clone(), "/api/v1/members", body).await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    assert_eq!(backend.store.len(), 0);
}

#[tokio::test]
async fn test_register_rejects_blank_fields() {
    let (app, backend) = build_test_app(test_auth_config(900));

    for (field, value) in [("username", "  "), ("password", ""), ("nickname", " ")] {
        let mut body = serde_json::json!({
            "username": "dave",
            "password": "secret-pw",
            "nickname": "Dave",
            "birth": "1992-03-04"
        });
        body[field] = serde_json::Value::String(value.to_string());

        let response = post_json(app.clone(), "/api/v1/members", body).await;
        assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    }
    assert_eq!(backend.store.len(), 0);
}

#[tokio::test]
async fn test_register_trims_username_and_nickname() {
    let (app, backend) = build_test_app(test_auth_config(900));

    let body = serde_json::json!({
        "username": "  erin  ",
        "password": "secret-pw",
        "nickname": "  Erin ",
        "birth": "1993-05-06"
    });
    let response = post_json(app.clone(), "/api/v1/members", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let registered = body_json(response).await;
    assert_eq!(registered["nickname"], "Erin");
    let member_id = registered["member_id"].as_i64().unwrap();
    assert_eq!(backend.store.get(member_id).unwrap().username, "erin");

    // The trimmed username is what logs in.
    let response = post_json(
        app.clone(),
        "/api/v1/members/login",
        serde_json::json!({ "username": "erin", "password": "secret-pw" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

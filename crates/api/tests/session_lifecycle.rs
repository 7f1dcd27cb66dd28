//! End-to-end tests for the session lifecycle over in-memory backends:
//! register, login, logout, dead-zone revocation, token expiry, and
//! credential updates.

mod common;

use axum::http::StatusCode;
use common::{
    assert_error, body_json, build_test_app, delete_auth, get_auth, patch_json_auth, post_auth,
    post_json, test_auth_config,
};
use teamup_cache::{deadzone_key, session_key, SessionCache};

const USERNAME: &str = "alice";
const PASSWORD: &str = "original-password";

fn register_body() -> serde_json::Value {
    serde_json::json!({
        "username": USERNAME,
        "password": PASSWORD,
        "nickname": "Alice",
        "birth": { "year": 1995, "month": 8, "day": 30 }
    })
}

/// Register and log in, returning the login response JSON.
async fn register_and_login(app: &axum::Router) -> serde_json::Value {
    let response = post_json(app.clone(), "/api/v1/members", register_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app.clone(),
        "/api/v1/members/login",
        serde_json::json!({ "username": USERNAME, "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn test_register_then_login_issues_token_pair() {
    let (app, backend) = build_test_app(test_auth_config(900));

    // Registration opens the first session.
    let response = post_json(app.clone(), "/api/v1/members", register_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let registered = body_json(response).await;
    let member_id = registered["member_id"].as_i64().unwrap();
    assert_eq!(registered["nickname"], "Alice");
    assert!(registered["access_token"].is_string());
    assert!(registered["refresh_token"].is_string());
    assert_ne!(registered["access_token"], registered["refresh_token"]);
    assert!(registered["password_hash"].is_null(), "hash must not leak");

    let stored = backend.cache.get(&session_key(member_id)).await.unwrap();
    assert_eq!(stored.as_deref(), registered["refresh_token"].as_str());

    // A later login supersedes the stored refresh token.
    let login = post_json(
        app.clone(),
        "/api/v1/members/login",
        serde_json::json!({ "username": USERNAME, "password": PASSWORD }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let login = body_json(login).await;
    assert_eq!(login["member_id"].as_i64().unwrap(), member_id);
    assert_eq!(login["nickname"], "Alice");

    let stored = backend.cache.get(&session_key(member_id)).await.unwrap();
    assert_eq!(stored.as_deref(), login["refresh_token"].as_str());
}

#[tokio::test]
async fn test_duplicate_username_rejected_without_mutation() {
    let (app, backend) = build_test_app(test_auth_config(900));

    let response = post_json(app.clone(), "/api/v1/members", register_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(backend.store.len(), 1);

    // Same username, different everything else.
    let second = serde_json::json!({
        "username": USERNAME,
        "password": "other-password",
        "nickname": "Impostor",
        "birth": "1990/01/01"
    });
    let response = post_json(app.clone(), "/api/v1/members", second).await;
    assert_error(response, StatusCode::CONFLICT, "DUPLICATE_USERNAME").await;
    assert_eq!(backend.store.len(), 1, "failed register must not insert");
}

#[tokio::test]
async fn test_invalid_credentials_are_indistinguishable() {
    let (app, _backend) = build_test_app(test_auth_config(900));
    register_and_login(&app).await;

    let wrong_password = post_json(
        app.clone(),
        "/api/v1/members/login",
        serde_json::json!({ "username": USERNAME, "password": "guess" }),
    )
    .await;
    assert_error(wrong_password, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await;

    let unknown_user = post_json(
        app.clone(),
        "/api/v1/members/login",
        serde_json::json!({ "username": "ghost", "password": PASSWORD }),
    )
    .await;
    assert_error(unknown_user, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await;
}

#[tokio::test]
async fn test_logout_revokes_and_relogin_lifts_the_deadzone() {
    let (app, backend) = build_test_app(test_auth_config(900));

    let login = register_and_login(&app).await;
    let member_id = login["member_id"].as_i64().unwrap();
    let token_a = login["access_token"].as_str().unwrap().to_string();

    // Token A is live.
    let response = get_auth(app.clone(), "/api/v1/members/me", &token_a).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Logout drops the session key and arms the dead zone.
    let response = post_auth(app.clone(), "/api/v1/members/logout", &token_a).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(backend.cache.get(&session_key(member_id)).await.unwrap().is_none());
    assert!(backend.cache.get(&deadzone_key(member_id)).await.unwrap().is_some());

    // The still-unexpired token A is now refused.
    let response = get_auth(app.clone(), "/api/v1/members/me", &token_a).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "SESSION_REVOKED").await;

    // Logout is idempotent even while the dead zone is armed.
    let response = post_auth(app.clone(), "/api/v1/members/logout", &token_a).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // A fresh login clears the dead zone; both the new token and the old
    // unexpired one become usable again.
    let relogin = post_json(
        app.clone(),
        "/api/v1/members/login",
        serde_json::json!({ "username": USERNAME, "password": PASSWORD }),
    )
    .await;
    assert_eq!(relogin.status(), StatusCode::OK);
    let relogin = body_json(relogin).await;
    let token_b = relogin["access_token"].as_str().unwrap();

    assert!(backend.cache.get(&deadzone_key(member_id)).await.unwrap().is_none());

    let response = get_auth(app.clone(), "/api/v1/members/me", token_b).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_auth(app.clone(), "/api/v1/members/me", &token_a).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_expired_access_token_distinct_from_tampered() {
    // 1-second access tokens.
    let (app, _backend) = build_test_app(test_auth_config(1));

    let login = register_and_login(&app).await;
    let token = login["access_token"].as_str().unwrap().to_string();

    let response = get_auth(app.clone(), "/api/v1/members/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    let response = get_auth(app.clone(), "/api/v1/members/me", &token).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED").await;

    // Tampering flips the signature: forbidden, not merely expired.
    let mut tampered = token;
    tampered.push('x');
    let response = get_auth(app.clone(), "/api/v1/members/me", &tampered).await;
    assert_error(response, StatusCode::FORBIDDEN, "TOKEN_INVALID").await;
}

#[tokio::test]
async fn test_refresh_token_rejected_as_access_token() {
    let (app, _backend) = build_test_app(test_auth_config(900));

    let login = register_and_login(&app).await;
    let refresh_token = login["refresh_token"].as_str().unwrap();

    // Signed with the refresh secret, so it fails the access-secret check.
    let response = get_auth(app.clone(), "/api/v1/members/me", refresh_token).await;
    assert_error(response, StatusCode::FORBIDDEN, "TOKEN_INVALID").await;
}

#[tokio::test]
async fn test_missing_or_malformed_authorization_header() {
    let (app, _backend) = build_test_app(test_auth_config(900));

    let response = common::get(app.clone(), "/api/v1/members/me").await;
    assert_error(response, StatusCode::UNAUTHORIZED, "MISSING_TOKEN").await;

    // Wrong scheme is treated the same as no header.
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/members/me")
        .header("authorization", "Token abc123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "MISSING_TOKEN").await;
}

#[tokio::test]
async fn test_password_update_flow() {
    let (app, _backend) = build_test_app(test_auth_config(900));

    let login = register_and_login(&app).await;
    let token = login["access_token"].as_str().unwrap().to_string();

    // Wrong current password.
    let response = patch_json_auth(
        app.clone(),
        "/api/v1/members/password",
        &token,
        serde_json::json!({ "current_password": "guess", "new_password": "next-password" }),
    )
    .await;
    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "PASSWORD_MISMATCH").await;

    // New password equal to the current one.
    let response = patch_json_auth(
        app.clone(),
        "/api/v1/members/password",
        &token,
        serde_json::json!({ "current_password": PASSWORD, "new_password": PASSWORD }),
    )
    .await;
    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "PASSWORD_UNCHANGED").await;

    // Successful change.
    let response = patch_json_auth(
        app.clone(),
        "/api/v1/members/password",
        &token,
        serde_json::json!({ "current_password": PASSWORD, "new_password": "next-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Old password no longer logs in; the new one does.
    let response = post_json(
        app.clone(),
        "/api/v1/members/login",
        serde_json::json!({ "username": USERNAME, "password": PASSWORD }),
    )
    .await;
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await;

    let response = post_json(
        app.clone(),
        "/api/v1/members/login",
        serde_json::json!({ "username": USERNAME, "password": "next-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_deleted_account_invalidates_tokens() {
    let (app, backend) = build_test_app(test_auth_config(900));

    let login = register_and_login(&app).await;
    let member_id = login["member_id"].as_i64().unwrap();
    let token = login["access_token"].as_str().unwrap().to_string();

    let response = delete_auth(app.clone(), "/api/v1/members", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(backend.store.len(), 0);
    assert!(backend.cache.get(&session_key(member_id)).await.unwrap().is_none());
    assert!(backend.cache.get(&deadzone_key(member_id)).await.unwrap().is_none());

    // A token naming a deleted member is refused outright.
    let response = get_auth(app.clone(), "/api/v1/members/me", &token).await;
    assert_error(response, StatusCode::FORBIDDEN, "TOKEN_INVALID").await;
}

#[tokio::test]
async fn test_nickname_and_profile_updates() {
    let (app, backend) = build_test_app(test_auth_config(900));

    let login = register_and_login(&app).await;
    let member_id = login["member_id"].as_i64().unwrap();
    let token = login["access_token"].as_str().unwrap().to_string();

    let response = patch_json_auth(
        app.clone(),
        "/api/v1/members/nickname",
        &token,
        serde_json::json!({ "nickname": "Alicia" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(backend.store.get(member_id).unwrap().nickname, "Alicia");

    // Empty nickname is rejected.
    let response = patch_json_auth(
        app.clone(),
        "/api/v1/members/nickname",
        &token,
        serde_json::json!({ "nickname": "   " }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let response = patch_json_auth(
        app.clone(),
        "/api/v1/members/profile",
        &token,
        serde_json::json!({ "profile": "Backend engineer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["profile"], "Backend engineer");
}

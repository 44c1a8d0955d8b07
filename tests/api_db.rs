//! End-to-end scenarios against a live PostgreSQL with schema.sql applied.
//! Ignored by default; run with:
//!   DATABASE_URL=postgres://... cargo test --test api_db -- --ignored

use anyhow::{Context, Result};
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use fintrack_api::app::app;
use fintrack_api::auth::token::TokenKeys;
use fintrack_api::state::AppState;

const SECRET: &[u8] = b"db-test-secret";

async fn db_app() -> Result<(Router, TokenKeys)> {
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await?;

    let keys = TokenKeys::new(SECRET);
    let state = AppState {
        pool,
        tokens: keys.clone(),
    };

    Ok((
        app(state, HeaderValue::from_static("http://localhost:3000")),
        keys,
    ))
}

/// Unique-per-run email so repeated test runs do not collide.
fn fresh_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}@example.com")
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> Result<(StatusCode, serde_json::Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = cookie {
        builder = builder.header(header::COOKIE, format!("token={token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await?;
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

async fn register(app: &Router, email: &str, password: &str, username: &str) -> Result<i32> {
    let (status, body) = send_json(
        app,
        "POST",
        "/user/create",
        None,
        Some(serde_json::json!({
            "email": email,
            "password": password,
            "username": username,
        })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::OK, "registration failed: {body}");
    Ok(body["id"].as_i64().context("missing id")? as i32)
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL with schema.sql applied"]
async fn duplicate_registration_is_rejected() -> Result<()> {
    let (app, _) = db_app().await?;
    let email = fresh_email("dup");

    register(&app, &email, "p1", "A").await?;

    let (status, body) = send_json(
        &app,
        "POST",
        "/user/create",
        None,
        Some(serde_json::json!({ "email": email, "password": "p1", "username": "A" })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");
    Ok(())
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL with schema.sql applied"]
async fn login_verifies_credentials_and_sets_cookie() -> Result<()> {
    let (app, _) = db_app().await?;
    let email = fresh_email("login");

    register(&app, &email, "correct-horse", "A").await?;

    let (status, body) = send_json(
        &app,
        "POST",
        "/user/login",
        None,
        Some(serde_json::json!({ "email": email, "password": "wrong" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");

    let request = Request::builder()
        .method("POST")
        .uri("/user/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&serde_json::json!({
            "email": email,
            "password": "correct-horse",
        }))?))?;
    let response = app.clone().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    Ok(())
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL with schema.sql applied"]
async fn expense_mutations_are_owner_scoped() -> Result<()> {
    let (app, keys) = db_app().await?;

    let owner = register(&app, &fresh_email("owner"), "p1", "Owner").await?;
    let intruder = register(&app, &fresh_email("intruder"), "p2", "Intruder").await?;
    let owner_token = keys.issue(owner)?;
    let intruder_token = keys.issue(intruder)?;

    let (status, tag) = send_json(
        &app,
        "POST",
        "/tag/create",
        Some(&owner_token),
        Some(serde_json::json!({ "tag_name": "food" })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::OK, "tag creation failed: {tag}");
    let tag_id = tag["tag_id"].as_i64().context("missing tag_id")?;

    let (status, expense) = send_json(
        &app,
        "POST",
        "/expense/create",
        Some(&owner_token),
        Some(serde_json::json!({
            "date": "2026-08-01",
            "amount": 12.5,
            "desc": "lunch",
            "tag_id": tag_id,
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(expense["user_id"].as_i64(), Some(owner as i64));
    assert_eq!(expense["is_recurring"], false);
    let expense_id = expense["expense_id"].as_i64().context("missing expense_id")?;

    // Another user's update must not touch the row.
    let update_body = serde_json::json!({
        "date": "2026-08-02",
        "amount": 99.0,
        "desc": "hijacked",
        "tag_id": tag_id,
        "is_rec": false,
        "rec_freq": null,
    });
    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/expense/update/{expense_id}"),
        Some(&intruder_token),
        Some(update_body.clone()),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Expense not found or not owned");

    let (status, listed) = send_json(&app, "GET", "/expense/", Some(&owner_token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["expense_description"], "lunch");

    // Cross-user delete is also a 404; the owner's delete succeeds once.
    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/expense/delete/{expense_id}"),
        Some(&intruder_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/expense/delete/{expense_id}"),
        Some(&owner_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/expense/delete/{expense_id}"),
        Some(&owner_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL with schema.sql applied"]
async fn referenced_tag_delete_is_a_server_error() -> Result<()> {
    let (app, keys) = db_app().await?;

    let owner = register(&app, &fresh_email("tagref"), "p1", "Owner").await?;
    let token = keys.issue(owner)?;

    let (_, tag) = send_json(
        &app,
        "POST",
        "/tag/create",
        Some(&token),
        Some(serde_json::json!({ "tag_name": "rent" })),
    )
    .await?;
    let tag_id = tag["tag_id"].as_i64().context("missing tag_id")?;

    let (status, _) = send_json(
        &app,
        "POST",
        "/income/create",
        Some(&token),
        Some(serde_json::json!({
            "date": "2026-08-01",
            "amount": 1500,
            "desc": "salary",
            "tag_id": tag_id,
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        &app,
        "DELETE",
        &format!("/tag/delete/{tag_id}"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server error");
    Ok(())
}

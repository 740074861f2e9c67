//! Integration tests for staff administration endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

fn new_staff(name: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "full_name": name,
        "email": email,
        "department": "People Ops",
    })
}

// ---------------------------------------------------------------------------
// Create / get round trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_get_staff(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(&app, "/api/v1/staff", new_staff("Alice Osei", "alice@example.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["full_name"], "Alice Osei");
    assert_eq!(created["data"]["is_active"], true);
    assert_eq!(created["data"]["is_admin"], false);

    let id = created["data"]["id"].as_i64().unwrap();
    let response = get(&app, &format!("/api/v1/staff/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["data"]["email"], "alice@example.com");
}

// ---------------------------------------------------------------------------
// Validation failures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_email_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response =
        post_json(&app, "/api/v1/staff", new_staff("Bob Lang", "not-an-email")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_name_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(&app, "/api/v1/staff", new_staff("", "bob@example.com")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Unique email conflict
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response =
        post_json(&app, "/api/v1/staff", new_staff("Alice Osei", "alice@example.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response =
        post_json(&app, "/api/v1/staff", new_staff("Other Alice", "alice@example.com")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Update and deactivate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_deactivate_staff(pool: PgPool) {
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json(&app, "/api/v1/staff", new_staff("Priya Nair", "priya@example.com")).await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = put_json(
        &app,
        &format!("/api/v1/staff/{id}"),
        serde_json::json!({ "job_title": "HR Manager" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["job_title"], "HR Manager");
    // Untouched fields survive a partial update.
    assert_eq!(updated["data"]["full_name"], "Priya Nair");

    let response = delete(&app, &format!("/api/v1/staff/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let deactivated = body_json(response).await;
    assert_eq!(deactivated["data"]["is_active"], false);

    // Deactivated staff disappear from the active-only listing.
    let listing =
        body_json(get(&app, "/api/v1/staff?active_only=true").await).await;
    assert_eq!(listing["data"].as_array().unwrap().len(), 0);

    let listing = body_json(get(&app, "/api/v1/staff").await).await;
    assert_eq!(listing["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Missing staff member
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_staff_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/v1/staff/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

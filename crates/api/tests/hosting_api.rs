//! HTTP-level integration tests for the `/hosting` endpoints: the
//! expiring listing and the renew/upgrade ledger mutations.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, build_test_app, get, post_json, seed_client, seed_hosted_project, MockMailer};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: GET /api/v1/hosting/expiring annotates urgency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_expiring_listing_annotates_urgency(pool: PgPool) {
    let today = Utc::now().date_naive();
    let client_id = seed_client(&pool, Some("minh@example.vn")).await;
    seed_hosted_project(&pool, client_id, "Overdue", today - Duration::days(2)).await;
    seed_hosted_project(&pool, client_id, "Soon", today + Duration::days(5)).await;
    // Outside the default 30-day window.
    seed_hosted_project(&pool, client_id, "Far", today + Duration::days(90)).await;

    let app = build_test_app(pool, MockMailer::new(), None);
    let response = get(app, "/api/v1/hosting/expiring").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);

    assert_eq!(data[0]["name"], "Overdue");
    assert_eq!(data[0]["days_until_expiry"], -2);
    assert_eq!(data[0]["is_expired"], true);

    assert_eq!(data[1]["name"], "Soon");
    assert_eq!(data[1]["days_until_expiry"], 5);
    assert_eq!(data[1]["is_expired"], false);
    assert_eq!(data[1]["client_name"], "Anh Minh");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_expiring_today_counts_as_expired(pool: PgPool) {
    let today = Utc::now().date_naive();
    let client_id = seed_client(&pool, None).await;
    seed_hosted_project(&pool, client_id, "Today", today).await;

    let app = build_test_app(pool, MockMailer::new(), None);
    let response = get(app, "/api/v1/hosting/expiring").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["days_until_expiry"], 0);
    assert_eq!(data[0]["is_expired"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_expiring_listing_honours_days_override(pool: PgPool) {
    let today = Utc::now().date_naive();
    let client_id = seed_client(&pool, None).await;
    seed_hosted_project(&pool, client_id, "Far", today + Duration::days(90)).await;

    let app = build_test_app(pool, MockMailer::new(), None);
    let response = get(app, "/api/v1/hosting/expiring?days=120").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/hosting/{id}/history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_history_lists_ledger_newest_first(pool: PgPool) {
    let today = Utc::now().date_naive();
    let client_id = seed_client(&pool, None).await;
    let project_id =
        seed_hosted_project(&pool, client_id, "Shop", today + Duration::days(30)).await;

    let app = build_test_app(pool, MockMailer::new(), None);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/hosting/{project_id}/renew"),
        json!({ "duration_months": 6 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, &format!("/api/v1/hosting/{project_id}/history")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["action"], "renew");
    assert_eq!(data[1]["action"], "initial");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_history_unknown_project(pool: PgPool) {
    let app = build_test_app(pool, MockMailer::new(), None);
    let response = get(app, "/api/v1/hosting/9999/history").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/hosting/{id}/renew
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_renew_extends_from_current_expiry(pool: PgPool) {
    let today = Utc::now().date_naive();
    let expiry = today + Duration::days(10);
    let client_id = seed_client(&pool, None).await;
    let project_id = seed_hosted_project(&pool, client_id, "Shop", expiry).await;

    let app = build_test_app(pool, MockMailer::new(), None);
    let response = post_json(
        app,
        &format!("/api/v1/hosting/{project_id}/renew"),
        json!({ "duration_months": 12, "notes": "paid by bank transfer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let expected = webdesk_core::dates::add_months(expiry, 12);
    assert_eq!(json["data"]["history"]["start_date"], expiry.to_string());
    assert_eq!(json["data"]["history"]["expiry_date"], expected.to_string());
    assert_eq!(json["data"]["history"]["notes"], "paid by bank transfer");
    assert_eq!(
        json["data"]["project"]["hosting_expiry_date"],
        expected.to_string()
    );
    assert_eq!(json["data"]["project"]["hosting_duration_months"], 24);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_renew_rejects_out_of_range_duration(pool: PgPool) {
    let today = Utc::now().date_naive();
    let client_id = seed_client(&pool, None).await;
    let project_id =
        seed_hosted_project(&pool, client_id, "Shop", today + Duration::days(10)).await;

    let app = build_test_app(pool, MockMailer::new(), None);

    for months in [0, 37] {
        let response = post_json(
            app.clone(),
            &format!("/api/v1/hosting/{project_id}/renew"),
            json!({ "duration_months": months }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/hosting/{id}/upgrade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_upgrade_switches_package_without_moving_expiry(pool: PgPool) {
    let today = Utc::now().date_naive();
    let expiry = today + Duration::days(40);
    let client_id = seed_client(&pool, None).await;
    let project_id = seed_hosted_project(&pool, client_id, "Shop", expiry).await;

    let app = build_test_app(pool, MockMailer::new(), None);
    let response = post_json(
        app,
        &format!("/api/v1/hosting/{project_id}/upgrade"),
        json!({ "new_package": "vps", "new_price": 3000000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["history"]["action"], "upgrade");
    assert_eq!(json["data"]["history"]["package_from"], "basic");
    assert_eq!(json["data"]["history"]["package_to"], "vps");
    assert_eq!(json["data"]["history"]["duration_months"], 0);
    assert_eq!(json["data"]["project"]["hosting_package"], "vps");
    assert_eq!(json["data"]["project"]["hosting_price"], 3000000);
    assert_eq!(
        json["data"]["project"]["hosting_expiry_date"],
        expiry.to_string()
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_upgrade_rejects_negative_price(pool: PgPool) {
    let today = Utc::now().date_naive();
    let client_id = seed_client(&pool, None).await;
    let project_id =
        seed_hosted_project(&pool, client_id, "Shop", today + Duration::days(40)).await;

    let app = build_test_app(pool, MockMailer::new(), None);
    let response = post_json(
        app,
        &format!("/api/v1/hosting/{project_id}/upgrade"),
        json!({ "new_package": "vps", "new_price": -1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

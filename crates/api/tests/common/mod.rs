#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;

use webdesk_api::config::ServerConfig;
use webdesk_api::notify::{Dispatcher, ExpiryScanner};
use webdesk_api::routes;
use webdesk_api::state::AppState;
use webdesk_db::models::client::CreateClient;
use webdesk_db::models::enums::{HostingPackage, PaymentStatus, ProjectStatus};
use webdesk_db::models::project::CreateProject;
use webdesk_db::repositories::{ClientRepo, ProjectRepo};
use webdesk_mailer::{MailError, Mailer};

// ---------------------------------------------------------------------------
// Mock mailer
// ---------------------------------------------------------------------------

/// One message captured by [`MockMailer`].
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// In-memory [`Mailer`] for tests: records every message, and fails
/// delivery to any address registered via [`MockMailer::fail_for`].
#[derive(Default)]
pub struct MockMailer {
    outbox: Mutex<Vec<SentMail>>,
    failing: Mutex<Vec<String>>,
}

impl MockMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make delivery to `address` fail from now on.
    pub fn fail_for(&self, address: &str) {
        self.failing.lock().unwrap().push(address.to_string());
    }

    pub fn outbox(&self) -> Vec<SentMail> {
        self.outbox.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.outbox.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        if self.failing.lock().unwrap().iter().any(|a| a == to) {
            return Err(MailError::Build("mock delivery failure".to_string()));
        }
        self.outbox.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and the given admin
/// escalation address.
pub fn test_config(admin_email: Option<&str>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_email: admin_email.map(str::to_string),
        lookahead_days: 7,
    }
}

/// Build the application router with the full middleware stack, the
/// given pool and mailer, and an optional admin address.
///
/// This mirrors the router construction in `main.rs` (minus CORS,
/// which needs no exercise here) so integration tests go through the
/// same request plumbing that production uses.
pub fn build_test_app(pool: PgPool, mailer: Arc<MockMailer>, admin_email: Option<&str>) -> Router {
    let config = test_config(admin_email);

    let dispatcher = Arc::new(Dispatcher::new(pool.clone(), mailer));
    let scanner = Arc::new(ExpiryScanner::new(
        pool.clone(),
        Arc::clone(&dispatcher),
        config.admin_email.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        dispatcher,
        scanner,
    };

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST with an empty body, for endpoints whose body is optional.
pub async fn post_empty(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn seed_client(pool: &PgPool, email: Option<&str>) -> i64 {
    ClientRepo::create(
        pool,
        &CreateClient {
            name: "Anh Minh".to_string(),
            email: email.map(str::to_string),
            phone: None,
            company: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// A production project on own hosting with the given expiry date.
pub fn hosted_project(client_id: i64, name: &str, expiry: NaiveDate) -> CreateProject {
    CreateProject {
        client_id,
        name: name.to_string(),
        domain_name: Some("example.vn".to_string()),
        status: Some(ProjectStatus::Production),
        using_own_hosting: Some(true),
        hosting_package: Some(HostingPackage::Basic),
        hosting_price: Some(500_000),
        hosting_start_date: Some(expiry - chrono::Duration::days(365)),
        hosting_duration_months: Some(12),
        hosting_expiry_date: Some(expiry),
        project_price: Some(10_000_000),
        deposit_amount: Some(3_000_000),
        payment_due_date: None,
        payment_status: Some(PaymentStatus::DepositPaid),
    }
}

pub async fn seed_hosted_project(
    pool: &PgPool,
    client_id: i64,
    name: &str,
    expiry: NaiveDate,
) -> i64 {
    ProjectRepo::create(pool, &hosted_project(client_id, name, expiry))
        .await
        .unwrap()
        .id
}

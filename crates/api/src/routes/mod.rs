//! Route definitions.

pub mod health;
pub mod hosting;
pub mod notification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /hosting/expiring                    expiring-soon listing
/// /hosting/{project_id}/history        hosting ledger, newest first
/// /hosting/{project_id}/renew          extend the term (POST)
/// /hosting/{project_id}/upgrade        switch package (POST)
///
/// /notifications/send                  manual send, dedupe bypassed (POST)
/// /notifications/scan                  run the expiry scan now (POST)
/// /notifications/project/{project_id}  per-project audit log
/// /notifications/logs                  paginated global audit log
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/hosting", hosting::router())
        .nest("/notifications", notification::router())
}

//! Route definitions for the `/notifications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// POST   /send                     -> send (manual, dedupe bypassed)
/// POST   /scan                     -> run_scan
/// GET    /project/{project_id}     -> project_logs
/// GET    /logs                     -> all_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(notification::send))
        .route("/scan", post(notification::run_scan))
        .route("/project/{project_id}", get(notification::project_logs))
        .route("/logs", get(notification::all_logs))
}

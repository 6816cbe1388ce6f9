//! Route definitions for the `/hosting` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::hosting;
use crate::state::AppState;

/// Routes mounted at `/hosting`.
///
/// ```text
/// GET    /expiring                 -> expiring
/// GET    /{project_id}/history     -> history
/// POST   /{project_id}/renew       -> renew
/// POST   /{project_id}/upgrade     -> upgrade
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/expiring", get(hosting::expiring))
        .route("/{project_id}/history", get(hosting::history))
        .route("/{project_id}/renew", post(hosting::renew))
        .route("/{project_id}/upgrade", post(hosting::upgrade))
}

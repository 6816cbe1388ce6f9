//! Liveness endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /health
///
/// Returns `ok` plus a database round-trip check.
pub async fn health(State(state): State<AppState>) -> AppResult<Json<Value>> {
    webdesk_db::health_check(&state.pool).await?;

    Ok(Json(json!({
        "status": "ok",
        "database": "ok",
    })))
}

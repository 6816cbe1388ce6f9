//! Handlers for the `/notifications` resource: the manual send
//! trigger, the on-demand scan, and the audit log listings.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use webdesk_core::error::CoreError;
use webdesk_core::types::DbId;
use webdesk_db::models::enums::{NotificationType, RecipientType};
use webdesk_db::models::notification_log::{NotificationLog, NotificationLogWithProject};
use webdesk_db::repositories::{NotificationLogRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::notify::{DispatchOutcome, ScanError, ScanReport};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /notifications/send`.
#[derive(Debug, Deserialize)]
pub struct SendNotificationRequest {
    pub project_id: DbId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
}

/// Response body for a manual send: per-recipient outcomes.
#[derive(Debug, Serialize)]
pub struct SendNotificationResponse {
    pub sent: usize,
    pub failed: usize,
    pub results: Vec<DispatchOutcome>,
}

/// Request body for `POST /notifications/scan`.
#[derive(Debug, Default, Deserialize)]
pub struct RunScanRequest {
    /// Lookahead in days; defaults to the configured window.
    pub days: Option<i64>,
}

/// Query parameters for `GET /notifications/logs`.
#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    /// 1-based page number. Defaults to 1.
    pub page: Option<i64>,
}

/// Page size for the global log listing.
const LOGS_PER_PAGE: i64 = 30;

/// Cap on the per-project log listing.
const PROJECT_LOGS_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/notifications/send
///
/// Manually send one notification for one project to client and
/// admin. Bypasses the dedupe window, so an operator can always force a
/// re-send. Fails with 422 if neither recipient has a usable email
/// (zero attempts were made, distinct from a delivery failure).
pub async fn send(
    State(state): State<AppState>,
    Json(input): Json<SendNotificationRequest>,
) -> AppResult<Json<DataResponse<SendNotificationResponse>>> {
    let project = ProjectRepo::find_with_client(&state.pool, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    let client_email = project
        .client_email
        .as_deref()
        .filter(|e| !e.trim().is_empty());
    let admin_email = state
        .config
        .admin_email
        .as_deref()
        .filter(|e| !e.trim().is_empty());

    if client_email.is_none() && admin_email.is_none() {
        return Err(AppError::NothingToSend);
    }

    let mut results = Vec::new();
    if let Some(email) = client_email {
        let outcome = state
            .dispatcher
            .dispatch(
                &project,
                input.notification_type,
                email,
                RecipientType::Client,
                true,
            )
            .await?;
        results.push(outcome);
    }
    if let Some(email) = admin_email {
        let outcome = state
            .dispatcher
            .dispatch(
                &project,
                input.notification_type,
                email,
                RecipientType::Admin,
                true,
            )
            .await?;
        results.push(outcome);
    }

    let sent = results.iter().filter(|r| r.is_sent()).count();
    let failed = results.len() - sent;

    Ok(Json(DataResponse {
        data: SendNotificationResponse {
            sent,
            failed,
            results,
        },
    }))
}

/// POST /api/v1/notifications/scan
///
/// Run a full expiry scan now, with an optional lookahead override.
/// Returns 409 if a scan is already in progress.
pub async fn run_scan(
    State(state): State<AppState>,
    input: Option<Json<RunScanRequest>>,
) -> AppResult<Json<DataResponse<ScanReport>>> {
    let days = input
        .and_then(|Json(req)| req.days)
        .unwrap_or(state.config.lookahead_days);

    if days < 0 {
        return Err(AppError::Core(CoreError::validation(
            "days must be zero or positive",
        )));
    }

    let report = state.scanner.run_scan(days).await.map_err(|e| match e {
        ScanError::InProgress => AppError::ScanInProgress,
        ScanError::Database(db) => AppError::Database(db),
    })?;

    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/notifications/project/{project_id}
///
/// The project's most recent log rows, capped at 50.
pub async fn project_logs(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<NotificationLog>>>> {
    if ProjectRepo::find_by_id(&state.pool, project_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }

    let data =
        NotificationLogRepo::list_for_project(&state.pool, project_id, PROJECT_LOGS_LIMIT).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/notifications/logs
///
/// All log rows, newest first, 30 per page, with project names.
pub async fn all_logs(
    State(state): State<AppState>,
    Query(params): Query<LogsQuery>,
) -> AppResult<Json<PageResponse<NotificationLogWithProject>>> {
    let page = params.page.unwrap_or(1).max(1);

    let (rows, total) = NotificationLogRepo::list_paginated(&state.pool, page, LOGS_PER_PAGE).await?;

    Ok(Json(PageResponse {
        data: rows,
        page,
        per_page: LOGS_PER_PAGE,
        total,
    }))
}

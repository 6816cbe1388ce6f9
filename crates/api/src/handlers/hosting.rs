//! Handlers for the `/hosting` resource: the hosting lifecycle ledger
//! and the expiring-soon listing.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use webdesk_core::dates::{days_until, MAX_RENEWAL_MONTHS, MIN_RENEWAL_MONTHS};
use webdesk_core::deadline::DeadlineFraming;
use webdesk_core::error::CoreError;
use webdesk_core::types::DbId;
use webdesk_db::models::hosting_history::{HostingHistory, RenewHosting, UpgradeHosting};
use webdesk_db::models::project::{Project, ProjectWithClient};
use webdesk_db::repositories::{HostingHistoryRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /hosting/expiring`.
#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    /// Lookahead window in days. Defaults to 30.
    pub days: Option<i64>,
}

/// Default lookahead for the expiring listing.
const DEFAULT_EXPIRING_DAYS: i64 = 30;

/// One row of the expiring listing: the project annotated with how
/// urgent it is.
#[derive(Debug, Serialize)]
pub struct ExpiringProject {
    #[serde(flatten)]
    pub project: ProjectWithClient,
    /// Signed whole days until expiry; negative means overdue.
    pub days_until_expiry: i64,
    /// True once the expiry day has arrived, matching the urgent
    /// register in notification emails.
    pub is_expired: bool,
}

/// Result of a ledger mutation: the new entry plus the updated project.
#[derive(Debug, Serialize)]
pub struct LedgerUpdate {
    pub history: HostingHistory,
    pub project: Project,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/hosting/expiring
///
/// Own-hosting projects expiring within the window (including already
/// expired ones), most urgent first.
pub async fn expiring(
    State(state): State<AppState>,
    Query(params): Query<ExpiringQuery>,
) -> AppResult<Json<DataResponse<Vec<ExpiringProject>>>> {
    let days = params.days.unwrap_or(DEFAULT_EXPIRING_DAYS);
    let today = Utc::now().date_naive();
    let threshold = today + Duration::days(days);

    let projects = ProjectRepo::list_expiring(&state.pool, threshold).await?;

    let data = projects
        .into_iter()
        .map(|p| {
            // list_expiring only returns rows with an expiry date.
            let expiry = p.project.hosting_expiry_date.unwrap_or(today);
            ExpiringProject {
                days_until_expiry: days_until(today, expiry),
                is_expired: DeadlineFraming::classify(today, expiry).is_past_or_today(),
                project: p,
            }
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/hosting/{project_id}/history
///
/// The project's ledger entries, newest first.
pub async fn history(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<HostingHistory>>>> {
    require_project(&state, project_id).await?;

    let data = HostingHistoryRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/hosting/{project_id}/renew
///
/// Extend the hosting term. The new term starts at the current expiry
/// so renewing early never loses time.
pub async fn renew(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<RenewHosting>,
) -> AppResult<Json<DataResponse<LedgerUpdate>>> {
    if !(MIN_RENEWAL_MONTHS..=MAX_RENEWAL_MONTHS).contains(&input.duration_months) {
        return Err(AppError::Core(CoreError::validation(format!(
            "duration_months must be between {MIN_RENEWAL_MONTHS} and {MAX_RENEWAL_MONTHS}"
        ))));
    }

    let project = require_project(&state, project_id).await?;

    let today = Utc::now().date_naive();
    let (history, project) = HostingHistoryRepo::renew(
        &state.pool,
        &project,
        input.duration_months,
        input.notes,
        today,
    )
    .await?;

    Ok(Json(DataResponse {
        data: LedgerUpdate { history, project },
    }))
}

/// POST /api/v1/hosting/{project_id}/upgrade
///
/// Switch the hosting package. Never touches the expiry date.
pub async fn upgrade(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpgradeHosting>,
) -> AppResult<Json<DataResponse<LedgerUpdate>>> {
    if input.new_price < 0 {
        return Err(AppError::Core(CoreError::validation(
            "new_price must be zero or positive",
        )));
    }

    let project = require_project(&state, project_id).await?;

    let today = Utc::now().date_naive();
    let (history, project) = HostingHistoryRepo::upgrade(
        &state.pool,
        &project,
        input.new_package,
        input.new_price,
        input.notes,
        today,
    )
    .await?;

    Ok(Json(DataResponse {
        data: LedgerUpdate { history, project },
    }))
}

/// Load a project or fail with 404.
async fn require_project(state: &AppState, project_id: DbId) -> Result<Project, AppError> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
}

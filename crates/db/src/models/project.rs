//! Project entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use webdesk_core::types::{Amount, DbId, Timestamp};

use crate::models::enums::{HostingPackage, PaymentStatus, ProjectStatus};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub client_id: DbId,
    pub name: String,
    pub domain_name: Option<String>,
    pub status: ProjectStatus,

    pub using_own_hosting: bool,
    pub hosting_package: Option<HostingPackage>,
    pub hosting_price: Amount,
    pub hosting_start_date: Option<NaiveDate>,
    pub hosting_duration_months: Option<i32>,
    pub hosting_expiry_date: Option<NaiveDate>,

    pub project_price: Amount,
    pub deposit_amount: Amount,
    /// Always `project_price - deposit_amount`; the repository
    /// recomputes it on every write that touches either side.
    pub remaining_amount: Amount,
    pub payment_due_date: Option<NaiveDate>,
    pub payment_status: PaymentStatus,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project joined with its client's contact fields. Used wherever a
/// notification may be rendered (the greeting and recipient need the
/// client), so candidates are loaded in one query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithClient {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    pub client_name: String,
    pub client_email: Option<String>,
}

/// DTO for creating a new project.
///
/// When `using_own_hosting` is set together with start and expiry
/// dates, the repository also writes the `initial` hosting ledger
/// entry in the same transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub client_id: DbId,
    pub name: String,
    pub domain_name: Option<String>,
    /// Defaults to `pending` if omitted.
    pub status: Option<ProjectStatus>,

    pub using_own_hosting: Option<bool>,
    pub hosting_package: Option<HostingPackage>,
    pub hosting_price: Option<Amount>,
    pub hosting_start_date: Option<NaiveDate>,
    pub hosting_duration_months: Option<i32>,
    pub hosting_expiry_date: Option<NaiveDate>,

    pub project_price: Option<Amount>,
    pub deposit_amount: Option<Amount>,
    pub payment_due_date: Option<NaiveDate>,
    /// Defaults to `unpaid` if omitted.
    pub payment_status: Option<PaymentStatus>,
}

//! Hosting ledger entity model and request DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use webdesk_core::types::{Amount, DbId, Timestamp};

use crate::models::enums::{HostingAction, HostingPackage};

/// A row from the append-only `hosting_histories` ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HostingHistory {
    pub id: DbId,
    pub project_id: DbId,
    pub action: HostingAction,
    pub package_from: Option<HostingPackage>,
    pub package_to: Option<HostingPackage>,
    pub price: Amount,
    /// Months purchased by this entry. Zero for upgrades, which never
    /// extend the term.
    pub duration_months: i32,
    pub start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// Insert payload for a ledger entry. Built by the repository from a
/// validated renew/upgrade request, or by project creation for the
/// `initial` entry.
#[derive(Debug, Clone)]
pub struct NewHostingHistory {
    pub project_id: DbId,
    pub action: HostingAction,
    pub package_from: Option<HostingPackage>,
    pub package_to: Option<HostingPackage>,
    pub price: Amount,
    pub duration_months: i32,
    pub start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub notes: Option<String>,
}

/// Request body for `POST /hosting/{project_id}/renew`.
#[derive(Debug, Clone, Deserialize)]
pub struct RenewHosting {
    pub duration_months: i32,
    pub notes: Option<String>,
}

/// Request body for `POST /hosting/{project_id}/upgrade`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpgradeHosting {
    pub new_package: HostingPackage,
    pub new_price: Amount,
    pub notes: Option<String>,
}

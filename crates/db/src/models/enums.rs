//! Closed domain enums backing the TEXT columns in the schema.
//!
//! Each derives `sqlx::Type` with `type_name = "text"`, so it encodes
//! and decodes as a plain string against the TEXT columns, and
//! serializes the same snake_case spelling over the API.

use serde::{Deserialize, Serialize};

/// Hosting package tier offered on our own infrastructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HostingPackage {
    Basic,
    Standard,
    Advanced,
    Vps,
}

impl HostingPackage {
    /// Wire/database spelling, also used in email bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Advanced => "advanced",
            Self::Vps => "vps",
        }
    }
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Pending,
    InProgress,
    Demo,
    Production,
    Completed,
    Cancelled,
}

/// Payment progress on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    DepositPaid,
    FullyPaid,
}

/// Hosting ledger action. Entries are immutable once written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HostingAction {
    Initial,
    Renew,
    Upgrade,
}

/// What a notification is about. Adding a variant forces every
/// renderer and dispatcher match to be extended at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    HostingExpiry,
    PaymentDue,
}

impl NotificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HostingExpiry => "hosting_expiry",
            Self::PaymentDue => "payment_due",
        }
    }
}

/// Who a notification was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RecipientType {
    Client,
    Admin,
}

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Sent,
    Failed,
}

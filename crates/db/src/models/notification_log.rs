//! Notification audit log entity model.

use serde::Serialize;
use sqlx::FromRow;
use webdesk_core::types::{DbId, Timestamp};

use crate::models::enums::{NotificationStatus, NotificationType, RecipientType};

/// A row from the append-only `notification_logs` table.
///
/// One row per delivery attempt, sent or failed, manual or scheduled.
/// Rows are never updated or deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationLog {
    pub id: DbId,
    pub project_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub recipient_email: String,
    pub recipient_type: RecipientType,
    pub status: NotificationStatus,
    pub error_message: Option<String>,
    pub is_manual: bool,
    pub created_at: Timestamp,
}

/// Insert payload for a notification log row.
#[derive(Debug, Clone)]
pub struct NewNotificationLog {
    pub project_id: DbId,
    pub notification_type: NotificationType,
    pub recipient_email: String,
    pub recipient_type: RecipientType,
    pub status: NotificationStatus,
    pub error_message: Option<String>,
    pub is_manual: bool,
}

/// A log row joined with its project's name, for the global audit
/// listing in the admin UI.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationLogWithProject {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub log: NotificationLog,
    pub project_name: String,
}

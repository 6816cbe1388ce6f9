//! Repository for the append-only `notification_logs` table.

use sqlx::PgPool;
use webdesk_core::types::{DbId, Timestamp};

use crate::models::enums::NotificationType;
use crate::models::notification_log::{
    NewNotificationLog, NotificationLog, NotificationLogWithProject,
};

/// Column list shared across queries to avoid repetition. `type` is a
/// reserved word, hence the quoting.
const COLUMNS: &str = "id, project_id, \"type\", recipient_email, recipient_type, \
     status, error_message, is_manual, created_at";

/// Provides operations for notification logs.
pub struct NotificationLogRepo;

impl NotificationLogRepo {
    /// Append one log row. Every dispatch attempt writes exactly one
    /// row, whether it succeeded or failed.
    pub async fn insert(
        pool: &PgPool,
        entry: &NewNotificationLog,
    ) -> Result<NotificationLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_logs
                 (project_id, \"type\", recipient_email, recipient_type,
                  status, error_message, is_manual)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationLog>(&query)
            .bind(entry.project_id)
            .bind(entry.notification_type)
            .bind(&entry.recipient_email)
            .bind(entry.recipient_type)
            .bind(entry.status)
            .bind(&entry.error_message)
            .bind(entry.is_manual)
            .fetch_one(pool)
            .await
    }

    /// Whether a non-manual successful notification of this type was
    /// sent for the project at or after `cutoff`.
    ///
    /// Failed attempts never suppress the next scan, and manual sends
    /// never count against the scheduled ones.
    pub async fn recently_sent(
        pool: &PgPool,
        project_id: DbId,
        notification_type: NotificationType,
        cutoff: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM notification_logs
                 WHERE project_id = $1
                   AND \"type\" = $2
                   AND status = 'sent'
                   AND NOT is_manual
                   AND created_at >= $3
             )",
        )
        .bind(project_id)
        .bind(notification_type)
        .bind(cutoff)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// A project's most recent log rows, capped at `limit`.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
    ) -> Result<Vec<NotificationLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_logs
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, NotificationLog>(&query)
            .bind(project_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// One page of all log rows (newest first) joined with project
    /// names, plus the total row count for the pager.
    pub async fn list_paginated(
        pool: &PgPool,
        page: i64,
        per_page: i64,
    ) -> Result<(Vec<NotificationLogWithProject>, i64), sqlx::Error> {
        let offset = (page.max(1) - 1) * per_page;

        let query = "SELECT n.id, n.project_id, n.\"type\", n.recipient_email,
                    n.recipient_type, n.status, n.error_message, n.is_manual,
                    n.created_at, p.name AS project_name
             FROM notification_logs n
             JOIN projects p ON p.id = n.project_id
             ORDER BY n.created_at DESC, n.id DESC
             LIMIT $1 OFFSET $2";
        let rows = sqlx::query_as::<_, NotificationLogWithProject>(query)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notification_logs")
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }
}

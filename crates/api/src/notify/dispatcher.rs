//! Single-notification dispatch.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use webdesk_db::models::enums::{
    NotificationStatus, NotificationType, RecipientType,
};
use webdesk_db::models::notification_log::NewNotificationLog;
use webdesk_db::models::project::ProjectWithClient;
use webdesk_db::repositories::NotificationLogRepo;
use webdesk_db::DbPool;
use webdesk_mailer::{template, Mailer};

/// Per-recipient result of a dispatch, returned to manual-send callers.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub email: String,
    pub recipient_type: RecipientType,
    pub status: NotificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        self.status == NotificationStatus::Sent
    }
}

/// Renders and delivers exactly one notification to exactly one
/// recipient, and unconditionally records the outcome.
pub struct Dispatcher {
    pool: DbPool,
    mailer: Arc<dyn Mailer>,
}

impl Dispatcher {
    pub fn new(pool: DbPool, mailer: Arc<dyn Mailer>) -> Self {
        Self { pool, mailer }
    }

    /// Render, attempt delivery, and append one notification log row.
    ///
    /// Mailer failures never propagate: they become a `failed` log row
    /// and a `failed` outcome. The returned `Err` only covers the log
    /// write itself; a project's notification must never be counted
    /// as handled without its audit row.
    ///
    /// Dedupe is the caller's concern; calling this twice with the
    /// same arguments sends twice and logs twice.
    pub async fn dispatch(
        &self,
        project: &ProjectWithClient,
        notification_type: NotificationType,
        recipient_email: &str,
        recipient_type: RecipientType,
        is_manual: bool,
    ) -> Result<DispatchOutcome, sqlx::Error> {
        let today = Utc::now().date_naive();
        let mail = template::render(project, notification_type, recipient_type, today);

        let send_result = self
            .mailer
            .send(recipient_email, &mail.subject, &mail.body)
            .await;

        let (status, error_message) = match &send_result {
            Ok(()) => (NotificationStatus::Sent, None),
            Err(e) => {
                tracing::warn!(
                    project_id = project.project.id,
                    notification_type = notification_type.as_str(),
                    to = recipient_email,
                    error = %e,
                    "Notification delivery failed"
                );
                (NotificationStatus::Failed, Some(e.to_string()))
            }
        };

        NotificationLogRepo::insert(
            &self.pool,
            &NewNotificationLog {
                project_id: project.project.id,
                notification_type,
                recipient_email: recipient_email.to_string(),
                recipient_type,
                status,
                error_message: error_message.clone(),
                is_manual,
            },
        )
        .await?;

        Ok(DispatchOutcome {
            email: recipient_email.to_string(),
            recipient_type,
            status,
            error: error_message,
        })
    }
}

//! Batch scan for approaching hosting and payment deadlines.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use webdesk_db::models::enums::{NotificationType, RecipientType};
use webdesk_db::models::project::ProjectWithClient;
use webdesk_db::repositories::{NotificationLogRepo, ProjectRepo};
use webdesk_db::DbPool;

use crate::notify::{Dispatcher, DEDUPE_WINDOW_DAYS};

/// What a single scan run did, for operator visibility.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ScanReport {
    /// Attempts that were delivered.
    pub emails_sent: u32,
    /// Attempts whose delivery failed (each still logged).
    pub emails_failed: u32,
    /// (project, type) pairs suppressed by the dedupe window.
    pub skipped_recent: u32,
    /// Projects matched by the hosting pass.
    pub hosting_candidates: u32,
    /// Projects matched by the payment pass.
    pub payment_candidates: u32,
}

/// Error type for a scan invocation.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Another run is still in progress; runs never overlap.
    #[error("an expiry scan is already in progress")]
    InProgress,

    /// The candidate queries failed; nothing was dispatched.
    #[error("scan query failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Finds projects needing a reminder and dispatches to client and
/// admin, skipping pairs notified non-manually within the last
/// [`DEDUPE_WINDOW_DAYS`] days.
///
/// One instance is shared between the daily background task and the
/// on-demand scan endpoint; the internal mutex guarantees a run never
/// starts while another is still going.
pub struct ExpiryScanner {
    pool: DbPool,
    dispatcher: Arc<Dispatcher>,
    admin_email: Option<String>,
    running: Mutex<()>,
}

impl ExpiryScanner {
    pub fn new(pool: DbPool, dispatcher: Arc<Dispatcher>, admin_email: Option<String>) -> Self {
        // Treat a blank configured address the same as no address.
        let admin_email = admin_email.filter(|e| !e.trim().is_empty());
        Self {
            pool,
            dispatcher,
            admin_email,
            running: Mutex::new(()),
        }
    }

    /// Run one full scan with the given lookahead.
    ///
    /// Both passes are independent: a project whose hosting and
    /// payment are both due gets both notifications. A failure for
    /// one project never stops the scan; it is logged and the scan
    /// moves on.
    pub async fn run_scan(&self, days_ahead: i64) -> Result<ScanReport, ScanError> {
        let _guard = self.running.try_lock().map_err(|_| ScanError::InProgress)?;

        let today = Utc::now().date_naive();
        // DATE comparison is inclusive of the whole threshold day.
        let threshold = today + Duration::days(days_ahead);

        tracing::info!(days_ahead, %threshold, "Expiry scan started");

        let mut report = ScanReport::default();

        let hosting = ProjectRepo::hosting_candidates(&self.pool, threshold).await?;
        report.hosting_candidates = hosting.len() as u32;
        self.process_pass(&hosting, NotificationType::HostingExpiry, &mut report)
            .await;

        let payment = ProjectRepo::payment_candidates(&self.pool, threshold).await?;
        report.payment_candidates = payment.len() as u32;
        self.process_pass(&payment, NotificationType::PaymentDue, &mut report)
            .await;

        tracing::info!(
            emails_sent = report.emails_sent,
            emails_failed = report.emails_failed,
            skipped_recent = report.skipped_recent,
            "Expiry scan finished"
        );

        Ok(report)
    }

    /// Process one candidate list for one notification type.
    async fn process_pass(
        &self,
        candidates: &[ProjectWithClient],
        notification_type: NotificationType,
        report: &mut ScanReport,
    ) {
        let cutoff = Utc::now() - Duration::days(DEDUPE_WINDOW_DAYS);

        for candidate in candidates {
            let project_id = candidate.project.id;

            match NotificationLogRepo::recently_sent(
                &self.pool,
                project_id,
                notification_type,
                cutoff,
            )
            .await
            {
                Ok(true) => {
                    tracing::debug!(
                        project_id,
                        notification_type = notification_type.as_str(),
                        "Skipped, already notified within the dedupe window"
                    );
                    report.skipped_recent += 1;
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    // Without a dedupe answer we might double-send, so
                    // skip this project and let tomorrow's run retry.
                    tracing::error!(project_id, error = %e, "Dedupe check failed, skipping project");
                    continue;
                }
            }

            if let Some(email) = candidate.client_email.as_deref().filter(|e| !e.is_empty()) {
                self.dispatch_counted(
                    candidate,
                    notification_type,
                    email,
                    RecipientType::Client,
                    report,
                )
                .await;
            }

            if let Some(email) = self.admin_email.as_deref() {
                self.dispatch_counted(
                    candidate,
                    notification_type,
                    email,
                    RecipientType::Admin,
                    report,
                )
                .await;
            }
        }
    }

    /// Dispatch one recipient and fold the outcome into the report.
    async fn dispatch_counted(
        &self,
        candidate: &ProjectWithClient,
        notification_type: NotificationType,
        email: &str,
        recipient_type: RecipientType,
        report: &mut ScanReport,
    ) {
        match self
            .dispatcher
            .dispatch(candidate, notification_type, email, recipient_type, false)
            .await
        {
            Ok(outcome) if outcome.is_sent() => report.emails_sent += 1,
            Ok(_) => report.emails_failed += 1,
            Err(e) => {
                // The audit row could not be written; the attempt is
                // counted as failed and the scan continues.
                tracing::error!(
                    project_id = candidate.project.id,
                    error = %e,
                    "Failed to record notification outcome"
                );
                report.emails_failed += 1;
            }
        }
    }
}

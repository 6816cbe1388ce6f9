//! Daily expiry notification scan.
//!
//! Spawns a background task that runs the [`ExpiryScanner`] once per
//! day using `tokio::time::interval`. The first tick fires at
//! startup, so a freshly deployed instance catches up immediately.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::notify::{ExpiryScanner, ScanError};

/// How often the scan runs.
const SCAN_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Run the daily scan loop until `cancel` is triggered.
///
/// `days_ahead` is the configured lookahead window. Scan failures are
/// logged and the loop keeps going; a run refused because another is
/// in progress (manual trigger racing the schedule) is only a debug
/// event.
pub async fn run(scanner: Arc<ExpiryScanner>, days_ahead: i64, cancel: CancellationToken) {
    tracing::info!(
        days_ahead,
        interval_secs = SCAN_INTERVAL.as_secs(),
        "Expiry scan job started"
    );

    let mut interval = tokio::time::interval(SCAN_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Expiry scan job stopping");
                break;
            }
            _ = interval.tick() => {
                match scanner.run_scan(days_ahead).await {
                    Ok(report) => {
                        tracing::info!(
                            emails_sent = report.emails_sent,
                            emails_failed = report.emails_failed,
                            skipped_recent = report.skipped_recent,
                            "Scheduled expiry scan completed"
                        );
                    }
                    Err(ScanError::InProgress) => {
                        tracing::debug!("Scheduled scan skipped, another run is in progress");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Scheduled expiry scan failed");
                    }
                }
            }
        }
    }
}

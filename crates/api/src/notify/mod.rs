//! The notification subsystem: single-message dispatch and the batch
//! expiry scanner.
//!
//! [`Dispatcher`] renders one message for one recipient, attempts
//! delivery, and records the outcome in the notification log; every
//! call appends exactly one row. [`ExpiryScanner`] finds projects with
//! approaching or passed deadlines and invokes the dispatcher per
//! qualifying recipient, suppressing pairs already notified within the
//! dedupe window.

pub mod dispatcher;
pub mod scanner;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use scanner::{ExpiryScanner, ScanError, ScanReport};

/// Fixed anti-spam lookback: a non-manual successful send within this
/// many days suppresses the next scheduled send for the same
/// (project, type) pair. Deliberately independent of the configurable
/// lookahead window.
pub const DEDUPE_WINDOW_DAYS: i64 = 3;

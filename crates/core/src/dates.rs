//! Calendar arithmetic for hosting terms and deadline checks.
//!
//! Renewals extend expiry by calendar months, not fixed-length days:
//! a 12-month renewal of 2025-01-01 lands on 2026-01-01 regardless of
//! leap years. Month-end dates clamp (2025-01-31 + 1 month =
//! 2025-02-28), matching `chrono::Months` semantics.

use chrono::{Months, NaiveDate};

/// Bounds accepted for a hosting renewal term.
pub const MIN_RENEWAL_MONTHS: i32 = 1;
pub const MAX_RENEWAL_MONTHS: i32 = 36;

/// Add `months` calendar months to `date`, clamping at month end.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    // Months::new never overflows for the renewal range we accept;
    // checked_add_months only fails near NaiveDate::MAX.
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Signed number of whole days from `today` until `date`.
///
/// Negative means the date has passed; zero means it is today.
pub fn days_until(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days()
}

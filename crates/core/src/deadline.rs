//! Deadline framing for notification emails.
//!
//! A deadline (hosting expiry or payment due date) is framed one of
//! three ways depending on where it falls relative to today. The
//! framing drives both the email subject ("urgent" vs "reminder") and
//! the parenthesized day note in the body. Day zero is its own case:
//! "due today" is neither upcoming nor overdue.

use chrono::NaiveDate;

use crate::dates::days_until;

/// Where a deadline sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineFraming {
    /// The deadline is `days` whole days away (`days >= 1`).
    Upcoming { days: i64 },
    /// The deadline is today.
    Today,
    /// The deadline passed `days` whole days ago (`days >= 1`).
    Overdue { days: i64 },
}

impl DeadlineFraming {
    /// Classify `deadline` relative to `today`.
    pub fn classify(today: NaiveDate, deadline: NaiveDate) -> Self {
        match days_until(today, deadline) {
            0 => Self::Today,
            d if d > 0 => Self::Upcoming { days: d },
            d => Self::Overdue { days: -d },
        }
    }

    /// True for `Today` and `Overdue`: the deadline is no longer in
    /// the future, so notifications use the urgent register.
    pub fn is_past_or_today(self) -> bool {
        !matches!(self, Self::Upcoming { .. })
    }
}

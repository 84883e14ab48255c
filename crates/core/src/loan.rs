//! Loan status derivation.
//!
//! OVERDUE is a function of wall-clock time, not a stored field, so the
//! status must be recomputed on every read. Extending a loan shifts the
//! due date forward and always yields ONGOING, even when the item read
//! OVERDUE the instant before.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Derived status of a single loaned item. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    /// Out on loan, due date not yet passed.
    Ongoing,
    /// Out on loan, past the due date.
    Overdue,
    /// A return has been recorded. Permanent regardless of time.
    Returned,
}

/// Compute the status of an item as of `today`.
///
/// A recorded return wins over everything; an unreturned item is overdue
/// strictly after its due date.
pub fn loan_status(
    due_date: NaiveDate,
    returned_at: Option<Timestamp>,
    today: NaiveDate,
) -> LoanStatus {
    if returned_at.is_some() {
        LoanStatus::Returned
    } else if today > due_date {
        LoanStatus::Overdue
    } else {
        LoanStatus::Ongoing
    }
}

/// Compute the due date after an extension of `days`.
///
/// Extensions are valid only on non-returned items (the caller checks) and
/// must move the due date forward, so `days` below 1 is a validation
/// error. The extension is anchored at the later of the current due date
/// and `today`: since status is derived rather than stored, that anchor is
/// what makes an extended item read ONGOING immediately, even when it was
/// overdue the instant before.
pub fn extended_due_date(
    due_date: NaiveDate,
    today: NaiveDate,
    days: u64,
) -> Result<NaiveDate, CoreError> {
    if days < 1 {
        return Err(CoreError::Validation(
            "Extension must be at least 1 day".to_string(),
        ));
    }
    due_date
        .max(today)
        .checked_add_days(Days::new(days))
        .ok_or_else(|| CoreError::Validation(format!("Extension of {days} days overflows")))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn ongoing_before_due_date() {
        assert_eq!(
            loan_status(d(2025, 1, 3), None, d(2025, 1, 2)),
            LoanStatus::Ongoing
        );
    }

    #[test]
    fn ongoing_on_due_date() {
        // Due date itself is not yet overdue.
        assert_eq!(
            loan_status(d(2025, 1, 3), None, d(2025, 1, 3)),
            LoanStatus::Ongoing
        );
    }

    #[test]
    fn overdue_for_every_day_past_due() {
        let due = d(2025, 1, 3);
        for offset in 1..30 {
            let today = due + chrono::Days::new(offset);
            assert_eq!(loan_status(due, None, today), LoanStatus::Overdue);
        }
    }

    #[test]
    fn returned_wins_regardless_of_time() {
        let returned = Some(Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap());
        // Long past due and long before due both read RETURNED.
        assert_eq!(
            loan_status(d(2025, 1, 3), returned, d(2025, 6, 1)),
            LoanStatus::Returned
        );
        assert_eq!(
            loan_status(d(2025, 1, 3), returned, d(2025, 1, 1)),
            LoanStatus::Returned
        );
    }

    #[test]
    fn extension_strictly_increases_due_date() {
        let due = d(2025, 1, 3);
        let today = d(2025, 1, 2);
        let extended = extended_due_date(due, today, 5).unwrap();
        assert_eq!(extended, d(2025, 1, 8));
        assert!(extended > due);
    }

    #[test]
    fn extension_clears_overdue() {
        let due = d(2025, 1, 3);
        let today = d(2025, 1, 5);
        assert_eq!(loan_status(due, None, today), LoanStatus::Overdue);
        let extended = extended_due_date(due, today, 7).unwrap();
        assert_eq!(loan_status(extended, None, today), LoanStatus::Ongoing);
    }

    #[test]
    fn overdue_extension_always_lands_in_the_future() {
        // Even a 1-day extension on a long-overdue item reads ONGOING.
        let due = d(2025, 1, 3);
        let today = d(2025, 3, 1);
        let extended = extended_due_date(due, today, 1).unwrap();
        assert_eq!(loan_status(extended, None, today), LoanStatus::Ongoing);
    }

    #[test]
    fn zero_day_extension_rejected() {
        assert!(extended_due_date(d(2025, 1, 3), d(2025, 1, 1), 0).is_err());
    }
}

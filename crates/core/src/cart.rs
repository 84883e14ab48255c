//! Cart line vocabulary and validation.
//!
//! The cart is server-authoritative: every mutation is validated here
//! before any query is issued, and callers reconcile from the response
//! rather than trusting optimistic local state.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What a cart line (and later a booking item) refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "item_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    /// A physical, countable rental item with a per-day rate.
    Asset,
    /// A non-physical offering, optionally sold via a package.
    Service,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Asset => "ASSET",
            ItemKind::Service => "SERVICE",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a line quantity. Quantities below 1 are rejected locally.
pub fn validate_quantity(quantity: i32) -> Result<(), CoreError> {
    if quantity >= 1 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Quantity must be at least 1, got {quantity}"
        )))
    }
}

/// Validate a rental date range. Ordering is checked before checkout is
/// attempted; equal start and end (a one-day rental) is allowed.
pub fn validate_date_range(
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
) -> Result<(), CoreError> {
    if start_date <= end_date {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Start date {start_date} is after end date {end_date}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn quantity_of_one_is_valid() {
        assert!(validate_quantity(1).is_ok());
    }

    #[test]
    fn zero_quantity_rejected() {
        assert!(validate_quantity(0).is_err());
    }

    #[test]
    fn negative_quantity_rejected() {
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn ordered_date_range_is_valid() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert!(validate_date_range(start, end).is_ok());
    }

    #[test]
    fn one_day_rental_is_valid() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(validate_date_range(day, day).is_ok());
    }

    #[test]
    fn inverted_date_range_rejected() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(validate_date_range(start, end).is_err());
    }
}

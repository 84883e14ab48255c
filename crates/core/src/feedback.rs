//! Feedback rating bounds.

use crate::error::CoreError;

/// Lowest accepted rating.
pub const RATING_MIN: i16 = 1;

/// Highest accepted rating.
pub const RATING_MAX: i16 = 5;

/// Validate a feedback rating is within `1..=5`.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (RATING_MIN..=RATING_MAX).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {RATING_MIN} and {RATING_MAX}, got {rating}"
        )))
    }
}

//! Booking lifecycle state machine.
//!
//! A booking is created in `Waiting` by checkout and only ever mutated by
//! the transitions defined here. Transitions are validated in this module
//! and enforced by status-conditional updates in the repository layer, so
//! re-invoking a transition on a booking already past the required source
//! state is a conflict, never a silent no-op.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Booking lifecycle status, stored as the `booking_status` PG enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "booking_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Initial state after checkout; awaiting an admin decision.
    Waiting,
    /// Approved by an admin; payable, loans become visible.
    Confirmed,
    /// Declined by an admin. Terminal.
    Rejected,
    /// Withdrawn by the owner while still waiting. Terminal.
    Cancelled,
    /// Paid and handed over. Terminal; unlocks returns and feedback.
    Completed,
}

impl BookingStatus {
    /// The wire/database representation (`WAITING`, `CONFIRMED`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }

    /// Returns the set of statuses reachable from `self`.
    ///
    /// Terminal states return an empty slice.
    pub fn valid_transitions(self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Waiting => &[
                BookingStatus::Confirmed,
                BookingStatus::Rejected,
                BookingStatus::Cancelled,
            ],
            BookingStatus::Confirmed => &[BookingStatus::Completed],
            BookingStatus::Rejected | BookingStatus::Cancelled | BookingStatus::Completed => &[],
        }
    }

    /// Check whether a transition from `self` to `to` is allowed.
    pub fn can_transition(self, to: BookingStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        self.valid_transitions().is_empty()
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a state transition, returning a conflict for invalid ones.
pub fn validate_transition(from: BookingStatus, to: BookingStatus) -> Result<(), CoreError> {
    if from.can_transition(to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Invalid booking transition: {from} -> {to}"
        )))
    }
}

/// Matches the legacy convention of embedding the rejection reason in the
/// booking notes. Kept for rows imported from the previous system; new
/// rejections carry the reason in a dedicated column.
static REJECT_REASON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Alasan ditolak:\s*(.+)").expect("valid regex"));

/// Extract a rejection reason embedded in free-form notes.
///
/// Only the first match is considered; the legacy system never embedded
/// more than one reason per booking.
pub fn extract_reject_reason(notes: &str) -> Option<&str> {
    REJECT_REASON
        .captures(notes)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Valid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn waiting_to_confirmed() {
        assert!(BookingStatus::Waiting.can_transition(BookingStatus::Confirmed));
    }

    #[test]
    fn waiting_to_rejected() {
        assert!(BookingStatus::Waiting.can_transition(BookingStatus::Rejected));
    }

    #[test]
    fn waiting_to_cancelled() {
        assert!(BookingStatus::Waiting.can_transition(BookingStatus::Cancelled));
    }

    #[test]
    fn confirmed_to_completed() {
        assert!(BookingStatus::Confirmed.can_transition(BookingStatus::Completed));
    }

    // -----------------------------------------------------------------------
    // Invalid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn confirmed_cannot_be_cancelled() {
        assert!(!BookingStatus::Confirmed.can_transition(BookingStatus::Cancelled));
    }

    #[test]
    fn confirmed_cannot_be_rejected() {
        assert!(!BookingStatus::Confirmed.can_transition(BookingStatus::Rejected));
    }

    #[test]
    fn waiting_cannot_skip_to_completed() {
        assert!(!BookingStatus::Waiting.can_transition(BookingStatus::Completed));
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        assert!(BookingStatus::Rejected.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
    }

    #[test]
    fn double_approve_is_a_conflict() {
        // Approving an already-confirmed booking must error, not no-op.
        let err = validate_transition(BookingStatus::Confirmed, BookingStatus::Confirmed)
            .unwrap_err();
        assert!(err.to_string().contains("CONFIRMED -> CONFIRMED"));
    }

    #[test]
    fn validate_transition_accepts_approval() {
        assert!(validate_transition(BookingStatus::Waiting, BookingStatus::Confirmed).is_ok());
    }

    // -----------------------------------------------------------------------
    // Legacy reject reason extraction
    // -----------------------------------------------------------------------

    #[test]
    fn extracts_embedded_reject_reason() {
        let notes = "Barang habis. Alasan ditolak: stok tidak tersedia";
        assert_eq!(
            extract_reject_reason(notes),
            Some("stok tidak tersedia")
        );
    }

    #[test]
    fn extracts_first_reason_only() {
        let notes = "Alasan ditolak: tanggal bentrok\nAlasan ditolak: lainnya";
        assert_eq!(extract_reject_reason(notes), Some("tanggal bentrok"));
    }

    #[test]
    fn no_reason_in_plain_notes() {
        assert_eq!(extract_reject_reason("antar sebelum jam 9"), None);
    }
}

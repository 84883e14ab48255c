//! Payment status vocabulary and gateway-status mapping.
//!
//! Local payment state is never fabricated: on reconciliation the local
//! status is overwritten by whatever [`from_gateway_status`] derives from
//! the gateway's report. The one narrow exception is a settlement-equivalent
//! gateway status backfilling a missing `paid_at` timestamp.

use serde::{Deserialize, Serialize};

/// Payment lifecycle status, stored as the `payment_status` PG enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Created at the gateway, awaiting settlement.
    Pending,
    /// Settled. Terminal.
    Paid,
    /// Denied, expired, or cancelled at the gateway. Terminal.
    Failed,
    /// Refunded after settlement. Terminal.
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
        }
    }

    /// A terminal payment no longer blocks creating a new one.
    pub fn is_terminal(self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a gateway-reported transaction status onto the local vocabulary.
///
/// Unknown statuses map to `None`; the caller keeps the local status
/// untouched rather than guessing.
pub fn from_gateway_status(gateway_status: &str) -> Option<PaymentStatus> {
    match gateway_status {
        "settlement" | "capture" => Some(PaymentStatus::Paid),
        "pending" | "authorize" => Some(PaymentStatus::Pending),
        "deny" | "cancel" | "expire" | "failure" => Some(PaymentStatus::Failed),
        "refund" | "partial_refund" | "chargeback" => Some(PaymentStatus::Refunded),
        _ => None,
    }
}

/// Whether a gateway status counts as money having settled.
///
/// Used only to backfill a missing `paid_at`; never to override the
/// status derived by [`from_gateway_status`].
pub fn is_settlement_equivalent(gateway_status: &str) -> bool {
    matches!(gateway_status, "settlement" | "capture")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settlement_maps_to_paid() {
        assert_eq!(from_gateway_status("settlement"), Some(PaymentStatus::Paid));
        assert_eq!(from_gateway_status("capture"), Some(PaymentStatus::Paid));
    }

    #[test]
    fn pending_maps_to_pending() {
        assert_eq!(from_gateway_status("pending"), Some(PaymentStatus::Pending));
    }

    #[test]
    fn failure_statuses_map_to_failed() {
        for s in ["deny", "cancel", "expire", "failure"] {
            assert_eq!(from_gateway_status(s), Some(PaymentStatus::Failed), "{s}");
        }
    }

    #[test]
    fn refund_maps_to_refunded() {
        assert_eq!(from_gateway_status("refund"), Some(PaymentStatus::Refunded));
    }

    #[test]
    fn unknown_status_maps_to_none() {
        assert_eq!(from_gateway_status("weird_new_status"), None);
    }

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(PaymentStatus::Paid.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(PaymentStatus::Refunded.is_terminal());
    }

    #[test]
    fn settlement_equivalents() {
        assert!(is_settlement_equivalent("settlement"));
        assert!(is_settlement_equivalent("capture"));
        assert!(!is_settlement_equivalent("pending"));
        assert!(!is_settlement_equivalent("refund"));
    }
}

//! Booking and booking item models and DTOs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sewakita_core::booking::{self, BookingStatus};
use sewakita_core::cart::ItemKind;
use sewakita_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub owner_id: DbId,
    pub status: BookingStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
    pub reject_reason: Option<String>,
    /// Cached at creation: sum of item subtotals as of checkout.
    pub total_amount: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    /// Backfill `reject_reason` from the legacy `"Alasan ditolak: ..."`
    /// convention embedded in notes by imported rows. Only rejected
    /// bookings without a structured reason are touched; read paths apply
    /// this so the serialized `reject_reason` is always the resolved one.
    pub fn with_resolved_reject_reason(mut self) -> Self {
        if self.status == BookingStatus::Rejected && self.reject_reason.is_none() {
            self.reject_reason = self
                .notes
                .as_deref()
                .and_then(booking::extract_reject_reason)
                .map(str::to_owned);
        }
        self
    }
}

/// A row from the `booking_items` table. Immutable after checkout except
/// for `due_date`, which loan extensions move forward.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingItem {
    pub id: DbId,
    pub booking_id: DbId,
    pub kind: ItemKind,
    pub product_id: DbId,
    pub package_id: Option<DbId>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub due_date: NaiveDate,
}

/// A booking together with its items, as returned by checkout and reads.
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithItems {
    #[serde(flatten)]
    pub booking: Booking,
    pub items: Vec<BookingItem>,
}

/// DTO for the checkout request.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutBooking {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

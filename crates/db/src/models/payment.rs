//! Payment model.

use rust_decimal::Decimal;
use serde::Serialize;
use sewakita_core::payment::PaymentStatus;
use sewakita_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub booking_id: DbId,
    /// Order id the payment was registered under at the gateway.
    pub gateway_order_id: String,
    pub amount: Decimal,
    pub method: Option<String>,
    pub status: PaymentStatus,
    pub payment_url: Option<String>,
    pub proof_url: Option<String>,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

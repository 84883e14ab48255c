//! Fine model and DTO.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sewakita_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `fines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fine {
    pub id: DbId,
    pub booking_id: DbId,
    pub amount: Decimal,
    pub notes: Option<String>,
    pub paid: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for persisting a fine. The amount starts from the proposed
/// schedule but may have been edited by the admin.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFine {
    pub booking_id: DbId,
    pub amount: Decimal,
    pub notes: Option<String>,
}

//! Return record model and DTO.

use serde::{Deserialize, Serialize};
use sewakita_core::returns::ReturnCondition;
use sewakita_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `returns` table. At most one exists per booking item.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReturnRecord {
    pub id: DbId,
    pub booking_item_id: DbId,
    pub condition: ReturnCondition,
    pub notes: Option<String>,
    pub returned_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for recording a return.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReturn {
    pub booking_item_id: DbId,
    pub condition: ReturnCondition,
    pub notes: Option<String>,
}

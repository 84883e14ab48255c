//! Return conditions and the starting fine schedule.
//!
//! Recording a return with a damaged or lost condition *proposes* a fine
//! on a fixed schedule. An admin may edit the amount before it is
//! persisted; nothing here finalizes money.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Physical condition of a returned asset, stored as the
/// `return_condition` PG enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "return_condition", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnCondition {
    Good,
    MinorDamage,
    MajorDamage,
    Lost,
}

impl ReturnCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            ReturnCondition::Good => "GOOD",
            ReturnCondition::MinorDamage => "MINOR_DAMAGE",
            ReturnCondition::MajorDamage => "MAJOR_DAMAGE",
            ReturnCondition::Lost => "LOST",
        }
    }
}

impl std::fmt::Display for ReturnCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Starting fine amount for minor damage, in rupiah.
pub const FINE_MINOR_DAMAGE: i64 = 100_000;

/// Starting fine amount for major damage or loss, in rupiah.
pub const FINE_MAJOR_DAMAGE: i64 = 500_000;

/// Proposed fine amount for a return condition.
///
/// `None` for a good-condition return: no fine is proposed at all.
pub fn proposed_fine(condition: ReturnCondition) -> Option<Decimal> {
    match condition {
        ReturnCondition::Good => None,
        ReturnCondition::MinorDamage => Some(Decimal::from(FINE_MINOR_DAMAGE)),
        ReturnCondition::MajorDamage | ReturnCondition::Lost => {
            Some(Decimal::from(FINE_MAJOR_DAMAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_condition_proposes_no_fine() {
        assert_eq!(proposed_fine(ReturnCondition::Good), None);
    }

    #[test]
    fn minor_damage_proposes_100k() {
        assert_eq!(
            proposed_fine(ReturnCondition::MinorDamage),
            Some(Decimal::from(100_000))
        );
    }

    #[test]
    fn major_damage_proposes_500k() {
        assert_eq!(
            proposed_fine(ReturnCondition::MajorDamage),
            Some(Decimal::from(500_000))
        );
    }

    #[test]
    fn lost_proposes_500k() {
        assert_eq!(
            proposed_fine(ReturnCondition::Lost),
            Some(Decimal::from(500_000))
        );
    }
}

//! Participant allocation model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::UserId;

/// The owed amount assigned to one participant of one expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantAllocation {
    /// The participant.
    pub user_id: UserId,
    /// The amount the participant owes.
    pub amount: Decimal,
    /// The participant's percentage share, present only for PERCENTAGE splits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
}

impl ParticipantAllocation {
    /// Creates an allocation without a percentage.
    pub fn new(user_id: UserId, amount: Decimal) -> Self {
        Self {
            user_id,
            amount,
            percentage: None,
        }
    }
}

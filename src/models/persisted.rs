//! Records returned by the persistence layer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ExpenseId, ParticipantId, SplitPolicy, UserId};

/// A stored participant row: one allocation of one expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedParticipant {
    /// Row identifier.
    pub id: ParticipantId,
    /// The expense this allocation belongs to.
    pub expense_id: ExpenseId,
    /// The participant.
    pub user_id: UserId,
    /// The amount the participant owes.
    pub amount: Decimal,
    /// The participant's percentage share, for PERCENTAGE splits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
}

/// A stored expense together with its participant rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedExpense {
    /// Expense identifier.
    pub id: ExpenseId,
    /// What the expense was for.
    pub description: String,
    /// The total amount of the expense.
    pub total_amount: Decimal,
    /// The date the expense was incurred.
    pub date: NaiveDate,
    /// How the total was divided.
    pub split_policy: SplitPolicy,
    /// The user who recorded the expense.
    pub creator_id: UserId,
    /// One row per participant, in the order they were submitted.
    pub participants: Vec<PersistedParticipant>,
}

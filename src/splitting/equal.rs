//! Equal split.
//!
//! Every participant owes `total / N`. The quotient is used as-is with the
//! full precision of [`Decimal`]; no remainder is redistributed, so for
//! totals that do not divide evenly the allocations may differ from the total
//! in the last significant digit.

use rust_decimal::Decimal;

use crate::error::{SplitError, SplitResult};
use crate::models::{ExpenseRequest, ParticipantAllocation};

/// Splits the expense total equally among all participants.
///
/// Amounts and percentages on the participants are ignored.
///
/// # Errors
///
/// Returns [`SplitError::EmptyParticipantSet`] when there are no participants.
///
/// # Examples
///
/// ```
/// use expense_engine::models::{ExpenseRequest, ParticipantInput, SplitPolicy};
/// use expense_engine::splitting::split_equal;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let request = ExpenseRequest {
///     description: "Hotel".to_string(),
///     total_amount: Decimal::new(3000, 0),
///     date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     split_policy: SplitPolicy::Equal,
///     creator_id: 1,
///     participants: (1..=3).map(ParticipantInput::new).collect(),
/// };
///
/// let allocations = split_equal(&request).unwrap();
/// assert_eq!(allocations.len(), 3);
/// assert!(allocations.iter().all(|a| a.amount == Decimal::new(1000, 0)));
/// ```
pub fn split_equal(request: &ExpenseRequest) -> SplitResult<Vec<ParticipantAllocation>> {
    if request.participants.is_empty() {
        return Err(SplitError::EmptyParticipantSet);
    }

    let count = Decimal::from(request.participants.len());
    let amount_per_person = request
        .total_amount
        .checked_div(count)
        .ok_or(SplitError::AmountOverflow)?;

    Ok(request
        .participants
        .iter()
        .map(|p| ParticipantAllocation::new(p.user_id, amount_per_person))
        .collect())
}

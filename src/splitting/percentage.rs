//! Percentage split.
//!
//! Every participant owes `total * percentage / 100`. The percentages must
//! add up to exactly 100.

use rust_decimal::Decimal;

use crate::error::{SplitError, SplitResult};
use crate::models::{ExpenseRequest, ParticipantAllocation};

use super::validator::{sum_percentages, total_percentage_matches};

/// Splits the expense by the percentage supplied for each participant.
///
/// Each allocation carries the participant's percentage alongside the
/// computed amount.
///
/// # Errors
///
/// - [`SplitError::EmptyParticipantSet`] when there are no participants
/// - [`SplitError::MissingPercentage`] when a participant has no percentage
/// - [`SplitError::PercentageOutOfRange`] when a percentage is outside 0 to 100
/// - [`SplitError::TotalPercentageMismatch`] when the percentages do not sum to 100
///
/// # Examples
///
/// ```
/// use expense_engine::models::{ExpenseRequest, ParticipantInput, SplitPolicy};
/// use expense_engine::splitting::split_percentage;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let request = ExpenseRequest {
///     description: "Rent".to_string(),
///     total_amount: Decimal::new(4000, 0),
///     date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     split_policy: SplitPolicy::Percentage,
///     creator_id: 1,
///     participants: vec![
///         ParticipantInput::with_percentage(1, Decimal::new(50, 0)),
///         ParticipantInput::with_percentage(2, Decimal::new(25, 0)),
///         ParticipantInput::with_percentage(3, Decimal::new(25, 0)),
///     ],
/// };
///
/// let allocations = split_percentage(&request).unwrap();
/// assert_eq!(allocations[0].amount, Decimal::new(2000, 0));
/// assert_eq!(allocations[0].percentage, Some(Decimal::new(50, 0)));
/// ```
pub fn split_percentage(request: &ExpenseRequest) -> SplitResult<Vec<ParticipantAllocation>> {
    if request.participants.is_empty() {
        return Err(SplitError::EmptyParticipantSet);
    }

    for participant in &request.participants {
        let percentage = participant.percentage.ok_or(SplitError::MissingPercentage {
            user_id: participant.user_id,
        })?;
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(SplitError::PercentageOutOfRange {
                user_id: participant.user_id,
                percentage,
            });
        }
    }

    if !total_percentage_matches(request) {
        let actual = sum_percentages(&request.participants).ok_or(SplitError::AmountOverflow)?;
        return Err(SplitError::TotalPercentageMismatch { actual });
    }

    request
        .participants
        .iter()
        .map(|p| -> SplitResult<ParticipantAllocation> {
            let percentage = p.percentage.unwrap_or(Decimal::ZERO);
            let amount = share_of(request.total_amount, percentage)?;
            Ok(ParticipantAllocation {
                user_id: p.user_id,
                amount,
                percentage: Some(percentage),
            })
        })
        .collect()
}

/// Computes `total * (percentage / 100)`.
fn share_of(total: Decimal, percentage: Decimal) -> SplitResult<Decimal> {
    percentage
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|fraction| total.checked_mul(fraction))
        .ok_or(SplitError::AmountOverflow)
}

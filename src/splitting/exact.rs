//! Exact split.
//!
//! Every participant owes the amount they were given. The amounts must add
//! up to the expense total exactly.

use rust_decimal::Decimal;

use crate::error::{SplitError, SplitResult};
use crate::models::{ExpenseRequest, ParticipantAllocation};

use super::validator::{sum_amounts, total_amount_matches};

/// Splits the expense using the amount supplied for each participant.
///
/// All participants are checked, and the amounts summed against the total,
/// before any allocation is built.
///
/// # Errors
///
/// - [`SplitError::EmptyParticipantSet`] when there are no participants
/// - [`SplitError::MissingAmount`] when a participant has no amount
/// - [`SplitError::NegativeAmount`] when a participant amount is below zero
/// - [`SplitError::TotalAmountMismatch`] when the amounts do not sum to the total
///
/// # Examples
///
/// ```
/// use expense_engine::error::SplitError;
/// use expense_engine::models::{ExpenseRequest, ParticipantInput, SplitPolicy};
/// use expense_engine::splitting::split_exact;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut request = ExpenseRequest {
///     description: "Flights".to_string(),
///     total_amount: Decimal::new(4299, 0),
///     date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     split_policy: SplitPolicy::Exact,
///     creator_id: 1,
///     participants: vec![
///         ParticipantInput::with_amount(1, Decimal::new(799, 0)),
///         ParticipantInput::with_amount(2, Decimal::new(2000, 0)),
///         ParticipantInput::with_amount(3, Decimal::new(1500, 0)),
///     ],
/// };
/// let allocations = split_exact(&request).unwrap();
/// assert_eq!(allocations[0].amount, Decimal::new(799, 0));
///
/// request.total_amount = Decimal::new(4300, 0);
/// assert_eq!(
///     split_exact(&request),
///     Err(SplitError::TotalAmountMismatch {
///         expected: Decimal::new(4300, 0),
///         actual: Decimal::new(4299, 0),
///     })
/// );
/// ```
pub fn split_exact(request: &ExpenseRequest) -> SplitResult<Vec<ParticipantAllocation>> {
    if request.participants.is_empty() {
        return Err(SplitError::EmptyParticipantSet);
    }

    for participant in &request.participants {
        let amount = participant.amount.ok_or(SplitError::MissingAmount {
            user_id: participant.user_id,
        })?;
        if amount < Decimal::ZERO {
            return Err(SplitError::NegativeAmount {
                user_id: participant.user_id,
                amount,
            });
        }
    }

    if !total_amount_matches(request) {
        let actual = sum_amounts(&request.participants).ok_or(SplitError::AmountOverflow)?;
        return Err(SplitError::TotalAmountMismatch {
            expected: request.total_amount,
            actual,
        });
    }

    Ok(request
        .participants
        .iter()
        .map(|p| ParticipantAllocation::new(p.user_id, p.amount.unwrap_or(Decimal::ZERO)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParticipantInput, SplitPolicy};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn request(total: &str, participants: Vec<ParticipantInput>) -> ExpenseRequest {
        ExpenseRequest {
            description: "Test".to_string(),
            total_amount: d(total),
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            split_policy: SplitPolicy::Exact,
            creator_id: 1,
            participants,
        }
    }

    fn scenario_participants() -> Vec<ParticipantInput> {
        vec![
            ParticipantInput::with_amount(1, d("799")),
            ParticipantInput::with_amount(2, d("2000")),
            ParticipantInput::with_amount(3, d("1500")),
        ]
    }

    #[test]
    fn test_amounts_taken_verbatim() {
        let allocations = split_exact(&request("4299", scenario_participants())).unwrap();
        assert_eq!(
            allocations,
            vec![
                ParticipantAllocation::new(1, d("799")),
                ParticipantAllocation::new(2, d("2000")),
                ParticipantAllocation::new(3, d("1500")),
            ]
        );
    }

    #[test]
    fn test_mismatch_reports_expected_and_actual() {
        let err = split_exact(&request("4300", scenario_participants())).unwrap_err();
        assert_eq!(
            err,
            SplitError::TotalAmountMismatch {
                expected: d("4300"),
                actual: d("4299"),
            }
        );
    }

    #[test]
    fn test_missing_amount_rejected() {
        let err = split_exact(&request(
            "100",
            vec![
                ParticipantInput::with_amount(1, d("100")),
                ParticipantInput::new(2),
            ],
        ))
        .unwrap_err();
        assert_eq!(err, SplitError::MissingAmount { user_id: 2 });
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = split_exact(&request(
            "100",
            vec![
                ParticipantInput::with_amount(1, d("150")),
                ParticipantInput::with_amount(2, d("-50")),
            ],
        ))
        .unwrap_err();
        assert_eq!(
            err,
            SplitError::NegativeAmount {
                user_id: 2,
                amount: d("-50"),
            }
        );
    }

    #[test]
    fn test_empty_participants_rejected() {
        assert_eq!(
            split_exact(&request("0", vec![])),
            Err(SplitError::EmptyParticipantSet)
        );
    }

    #[test]
    fn test_cents_sum_exactly() {
        let allocations = split_exact(&request(
            "10.01",
            vec![
                ParticipantInput::with_amount(1, d("3.34")),
                ParticipantInput::with_amount(2, d("3.34")),
                ParticipantInput::with_amount(3, d("3.33")),
            ],
        ))
        .unwrap();
        let sum: Decimal = allocations.iter().map(|a| a.amount).sum();
        assert_eq!(sum, d("10.01"));
    }

    #[test]
    fn test_overflowing_sum_rejected() {
        let err = split_exact(&request(
            "1",
            vec![
                ParticipantInput::with_amount(1, Decimal::MAX),
                ParticipantInput::with_amount(2, Decimal::MAX),
            ],
        ))
        .unwrap_err();
        assert_eq!(err, SplitError::AmountOverflow);
    }
}

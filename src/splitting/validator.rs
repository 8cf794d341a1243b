//! Aggregate validation of split requests.
//!
//! These predicates compare participant totals against the expense using
//! exact decimal equality. A participant missing the relevant field
//! contributes zero; the splitter rejects such participants before it relies
//! on these checks.

use rust_decimal::Decimal;

use crate::models::{ExpenseRequest, ParticipantInput};

/// Sums the participant amounts, treating a missing amount as zero.
///
/// Returns `None` if the sum overflows the decimal range.
pub fn sum_amounts(participants: &[ParticipantInput]) -> Option<Decimal> {
    participants.iter().try_fold(Decimal::ZERO, |sum, p| {
        sum.checked_add(p.amount.unwrap_or(Decimal::ZERO))
    })
}

/// Sums the participant percentages, treating a missing percentage as zero.
///
/// Returns `None` if the sum overflows the decimal range.
pub fn sum_percentages(participants: &[ParticipantInput]) -> Option<Decimal> {
    participants.iter().try_fold(Decimal::ZERO, |sum, p| {
        sum.checked_add(p.percentage.unwrap_or(Decimal::ZERO))
    })
}

/// Returns true if the participant amounts add up to the expense total.
///
/// # Examples
///
/// ```
/// use expense_engine::models::{ExpenseRequest, ParticipantInput, SplitPolicy};
/// use expense_engine::splitting::total_amount_matches;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let request = ExpenseRequest {
///     description: "Groceries".to_string(),
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
/// assert!(total_amount_matches(&request));
/// ```
pub fn total_amount_matches(request: &ExpenseRequest) -> bool {
    sum_amounts(&request.participants) == Some(request.total_amount)
}

/// Returns true if the participant percentages add up to exactly 100.
pub fn total_percentage_matches(request: &ExpenseRequest) -> bool {
    sum_percentages(&request.participants) == Some(Decimal::ONE_HUNDRED)
}

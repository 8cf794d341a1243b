//! Expense splitting for the Expense Engine.
//!
//! This module turns an [`ExpenseRequest`] into one [`ParticipantAllocation`]
//! per participant under the request's [`SplitPolicy`](crate::models::SplitPolicy):
//! equal shares, exact amounts, or percentages of the total. Every check runs
//! before any allocation is built, so a failed split produces no output.
//!
//! Splitting is a pure function of the request. It performs no I/O and keeps
//! no state, so it can be called concurrently without coordination.

mod equal;
mod exact;
mod percentage;
mod validator;

pub use equal::split_equal;
pub use exact::split_exact;
pub use percentage::split_percentage;
pub use validator::{sum_amounts, sum_percentages, total_amount_matches, total_percentage_matches};

use rust_decimal::Decimal;

use crate::error::{SplitError, SplitResult};
use crate::models::{ExpenseRequest, ParticipantAllocation, SplitPolicy};

/// Splits an expense among its participants according to its policy.
///
/// Allocations are returned in participant order, one per participant.
///
/// # Errors
///
/// Returns [`SplitError::NegativeTotal`] for a negative total, otherwise any
/// error of the policy-specific split.
///
/// # Examples
///
/// ```
/// use expense_engine::models::{ExpenseRequest, ParticipantInput, SplitPolicy};
/// use expense_engine::splitting::split;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let request = ExpenseRequest {
///     description: "Taxi".to_string(),
///     total_amount: Decimal::new(60, 0),
///     date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     split_policy: SplitPolicy::Equal,
///     creator_id: 1,
///     participants: vec![ParticipantInput::new(1), ParticipantInput::new(2)],
/// };
///
/// let allocations = split(&request).unwrap();
/// assert_eq!(allocations[1].user_id, 2);
/// assert_eq!(allocations[1].amount, Decimal::new(30, 0));
/// ```
pub fn split(request: &ExpenseRequest) -> SplitResult<Vec<ParticipantAllocation>> {
    if request.total_amount < Decimal::ZERO {
        return Err(SplitError::NegativeTotal {
            total: request.total_amount,
        });
    }

    match request.split_policy {
        SplitPolicy::Equal => split_equal(request),
        SplitPolicy::Exact => split_exact(request),
        SplitPolicy::Percentage => split_percentage(request),
    }
}

//! Expense request model and split policies.
//!
//! An [`ExpenseRequest`] is the immutable input to the splitter. It is built
//! by the API layer for each request and discarded once the allocations have
//! been produced.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SplitError;

use super::UserId;

/// The rule governing how an expense total is divided among participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum SplitPolicy {
    /// Every participant owes the same share of the total.
    Equal,
    /// Every participant owes an explicitly given amount.
    Exact,
    /// Every participant owes a given percentage of the total.
    Percentage,
}

impl SplitPolicy {
    /// Returns the canonical upper-case name of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitPolicy::Equal => "EQUAL",
            SplitPolicy::Exact => "EXACT",
            SplitPolicy::Percentage => "PERCENTAGE",
        }
    }
}

impl fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitPolicy {
    type Err = SplitError;

    /// Parses a canonical upper-case policy name.
    ///
    /// # Examples
    ///
    /// ```
    /// use expense_engine::models::SplitPolicy;
    ///
    /// assert_eq!("PERCENTAGE".parse::<SplitPolicy>().unwrap(), SplitPolicy::Percentage);
    /// assert!("exact".parse::<SplitPolicy>().is_err());
    /// assert!("SHARES".parse::<SplitPolicy>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EQUAL" => Ok(SplitPolicy::Equal),
            "EXACT" => Ok(SplitPolicy::Exact),
            "PERCENTAGE" => Ok(SplitPolicy::Percentage),
            _ => Err(SplitError::UnknownSplitPolicy {
                policy: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for SplitPolicy {
    type Error = SplitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One participant of an expense as supplied by the caller.
///
/// `amount` is required for [`SplitPolicy::Exact`] and `percentage` for
/// [`SplitPolicy::Percentage`]; both are ignored for [`SplitPolicy::Equal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInput {
    /// The participating user.
    pub user_id: UserId,
    /// The amount owed, for EXACT splits.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// The percentage owed (0 to 100), for PERCENTAGE splits.
    #[serde(default)]
    pub percentage: Option<Decimal>,
}

impl ParticipantInput {
    /// Creates a participant carrying neither an amount nor a percentage.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            amount: None,
            percentage: None,
        }
    }

    /// Creates a participant with an exact amount.
    pub fn with_amount(user_id: UserId, amount: Decimal) -> Self {
        Self {
            user_id,
            amount: Some(amount),
            percentage: None,
        }
    }

    /// Creates a participant with a percentage share.
    pub fn with_percentage(user_id: UserId, percentage: Decimal) -> Self {
        Self {
            user_id,
            amount: None,
            percentage: Some(percentage),
        }
    }
}

/// A request to record an expense and split it among participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRequest {
    /// What the expense was for.
    pub description: String,
    /// The total amount of the expense.
    pub total_amount: Decimal,
    /// The date the expense was incurred.
    pub date: NaiveDate,
    /// How the total is divided.
    #[serde(alias = "split_type")]
    pub split_policy: SplitPolicy,
    /// The user who recorded the expense.
    pub creator_id: UserId,
    /// The participants, in the order allocations are returned.
    pub participants: Vec<ParticipantInput>,
}

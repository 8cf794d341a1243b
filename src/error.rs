//! Error types for the Expense Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! [`SplitError`] covers everything the splitting core can reject, while
//! [`ServiceError`] covers the surrounding service: configuration, storage,
//! authentication and export.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{ExpenseId, UserId};

/// Broad classification of a [`SplitError`].
///
/// The API layer uses this to decide how a failure is reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitErrorKind {
    /// An aggregate invariant (amount or percentage totals) was violated.
    Validation,
    /// A participant or the total carried malformed or missing data.
    Input,
    /// The request named no participants.
    EmptyParticipants,
    /// The split policy was not one of the supported policies.
    UnknownPolicy,
}

/// Errors produced while splitting an expense.
///
/// Splitting validates before constructing anything, so any of these errors
/// means no allocations were produced.
///
/// # Example
///
/// ```
/// use expense_engine::error::SplitError;
/// use rust_decimal::Decimal;
///
/// let error = SplitError::TotalAmountMismatch {
///     expected: Decimal::new(4300, 0),
///     actual: Decimal::new(4299, 0),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Participant amounts sum to 4299 but the expense total is 4300"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    /// Exact participant amounts do not add up to the expense total.
    #[error("Participant amounts sum to {actual} but the expense total is {expected}")]
    TotalAmountMismatch {
        /// The expense total.
        expected: Decimal,
        /// The sum of the participant amounts.
        actual: Decimal,
    },

    /// Participant percentages do not add up to 100.
    #[error("Participant percentages sum to {actual} but must sum to 100")]
    TotalPercentageMismatch {
        /// The sum of the participant percentages.
        actual: Decimal,
    },

    /// An EXACT split participant did not provide an amount.
    #[error("Participant {user_id} is missing an amount for an EXACT split")]
    MissingAmount {
        /// The participant without an amount.
        user_id: UserId,
    },

    /// A PERCENTAGE split participant did not provide a percentage.
    #[error("Participant {user_id} is missing a percentage for a PERCENTAGE split")]
    MissingPercentage {
        /// The participant without a percentage.
        user_id: UserId,
    },

    /// The expense total was negative.
    #[error("Expense total must not be negative, got {total}")]
    NegativeTotal {
        /// The offending total.
        total: Decimal,
    },

    /// A participant amount was negative.
    #[error("Participant {user_id} has a negative amount: {amount}")]
    NegativeAmount {
        /// The participant with the negative amount.
        user_id: UserId,
        /// The offending amount.
        amount: Decimal,
    },

    /// A participant percentage was outside 0 to 100.
    #[error("Participant {user_id} has a percentage outside 0-100: {percentage}")]
    PercentageOutOfRange {
        /// The participant with the invalid percentage.
        user_id: UserId,
        /// The offending percentage.
        percentage: Decimal,
    },

    /// Summing or scaling the amounts exceeded the decimal range.
    #[error("Amounts are too large to split")]
    AmountOverflow,

    /// The expense had no participants to split between.
    #[error("An expense must have at least one participant")]
    EmptyParticipantSet,

    /// The split policy name was not recognised.
    #[error("Unknown split policy: {policy}")]
    UnknownSplitPolicy {
        /// The unrecognised policy name.
        policy: String,
    },
}

impl SplitError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> SplitErrorKind {
        match self {
            SplitError::TotalAmountMismatch { .. } | SplitError::TotalPercentageMismatch { .. } => {
                SplitErrorKind::Validation
            }
            SplitError::MissingAmount { .. }
            | SplitError::MissingPercentage { .. }
            | SplitError::NegativeTotal { .. }
            | SplitError::NegativeAmount { .. }
            | SplitError::PercentageOutOfRange { .. }
            | SplitError::AmountOverflow => SplitErrorKind::Input,
            SplitError::EmptyParticipantSet => SplitErrorKind::EmptyParticipants,
            SplitError::UnknownSplitPolicy { .. } => SplitErrorKind::UnknownPolicy,
        }
    }
}

/// A type alias for Results that return SplitError.
pub type SplitResult<T> = Result<T, SplitError>;

/// The error type for the service around the splitting core.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was missing or invalid.
    #[error("Invalid configuration '{key}': {message}")]
    InvalidConfig {
        /// The configuration key at fault.
        key: String,
        /// What was wrong with it.
        message: String,
    },

    /// The expense split was rejected.
    #[error(transparent)]
    Split(#[from] SplitError),

    /// A user record was invalid.
    #[error("Invalid user field '{field}': {message}")]
    InvalidUser {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A user with this email already exists.
    #[error("Email already registered: {email}")]
    EmailAlreadyRegistered {
        /// The duplicate email.
        email: String,
    },

    /// No expense exists with the given id.
    #[error("Expense not found: {id}")]
    ExpenseNotFound {
        /// The missing expense id.
        id: ExpenseId,
    },

    /// No user exists with the given email.
    #[error("User not found: {email}")]
    UserNotFound {
        /// The email that was looked up.
        email: String,
    },

    /// Login credentials did not match a user.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// A bearer token was missing, malformed, forged or expired.
    #[error("Could not validate user: {message}")]
    Unauthorized {
        /// Why the token was rejected.
        message: String,
    },

    /// Hashing a password or signing a token failed.
    #[error("Credential error: {message}")]
    Credential {
        /// A description of the failure.
        message: String,
    },

    /// The persistence layer failed.
    #[error("Storage error: {message}")]
    Store {
        /// A description of the storage failure.
        message: String,
    },

    /// The balance sheet could not be rendered.
    #[error("Export error: {message}")]
    Export {
        /// A description of the export failure.
        message: String,
    },
}

/// A type alias for Results that return ServiceError.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_percentage_mismatch_displays_sum() {
        let error = SplitError::TotalPercentageMismatch {
            actual: Decimal::new(90, 0),
        };
        assert_eq!(
            error.to_string(),
            "Participant percentages sum to 90 but must sum to 100"
        );
    }

    #[test]
    fn test_missing_amount_displays_user() {
        let error = SplitError::MissingAmount { user_id: 7 };
        assert_eq!(
            error.to_string(),
            "Participant 7 is missing an amount for an EXACT split"
        );
    }

    #[test]
    fn test_unknown_policy_displays_name() {
        let error = SplitError::UnknownSplitPolicy {
            policy: "SHARES".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown split policy: SHARES");
    }

    #[test]
    fn test_split_error_kinds() {
        assert_eq!(
            SplitError::TotalPercentageMismatch {
                actual: Decimal::ZERO
            }
            .kind(),
            SplitErrorKind::Validation
        );
        assert_eq!(
            SplitError::MissingPercentage { user_id: 1 }.kind(),
            SplitErrorKind::Input
        );
        assert_eq!(
            SplitError::NegativeTotal {
                total: Decimal::NEGATIVE_ONE
            }
            .kind(),
            SplitErrorKind::Input
        );
        assert_eq!(
            SplitError::EmptyParticipantSet.kind(),
            SplitErrorKind::EmptyParticipants
        );
        assert_eq!(
            SplitError::UnknownSplitPolicy {
                policy: "x".to_string()
            }
            .kind(),
            SplitErrorKind::UnknownPolicy
        );
    }

    #[test]
    fn test_split_error_converts_to_service_error() {
        fn split() -> SplitResult<()> {
            Err(SplitError::EmptyParticipantSet)
        }

        fn create() -> ServiceResult<()> {
            split()?;
            Ok(())
        }

        let error = create().unwrap_err();
        assert!(matches!(
            error,
            ServiceError::Split(SplitError::EmptyParticipantSet)
        ));
        assert_eq!(
            error.to_string(),
            "An expense must have at least one participant"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = ServiceError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<SplitError>();
        assert_error::<ServiceError>();
    }
}

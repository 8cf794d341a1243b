//! Response types for the expense service API.
//!
//! This module defines the response bodies and the mapping from
//! [`ServiceError`] to HTTP error responses.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, SplitError, SplitErrorKind};
use crate::models::{PersistedExpense, User, UserId};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    fn from_split_error(error: &SplitError) -> Self {
        let message = error.to_string();
        match error {
            SplitError::TotalAmountMismatch { expected, actual } => Self::with_details(
                "TOTAL_AMOUNT_MISMATCH",
                message,
                format!("expected {}, got {}", expected, actual),
            ),
            SplitError::TotalPercentageMismatch { actual } => Self::with_details(
                "TOTAL_PERCENTAGE_MISMATCH",
                message,
                format!("expected 100, got {}", actual),
            ),
            _ => match error.kind() {
                SplitErrorKind::Validation => Self::validation_error(message),
                SplitErrorKind::Input => Self::new("INVALID_PARTICIPANT", message),
                SplitErrorKind::EmptyParticipants => Self::new("EMPTY_PARTICIPANT_SET", message),
                SplitErrorKind::UnknownPolicy => Self::new("UNKNOWN_SPLIT_POLICY", message),
            },
        }
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    fn internal(code: &str, message: &str, details: String) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::with_details(code, message, details),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        if self.status == StatusCode::UNAUTHORIZED {
            (
                self.status,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(self.error),
            )
                .into_response()
        } else {
            (self.status, Json(self.error)).into_response()
        }
    }
}

impl From<ServiceError> for ApiErrorResponse {
    fn from(error: ServiceError) -> Self {
        let message = error.to_string();
        match error {
            ServiceError::Split(split_error) => {
                Self::new(StatusCode::BAD_REQUEST, ApiError::from_split_error(&split_error))
            }
            ServiceError::InvalidUser { .. } => {
                Self::new(StatusCode::BAD_REQUEST, ApiError::new("INVALID_USER", message))
            }
            ServiceError::EmailAlreadyRegistered { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("EMAIL_ALREADY_REGISTERED", message),
            ),
            ServiceError::ExpenseNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("EXPENSE_NOT_FOUND", "Expense not found"),
            ),
            ServiceError::UserNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("USER_NOT_FOUND", "User not found"),
            ),
            ServiceError::InvalidCredentials => Self::new(
                StatusCode::UNAUTHORIZED,
                ApiError::new("INVALID_CREDENTIALS", message),
            ),
            ServiceError::Unauthorized { .. } => Self::new(
                StatusCode::UNAUTHORIZED,
                ApiError::new("UNAUTHORIZED", message),
            ),
            ServiceError::ConfigNotFound { .. }
            | ServiceError::ConfigParseError { .. }
            | ServiceError::InvalidConfig { .. } => {
                Self::internal("CONFIG_ERROR", "Configuration error", message)
            }
            ServiceError::Credential { .. } => {
                Self::internal("CREDENTIAL_ERROR", "Credential processing failed", message)
            }
            ServiceError::Store { .. } => Self::internal("STORE_ERROR", "Storage failed", message),
            ServiceError::Export { .. } => {
                Self::internal("EXPORT_ERROR", "Balance sheet export failed", message)
            }
        }
    }
}

/// Response body for an expense: the stored record plus its creator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseResponse {
    /// The stored expense.
    #[serde(flatten)]
    pub expense: PersistedExpense,
    /// The creating user, if the id resolves to one.
    pub creator: Option<User>,
}

/// Response body for `POST /auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed bearer token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
}

impl TokenResponse {
    /// Wraps a bearer token.
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// The identity resolved from a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserInfo {
    /// The user's email.
    pub username: String,
    /// The user's id.
    pub id: UserId,
}

/// Response body for `GET /auth/current_user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    /// The authenticated user.
    pub user: CurrentUserInfo,
}

//! Request types for the expense service API.
//!
//! Expense creation accepts [`ExpenseRequest`](crate::models::ExpenseRequest)
//! directly; this module holds the user registration and login bodies.

use serde::{Deserialize, Serialize};

use crate::auth::hash_password;
use crate::error::{ServiceError, ServiceResult};
use crate::models::NewUser;

/// Request body for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Email address, used as the login name.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Ten digit mobile number.
    pub mobile_number: String,
    /// Plain-text password; only its hash is stored.
    pub password: String,
}

impl CreateUserRequest {
    /// Checks the email, name, mobile number and password fields.
    pub fn validate(&self) -> ServiceResult<()> {
        if !is_plausible_email(&self.email) {
            return Err(invalid_user("email", "must be a valid email address"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid_user("name", "must not be empty"));
        }
        if self.mobile_number.len() != 10 || !self.mobile_number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid_user("mobile_number", "must be exactly 10 digits"));
        }
        if self.password.is_empty() {
            return Err(invalid_user("password", "must not be empty"));
        }
        Ok(())
    }
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ServiceError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        req.validate()?;
        Ok(NewUser {
            password_hash: hash_password(&req.password)?,
            email: req.email,
            name: req.name,
            mobile_number: req.mobile_number,
        })
    }
}

/// Form body for `POST /auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    /// The user's email.
    pub username: String,
    /// The user's password.
    pub password: String,
}

/// Accepts `local@domain.tld` with no whitespace and a single `@`.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

fn invalid_user(field: &str, message: &str) -> ServiceError {
    ServiceError::InvalidUser {
        field: field.to_string(),
        message: message.to_string(),
    }
}

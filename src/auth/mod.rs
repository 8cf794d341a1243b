//! Identity for the expense service.
//!
//! Users log in with their email and password and receive a signed bearer
//! token. The token resolves back to the user's email and id; the splitting
//! core never sees it and treats user ids as opaque.

mod password;
mod token;

pub use password::{hash_password, verify_password};
pub use token::{TokenClaims, TokenService};

use crate::error::{ServiceError, ServiceResult};
use crate::models::User;
use crate::store::ExpenseStore;

/// Checks an email and password against the store.
///
/// Unknown emails and wrong passwords both fail with `InvalidCredentials`.
pub fn authenticate(store: &dyn ExpenseStore, email: &str, password: &str) -> ServiceResult<User> {
    let stored = store
        .find_user_by_email(email)?
        .ok_or(ServiceError::InvalidCredentials)?;

    if !verify_password(password, &stored.password_hash) {
        return Err(ServiceError::InvalidCredentials);
    }
    Ok(stored.user)
}

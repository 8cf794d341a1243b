//! User models.

use serde::{Deserialize, Serialize};

use super::UserId;

/// A registered user as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Unique email address, also the login name.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Ten digit mobile number.
    pub mobile_number: String,
}

/// A user about to be stored, with an already hashed password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Ten digit mobile number.
    pub mobile_number: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

//! HTTP API module for the Expense Engine.
//!
//! This module provides the REST endpoints for registering users, issuing
//! tokens, recording and splitting expenses, and exporting the balance sheet.

mod extract;
mod handlers;
mod request;
mod response;
mod state;

pub use extract::CurrentUser;
pub use handlers::create_router;
pub use request::{CreateUserRequest, TokenRequest};
pub use response::{
    ApiError, ApiErrorResponse, CurrentUserInfo, CurrentUserResponse, ExpenseResponse,
    TokenResponse,
};
pub use state::AppState;

//! Persistence for users and expenses.
//!
//! The [`ExpenseStore`] trait is the contract the API layer depends on. An
//! expense and all of its participant rows are stored together or not at
//! all. [`MemoryStore`] is the in-process implementation used by the service
//! binary and the tests.

mod memory;

pub use memory::MemoryStore;

use crate::error::ServiceResult;
use crate::models::{
    ExpenseId, ExpenseRequest, NewUser, ParticipantAllocation, PersistedExpense,
    PersistedParticipant, User, UserId,
};

/// A user record together with its password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    /// The public user record.
    pub user: User,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

/// Storage backend for users, expenses and their allocations.
pub trait ExpenseStore: Send + Sync {
    /// Stores a new user and assigns it an id.
    ///
    /// Fails with `EmailAlreadyRegistered` if the email is taken.
    fn create_user(&self, user: NewUser) -> ServiceResult<User>;

    /// Looks up a user by id.
    fn get_user(&self, id: UserId) -> ServiceResult<Option<User>>;

    /// Looks up a user and its password hash by email.
    fn find_user_by_email(&self, email: &str) -> ServiceResult<Option<StoredUser>>;

    /// Stores an expense and one participant row per allocation, atomically.
    ///
    /// `allocations` must line up with `request.participants`.
    fn create_expense(
        &self,
        request: &ExpenseRequest,
        allocations: &[ParticipantAllocation],
    ) -> ServiceResult<PersistedExpense>;

    /// Looks up an expense by id.
    fn get_expense(&self, id: ExpenseId) -> ServiceResult<Option<PersistedExpense>>;

    /// Returns every participant row belonging to a user, oldest first.
    fn allocations_for_user(&self, user_id: UserId) -> ServiceResult<Vec<PersistedParticipant>>;

    /// Returns every expense, oldest first.
    fn list_expenses(&self) -> ServiceResult<Vec<PersistedExpense>>;
}

//! Core data models for the Expense Engine.
//!
//! This module contains the expense requests accepted by the splitter, the
//! allocations it produces, and the user and persisted records handled by
//! the surrounding service.

mod allocation;
mod expense;
mod persisted;
mod user;

pub use allocation::ParticipantAllocation;
pub use expense::{ExpenseRequest, ParticipantInput, SplitPolicy};
pub use persisted::{PersistedExpense, PersistedParticipant};
pub use user::{NewUser, User};

/// Identifier of a user.
pub type UserId = u64;

/// Identifier of a persisted expense.
pub type ExpenseId = u64;

/// Identifier of a persisted participant row.
pub type ParticipantId = u64;

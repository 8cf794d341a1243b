//! In-memory [`ExpenseStore`] implementation.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{ServiceError, ServiceResult};
use crate::models::{
    ExpenseId, ExpenseRequest, NewUser, ParticipantAllocation, ParticipantId, PersistedExpense,
    PersistedParticipant, User, UserId,
};

use super::{ExpenseStore, StoredUser};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<StoredUser>,
    expenses: Vec<PersistedExpense>,
    next_participant_id: ParticipantId,
}

/// Stores users and expenses in process memory.
///
/// Ids are assigned sequentially from 1. All tables sit behind one lock, so
/// an expense becomes visible together with all of its participant rows.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ServiceResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| ServiceError::Store {
            message: "store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> ServiceResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| ServiceError::Store {
            message: "store lock poisoned".to_string(),
        })
    }
}

impl ExpenseStore for MemoryStore {
    fn create_user(&self, user: NewUser) -> ServiceResult<User> {
        let mut tables = self.write()?;

        if tables.users.iter().any(|u| u.user.email == user.email) {
            return Err(ServiceError::EmailAlreadyRegistered { email: user.email });
        }

        let created = User {
            id: tables.users.len() as UserId + 1,
            email: user.email,
            name: user.name,
            mobile_number: user.mobile_number,
        };
        tables.users.push(StoredUser {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }

    fn get_user(&self, id: UserId) -> ServiceResult<Option<User>> {
        let tables = self.read()?;
        Ok(tables
            .users
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone()))
    }

    fn find_user_by_email(&self, email: &str) -> ServiceResult<Option<StoredUser>> {
        let tables = self.read()?;
        Ok(tables.users.iter().find(|u| u.user.email == email).cloned())
    }

    fn create_expense(
        &self,
        request: &ExpenseRequest,
        allocations: &[ParticipantAllocation],
    ) -> ServiceResult<PersistedExpense> {
        if allocations.len() != request.participants.len() {
            return Err(ServiceError::Store {
                message: format!(
                    "expected {} allocations, got {}",
                    request.participants.len(),
                    allocations.len()
                ),
            });
        }

        let mut tables = self.write()?;
        let expense_id = tables.expenses.len() as ExpenseId + 1;
        let first_participant_id = tables.next_participant_id + 1;

        let participants: Vec<PersistedParticipant> = allocations
            .iter()
            .zip(first_participant_id..)
            .map(|(allocation, id)| PersistedParticipant {
                id,
                expense_id,
                user_id: allocation.user_id,
                amount: allocation.amount,
                percentage: allocation.percentage,
            })
            .collect();

        let expense = PersistedExpense {
            id: expense_id,
            description: request.description.clone(),
            total_amount: request.total_amount,
            date: request.date,
            split_policy: request.split_policy,
            creator_id: request.creator_id,
            participants,
        };

        tables.next_participant_id += allocations.len() as ParticipantId;
        tables.expenses.push(expense.clone());
        Ok(expense)
    }

    fn get_expense(&self, id: ExpenseId) -> ServiceResult<Option<PersistedExpense>> {
        let tables = self.read()?;
        Ok(tables.expenses.iter().find(|e| e.id == id).cloned())
    }

    fn allocations_for_user(&self, user_id: UserId) -> ServiceResult<Vec<PersistedParticipant>> {
        let tables = self.read()?;
        Ok(tables
            .expenses
            .iter()
            .flat_map(|e| e.participants.iter())
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_expenses(&self) -> ServiceResult<Vec<PersistedExpense>> {
        Ok(self.read()?.expenses.clone())
    }
}

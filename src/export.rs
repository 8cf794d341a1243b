//! Balance sheet export.
//!
//! Flattens every stored expense into one row per participant and renders
//! the rows as CSV.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{User, UserId};
use crate::store::ExpenseStore;

/// Column headers of the balance sheet, in order.
pub const BALANCE_SHEET_HEADERS: [&str; 5] = [
    "Expense Description",
    "Expense Amount",
    "Creator Name",
    "Participant Name",
    "Participant Amount Owed",
];

/// Name shown for a creator or participant with no user record.
pub const UNKNOWN_USER_NAME: &str = "Unknown";

/// One (expense, participant) line of the balance sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheetRow {
    /// The expense description.
    #[serde(rename = "Expense Description")]
    pub expense_description: String,
    /// The expense total.
    #[serde(rename = "Expense Amount")]
    pub expense_amount: Decimal,
    /// The name of the user who recorded the expense.
    #[serde(rename = "Creator Name")]
    pub creator_name: String,
    /// The name of the participant.
    #[serde(rename = "Participant Name")]
    pub participant_name: String,
    /// What the participant owes for this expense.
    #[serde(rename = "Participant Amount Owed")]
    pub participant_amount_owed: Decimal,
}

/// Collects balance sheet rows for every stored expense.
///
/// Rows follow storage order: expenses oldest first, participants in the
/// order they were submitted.
pub fn balance_sheet_rows(store: &dyn ExpenseStore) -> ServiceResult<Vec<BalanceSheetRow>> {
    let mut names: HashMap<UserId, Option<User>> = HashMap::new();
    let mut name_of = |id: UserId| -> ServiceResult<String> {
        if !names.contains_key(&id) {
            names.insert(id, store.get_user(id)?);
        }
        Ok(names
            .get(&id)
            .and_then(|user| user.as_ref())
            .map(|user| user.name.clone())
            .unwrap_or_else(|| UNKNOWN_USER_NAME.to_string()))
    };

    let mut rows = Vec::new();
    for expense in store.list_expenses()? {
        let creator_name = name_of(expense.creator_id)?;
        for participant in &expense.participants {
            rows.push(BalanceSheetRow {
                expense_description: expense.description.clone(),
                expense_amount: expense.total_amount,
                creator_name: creator_name.clone(),
                participant_name: name_of(participant.user_id)?,
                participant_amount_owed: participant.amount,
            });
        }
    }
    Ok(rows)
}

/// Renders balance sheet rows as CSV, header line included.
///
/// # Examples
///
/// ```
/// use expense_engine::export::{write_balance_sheet_csv, BalanceSheetRow};
/// use rust_decimal::Decimal;
///
/// let rows = vec![BalanceSheetRow {
///     expense_description: "Dinner".to_string(),
///     expense_amount: Decimal::new(3000, 0),
///     creator_name: "Alice".to_string(),
///     participant_name: "Bob".to_string(),
///     participant_amount_owed: Decimal::new(1000, 0),
/// }];
///
/// let csv = String::from_utf8(write_balance_sheet_csv(&rows).unwrap()).unwrap();
/// assert_eq!(
///     csv,
///     "Expense Description,Expense Amount,Creator Name,Participant Name,Participant Amount Owed\n\
///      Dinner,3000,Alice,Bob,1000\n"
/// );
/// ```
pub fn write_balance_sheet_csv(rows: &[BalanceSheetRow]) -> ServiceResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(BALANCE_SHEET_HEADERS).map_err(export_error)?;
    for row in rows {
        writer.serialize(row).map_err(export_error)?;
    }

    writer.into_inner().map_err(|e| ServiceError::Export {
        message: e.to_string(),
    })
}

fn export_error(error: csv::Error) -> ServiceError {
    ServiceError::Export {
        message: error.to_string(),
    }
}

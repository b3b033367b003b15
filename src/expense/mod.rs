//! Expenses: the records the backend extracts from statements, and the
//! table, detail modal and edit modal that display and change them.

mod delete;
mod detail;
mod edit;
mod filter;
mod model;
mod table;

pub use delete::delete_expense_endpoint;
pub use detail::get_expense_detail;
pub use edit::{get_edit_expense_view, update_expense_endpoint};
pub use filter::{ExpenseFilter, distinct_categories};
pub use model::{Expense, ExpenseId, ExpenseUpdate, FixedKind, TransactionType, UploadResponse};
pub use table::{TableQuery, expense_table_view, get_expense_table};

#[cfg(test)]
pub(crate) use model::test_utils;

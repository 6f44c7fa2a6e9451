//! Expense recording, the expense history and its CSV export.

mod api;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod expenses_page;
mod export_endpoint;
mod new_expense_page;

pub use api::get_expenses_api;
pub use core::{
    Expense, ExpenseId, NewExpense, count_expenses, create_expense, create_expense_table,
    delete_expense, get_all_expenses, get_expense, get_expenses_paginated,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use expenses_page::get_expenses_page;
pub use export_endpoint::get_export_expenses;
pub use new_expense_page::get_new_expense_page;

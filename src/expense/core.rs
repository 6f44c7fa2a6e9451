//! Defines the core data model and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, category::CategoryId};

/// Alias for the type used for expense IDs
pub type ExpenseId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// A single purchase, i.e. an event where money was spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The amount of money spent, in whole currency units.
    pub amount: i64,
    /// When the purchase happened.
    pub date: Date,
    /// A text description of what the money was spent on.
    pub description: String,
    /// The ID of the category the expense is tallied under.
    pub category_id: CategoryId,
}

/// The data needed to record a new expense.
///
/// The category must already be resolved to an ID, either from the form or
/// from the keyword classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The amount of money spent, in whole currency units. Must be positive.
    pub amount: i64,
    /// When the purchase happened.
    pub date: Date,
    /// A text description of what the money was spent on. Must not be empty.
    pub description: String,
    /// The ID of the category the expense is tallied under.
    pub category_id: CategoryId,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database.
///
/// The description is stored with surrounding whitespace trimmed.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyDescription] if the description is empty after trimming,
/// - or [Error::InvalidAmount] if the amount is zero or negative,
/// - or [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let description = new_expense.description.trim();

    if description.is_empty() {
        return Err(Error::EmptyDescription);
    }

    if new_expense.amount <= 0 {
        return Err(Error::InvalidAmount(new_expense.amount));
    }

    let expense = connection
        .prepare(
            "INSERT INTO expense (amount, date, description, category_id)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, date, description, category_id",
        )?
        .query_row(
            (
                new_expense.amount,
                new_expense.date,
                description,
                new_expense.category_id,
            ),
            map_expense_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(Some(new_expense.category_id)),
            error => error.into(),
        })?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "SELECT id, amount, date, description, category_id FROM expense WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Retrieve all expenses from the database, newest first.
///
/// Expenses on the same date are ordered by ID, so the most recently recorded
/// one comes first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, description, category_id FROM expense
             ORDER BY date DESC, id DESC",
        )?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Retrieve one page of the expense history, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_expenses_paginated(
    limit: u64,
    offset: u64,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, description, category_id FROM expense
             ORDER BY date DESC, id DESC
             LIMIT :limit OFFSET :offset",
        )?
        .query_map(&[(":limit", &limit), (":offset", &offset)], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Delete the expense with `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingExpense] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])?;

    if rows_affected == 0 {
        Err(Error::DeleteMissingExpense)
    } else {
        Ok(())
    }
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount INTEGER NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category_id INTEGER NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id)
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('expense', 0)",
        (),
    )?;

    // Composite index used by the history and summary pages.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date_category ON expense(date, category_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let description = row.get(3)?;
    let category_id = row.get(4)?;

    Ok(Expense {
        id,
        amount,
        date,
        description,
        category_id,
    })
}

// ============================================================================
// TESTS
// ============================================================================

//! Creates the application's database schema.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error,
    category::{create_category_table, seed_default_categories},
    expense::create_expense_table,
};

/// Create the tables for the application's domain models and seed the
/// default categories.
///
/// The tables are created in a single exclusive transaction so that two
/// server processes pointed at the same database file cannot interleave
/// their schema statements.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // PRAGMA statements are ignored inside a transaction, so enable foreign
    // key enforcement before starting one.
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_expense_table(&transaction)?;
    seed_default_categories(&transaction)?;

    transaction.commit()?;

    Ok(())
}

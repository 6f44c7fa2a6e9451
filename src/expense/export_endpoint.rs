//! The endpoint for downloading the expense history as a CSV file.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    http::header,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::get_all_categories,
    expense::get_all_expenses,
};

/// The state needed for exporting the expense history.
#[derive(Debug, Clone)]
pub struct ExportExpensesState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExportExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Download the full expense history as a CSV file, newest first.
///
/// The file has the columns id, date, description, amount and category, where
/// category is the category's name rather than its ID so the file is readable
/// on its own.
pub async fn get_export_expenses(
    State(state): State<ExportExpensesState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_all_expenses(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?;

    let category_names: HashMap<_, _> = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?
        .into_iter()
        .map(|category| (category.id, category.name))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["id", "date", "description", "amount", "category"])
        .map_err(|error| Error::CsvError(error.to_string()))?;

    for expense in expenses {
        let category_name = category_names
            .get(&expense.category_id)
            .map(|name| name.to_string())
            .unwrap_or_default();

        writer
            .write_record([
                expense.id.to_string(),
                expense.date.to_string(),
                expense.description,
                expense.amount.to_string(),
                category_name,
            ])
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    let csv_data = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        csv_data,
    )
        .into_response())
}

//! The JSON API for the expense history.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;
use time::Date;

use crate::{AppState, Error, category::get_all_categories, expense::get_all_expenses};

/// The state needed for the expense list API.
#[derive(Debug, Clone)]
pub struct ExpensesApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpensesApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// One expense in the JSON expense list, with the category name resolved.
#[derive(Debug, Serialize)]
struct ExpenseRecord {
    id: i64,
    date: Date,
    description: String,
    amount: i64,
    category: String,
}

/// List the full expense history as JSON, newest first.
pub async fn get_expenses_api(State(state): State<ExpensesApiState>) -> Result<Response, Error> {
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

    let records = expenses
        .into_iter()
        .map(|expense| ExpenseRecord {
            id: expense.id,
            date: expense.date,
            category: category_names
                .get(&expense.category_id)
                .map(|name| name.to_string())
                .unwrap_or_default(),
            description: expense.description,
            amount: expense.amount,
        })
        .collect::<Vec<_>>();

    Ok(Json(records).into_response())
}

//! JSON endpoint for the evaluated budget summary.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::get_all_categories,
    expense::get_all_expenses,
    summary::evaluation::compute_summaries,
};

/// The state needed for the summary API.
#[derive(Debug, Clone)]
pub struct SummaryApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Return the evaluated budget for every category as JSON.
pub async fn get_summary_api(State(state): State<SummaryApiState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_all_expenses(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?;
    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(Json(compute_summaries(&expenses, &categories)).into_response())
}

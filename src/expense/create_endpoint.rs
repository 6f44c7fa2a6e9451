//! Defines the endpoint for recording a new expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    category::{CategoryId, get_category_by_name},
    classify::classify_category,
    endpoints,
    expense::{NewExpense, create_expense},
    timezone::get_local_offset,
};

/// The state needed to record an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Ho_Chi_Minh".
    pub local_timezone: String,
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for recording an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// Text detailing the expense.
    pub description: String,
    /// The amount spent in whole đồng.
    pub amount: i64,
    /// The date when the money was spent.
    pub date: Date,
    /// The category the expense belongs to. When absent, a category is
    /// picked by matching keywords in the description.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// A route handler for recording a new expense, redirects to the expense
/// history on success.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let today = match get_local_offset(&state.local_timezone) {
        Some(offset) => OffsetDateTime::now_utc().to_offset(offset).date(),
        None => {
            return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
        }
    };

    if form.date > today {
        return Error::FutureDate(form.date).into_alert_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let category_id = match form.category_id {
        Some(category_id) => category_id,
        None => match suggest_category(&form.description, &connection) {
            Ok(category_id) => category_id,
            Err(error) => {
                tracing::error!("Could not pick a category for the new expense: {error}");
                return error.into_alert_response();
            }
        },
    };

    let new_expense = NewExpense {
        amount: form.amount,
        date: form.date,
        description: form.description,
        category_id,
    };

    match create_expense(new_expense, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(
            error @ (Error::EmptyDescription | Error::InvalidAmount(_) | Error::InvalidCategory(_)),
        ) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while recording an expense: {error}");

            error.into_alert_response()
        }
    }
}

/// Pick a category for `description` by running it through the keyword
/// classifier and looking the suggested name up in the database.
fn suggest_category(description: &str, connection: &Connection) -> Result<CategoryId, Error> {
    let suggested_name = classify_category(description);

    let category = get_category_by_name(suggested_name, connection)
        .inspect_err(|error| {
            tracing::error!("The suggested category \"{suggested_name}\" could not be found: {error}");
        })?;

    Ok(category.id)
}

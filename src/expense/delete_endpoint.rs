//! Expense deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    expense::{ExpenseId, delete_expense},
};

/// The state needed for deleting an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle expense deletion. Returns a success alert or an error.
pub async fn delete_expense_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<DeleteExpenseState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_expense(expense_id, &connection) {
        Ok(_) => Alert::success("Expense deleted", "").into_response(),
        Err(Error::DeleteMissingExpense) => Error::DeleteMissingExpense.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting expense {expense_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use scraper::Html;
    use time::OffsetDateTime;

    use crate::{
        Error,
        category::get_category_by_name,
        db::initialize,
        expense::{NewExpense, create_expense, delete_expense_endpoint, get_expense},
        test_utils::{assert_valid_html, get_body_text, get_header, parse_html_fragment},
    };

    use super::DeleteExpenseState;

    fn get_delete_expense_state() -> DeleteExpenseState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        DeleteExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn delete_expense_endpoint_succeeds() {
        let state = get_delete_expense_state();
        let expense = {
            let connection = state.db_connection.lock().unwrap();
            let category = get_category_by_name("Others", &connection).unwrap();

            create_expense(
                NewExpense {
                    amount: 10_000,
                    date: OffsetDateTime::now_utc().date(),
                    description: "Parking".to_owned(),
                    category_id: category.id,
                },
                &connection,
            )
            .expect("Could not create test expense")
        };

        let response = delete_expense_endpoint(Path(expense.id), State(state.clone()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_expense(expense.id, &connection), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn delete_expense_endpoint_with_invalid_id_returns_error_html() {
        let state = get_delete_expense_state();
        let invalid_id = 999999;

        let response = delete_expense_endpoint(Path(invalid_id), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            get_header(&response, "content-type"),
            "text/html; charset=utf-8"
        );

        let body = get_body_text(response).await;
        let html = parse_html_fragment(&body);
        assert_valid_html(&html);
        assert_error_content(&html, "Could not delete expense");
    }

    #[track_caller]
    fn assert_error_content(html: &Html, want_error_message: &str) {
        let p = scraper::Selector::parse("p").unwrap();
        let error_message = html
            .select(&p)
            .next()
            .expect("No error message found")
            .text()
            .collect::<Vec<_>>()
            .join("");
        let got_error_message = error_message.trim();

        assert_eq!(want_error_message, got_error_message);
    }
}

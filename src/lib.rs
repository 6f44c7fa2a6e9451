//! Spendlog is a small self-hosted web app for recording everyday expenses
//! and tracking per-category spending against budget limits.
//!
//! This library provides a REST-style API that directly serves HTML pages,
//! plus a read-only JSON API for the expense list, limit mapping, and the
//! evaluated budget summary.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use time::Date;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod classify;
mod db;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod pagination;
mod routing;
mod summary;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;

use crate::{
    alert::Alert,
    category::CategoryId,
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty or whitespace-only string was used as an expense description.
    #[error("expense description cannot be empty")]
    EmptyDescription,

    /// A zero or negative amount was used to record an expense.
    ///
    /// Expenses record money spent, so the amount must be a positive whole
    /// number of currency units.
    #[error("{0} is not a valid expense amount, amounts must be positive")]
    InvalidAmount(i64),

    /// A date in the future was used to record an expense.
    ///
    /// Expenses record purchases that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// The category name used to create a category already exists.
    #[error("the category name already exists in the database")]
    DuplicateCategoryName,

    /// The category ID used to record an expense did not match a valid category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// A negative number was used as a category spending limit.
    ///
    /// Limits must be zero (no limit) or positive.
    #[error("{0} is not a valid spending limit, limits must not be negative")]
    NegativeLimit(i64),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// Tried to set the limit of a category that does not exist
    #[error("tried to set the limit of a category that is not in the database")]
    UpdateMissingCategory,

    /// An error occurred while writing the expense history as CSV.
    #[error("could not write CSV: {0}")]
    CsvError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::InvalidCategory(None)
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => Alert::error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            Error::EmptyDescription => Alert::error(
                "Missing description",
                "Describe the expense so it can be recognised (and categorised) later.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidAmount(amount) => Alert::error(
                "Invalid amount",
                &format!("{amount} is not a valid amount. Enter a positive whole number."),
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::FutureDate(date) => Alert::error(
                "Invalid expense date",
                &format!("{date} is a date in the future, which is not allowed."),
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::EmptyCategoryName => Alert::error(
                "Missing category name",
                "Enter a name for the category.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::DuplicateCategoryName => Alert::error(
                "Duplicate category name",
                "A category with that name already exists. \
                Choose a different name or set a limit on the existing category.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidCategory(category_id) => Alert::error(
                "Invalid category ID",
                &format!("Could not find a category with the ID {category_id:?}"),
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::NegativeLimit(limit) => Alert::error(
                "Invalid spending limit",
                &format!("{limit} is not a valid limit. Enter zero to clear the limit, or a positive number."),
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::DeleteMissingExpense => Alert::error(
                "Could not delete expense",
                "The expense could not be found. \
                Try refreshing the page to see if the expense has already been deleted.",
            )
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::UpdateMissingCategory => Alert::error(
                "Could not set limit",
                "The category could not be found.",
            )
            .into_response_with_status(StatusCode::NOT_FOUND),
            _ => Alert::error(
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

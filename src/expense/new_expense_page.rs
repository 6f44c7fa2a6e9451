//! The page for recording a new expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    category::{Category, get_all_categories},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        dong_input_styles,
    },
    navigation::NavBar,
    timezone::get_local_offset,
};

/// The state needed for the new expense page.
#[derive(Debug, Clone)]
pub struct NewExpensePageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Ho_Chi_Minh".
    pub local_timezone: String,
    /// The database connection for listing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NewExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page for recording an expense.
///
/// The date field defaults to today in the configured timezone, and the date
/// picker does not allow future dates.
pub async fn get_new_expense_page(
    State(state): State<NewExpensePageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let local_offset = get_local_offset(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(state.local_timezone.clone()))?;
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();

    Ok(new_expense_view(today, &categories).into_response())
}

fn new_expense_view(max_date: Date, categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_EXPENSE_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::EXPENSES_API)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        id="description"
                        type="text"
                        name="description"
                        placeholder="e.g. Lunch at the corner cafe"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="input-wrapper w-full"
                    {
                        input
                            id="amount"
                            type="number"
                            name="amount"
                            min="1"
                            step="1"
                            placeholder="50000"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        id="date"
                        type="date"
                        name="date"
                        value=(max_date)
                        max=(max_date)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                    // An empty value means no category was picked, in which
                    // case the description is run through the keyword
                    // classifier instead.
                    select id="category_id" name="category_id" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected { "Choose for me" }

                        @for category in categories {
                            option value=(category.id) { (category.name) }
                        }
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Record Expense" }
            }
        }
    };

    base("Record Expense", &[dong_input_styles()], &content)
}

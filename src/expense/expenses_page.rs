//! The expense history page.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::get_all_categories,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    pagination::{PaginationConfig, PaginationIndicator, create_pagination_indicators},
};

use super::core::{Expense, count_expenses, get_expenses_paginated};

/// The state needed for the expense history page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Configuration for pagination controls.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Controls pagination of the expense history table.
#[derive(Deserialize)]
pub struct Pagination {
    /// The page number to display. Starts from 1.
    pub page: Option<u64>,
    /// The maximum number of expenses to display per page.
    pub per_page: Option<u64>,
}

/// An expense with everything needed to render its table row.
#[derive(Debug, Clone)]
struct ExpenseRow {
    expense: Expense,
    category_name: String,
    delete_url: String,
}

/// Render one page of the expense history, newest first.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Query(query_params): Query<Pagination>,
) -> Result<Response, Error> {
    let current_page = query_params
        .page
        .unwrap_or(state.pagination_config.default_page)
        .max(1);
    let per_page = query_params
        .per_page
        .unwrap_or(state.pagination_config.default_page_size);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense_count = count_expenses(&connection)
        .inspect_err(|error| tracing::error!("Failed to count expenses: {error}"))?;
    let page_count = (expense_count as f64 / per_page as f64).ceil() as u64;

    let offset = (current_page - 1) * per_page;
    let expenses = get_expenses_paginated(per_page, offset, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?;

    let category_names: HashMap<_, _> = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?
        .into_iter()
        .map(|category| (category.id, category.name))
        .collect();

    let rows = expenses
        .into_iter()
        .map(|expense| ExpenseRow {
            category_name: category_names
                .get(&expense.category_id)
                .map(|name| name.to_string())
                .unwrap_or_default(),
            delete_url: endpoints::format_endpoint(endpoints::DELETE_EXPENSE, expense.id),
            expense,
        })
        .collect::<Vec<_>>();

    let indicators = create_pagination_indicators(
        current_page,
        page_count,
        state.pagination_config.max_pages,
    );

    Ok(expenses_view(&rows, &indicators, per_page).into_response())
}

fn expenses_view(
    rows: &[ExpenseRow],
    indicators: &[PaginationIndicator],
    per_page: u64,
) -> Markup {
    let new_expense_route = endpoints::NEW_EXPENSE_VIEW;
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();

    let table_row = |row: &ExpenseRow| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    (row.expense.date)
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (row.expense.description)
                }

                td class=(format!("{TABLE_CELL_STYLE} tabular-nums"))
                {
                    (format_currency(row.expense.amount))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE)
                    {
                        (row.category_name)
                    }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (delete_button(row, "closest tr", "delete"))
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold" { "Expenses" }

                    div class="flex gap-4"
                    {
                        a href=(endpoints::EXPORT_EXPENSES) class=(LINK_STYLE)
                        {
                            "Export CSV"
                        }

                        a href=(new_expense_route) class=(LINK_STYLE)
                        {
                            "Record Expense"
                        }
                    }
                }

                (expenses_cards_view(rows, new_expense_route))

                section class="hidden lg:block dark:bg-gray-800 lg:max-w-5xl lg:w-full lg:mx-auto"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Date"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Description"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Amount"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Category"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Actions"
                                }
                            }
                        }

                        tbody
                        {
                            @for row in rows {
                                (table_row(row))
                            }

                            @if rows.is_empty() {
                                tr
                                {
                                    td
                                        colspan="5"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No expenses recorded yet. "
                                        a href=(new_expense_route) class=(LINK_STYLE)
                                        {
                                            "Record your first expense"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                (pagination_view(indicators, per_page))
            }
        }
    );

    base("Expenses", &[], &content)
}

fn expenses_cards_view(rows: &[ExpenseRow], new_expense_route: &str) -> Markup {
    html!(
        ul class="lg:hidden space-y-4"
        {
            @for row in rows {
                li class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm dark:border-gray-700 dark:bg-gray-800"
                    data-expense-card="true"
                {
                    div class="flex items-start justify-between gap-3"
                    {
                        div
                        {
                            p class="font-medium text-gray-900 dark:text-white"
                            {
                                (row.expense.description)
                            }
                            p class="text-xs text-gray-500 dark:text-gray-400"
                            {
                                (row.expense.date)
                            }
                        }

                        span class="text-sm tabular-nums text-gray-900 dark:text-white"
                        {
                            (format_currency(row.expense.amount))
                        }
                    }

                    div class="mt-2 flex items-center justify-between gap-4 text-sm"
                    {
                        span class=(CATEGORY_BADGE_STYLE) { (row.category_name) }

                        (delete_button(row, "closest [data-expense-card='true']", "outerHTML"))
                    }
                }
            }

            @if rows.is_empty() {
                li class="rounded border border-dashed border-gray-300 bg-white px-4 py-6 text-center text-sm text-gray-500 dark:border-gray-700 dark:bg-gray-800 dark:text-gray-400"
                {
                    "No expenses recorded yet. "
                    a href=(new_expense_route) class=(LINK_STYLE)
                    {
                        "Record your first expense"
                    }
                }
            }
        }
    )
}

fn delete_button(row: &ExpenseRow, hx_target: &str, hx_swap: &str) -> Markup {
    let confirm_message = format!(
        "Are you sure you want to delete '{}'?",
        row.expense.description
    );

    html!(
        button
            type="button"
            class=(BUTTON_DELETE_STYLE)
            hx-delete=(row.delete_url)
            hx-target=(hx_target)
            hx-swap=(hx_swap)
            hx-confirm=(confirm_message)
        {
            "Delete"
        }
    )
}

fn pagination_view(indicators: &[PaginationIndicator], per_page: u64) -> Markup {
    let page_url = |page: u64| {
        format!(
            "{}?page={page}&per_page={per_page}",
            endpoints::EXPENSES_VIEW
        )
    };

    html!(
        nav class="pagination flex justify-center" aria-label="Expense history pages"
        {
            ul class="pagination flex items-center gap-2"
            {
                @for indicator in indicators {
                    @match indicator {
                        PaginationIndicator::BackButton(page) => li {
                            a href=(page_url(*page)) role="button" class=(LINK_STYLE) { "Back" }
                        }
                        PaginationIndicator::Page(page) => li {
                            a href=(page_url(*page)) class=(LINK_STYLE) { (page) }
                        }
                        PaginationIndicator::CurrPage(page) => li {
                            p aria-current="page" class="font-bold" { (page) }
                        }
                        PaginationIndicator::Ellipsis => li { "..." }
                        PaginationIndicator::NextButton(page) => li {
                            a href=(page_url(*page)) role="button" class=(LINK_STYLE) { "Next" }
                        }
                    }
                }
            }
        }
    )
}

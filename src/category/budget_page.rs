//! The budget page, where spending limits are set per category.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    category::{Category, get_all_categories},
    expense::get_all_expenses,
    html::{
        CATEGORY_BADGE_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, dong_input_styles,
        format_currency,
    },
    navigation::NavBar,
    summary::{limit_status_text, sum_spending_by_category},
};

/// The state needed for the budget page.
#[derive(Debug, Clone)]
pub struct BudgetPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A category with its spending tally and formatted limit URL for template
/// rendering.
#[derive(Debug, Clone)]
struct BudgetRow {
    pub category: Category,
    pub spent: i64,
    pub set_limit_url: String,
}

/// Render the budget page with per-category spending and limit forms.
pub async fn get_budget_page(State(state): State<BudgetPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;
    let expenses = get_all_expenses(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?;

    let spending = sum_spending_by_category(&expenses);

    let rows = categories
        .into_iter()
        .map(|category| {
            let spent = *spending.get(&category.id).unwrap_or(&0);

            BudgetRow {
                set_limit_url: endpoints::format_endpoint(endpoints::PUT_LIMIT, category.id),
                category,
                spent,
            }
        })
        .collect::<Vec<_>>();

    Ok(budget_view(&rows).into_response())
}

fn budget_view(rows: &[BudgetRow]) -> Markup {
    let new_category_route = endpoints::NEW_CATEGORY_VIEW;
    let nav_bar = NavBar::new(endpoints::BUDGET_VIEW).into_html();

    let table_row = |row: &BudgetRow| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE)
                    {
                        (row.category.name)
                    }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (format_currency(row.spent))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (status_view(row))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (limit_form_view(row))
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
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Budget" }

                    a href=(new_category_route) class=(LINK_STYLE)
                    {
                        "Create Category"
                    }
                }

                (budget_cards_view(rows))

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
                                    "Category"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Spent"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Status"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Monthly Limit"
                                }
                            }
                        }

                        tbody
                        {
                            @for row in rows {
                                (table_row(row))
                            }
                        }
                    }
                }
            }
        }
    );

    base("Budget", &[dong_input_styles()], &content)
}

fn budget_cards_view(rows: &[BudgetRow]) -> Markup {
    html!(
        ul class="lg:hidden space-y-4"
        {
            @for row in rows {
                li class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm dark:border-gray-700 dark:bg-gray-800"
                {
                    div class="flex items-start justify-between gap-3"
                    {
                        span class=(CATEGORY_BADGE_STYLE) { (row.category.name) }
                        span class="text-sm tabular-nums text-gray-900 dark:text-white"
                        { (format_currency(row.spent)) }
                    }

                    div class="mt-2 text-sm" { (status_view(row)) }

                    div class="mt-2" { (limit_form_view(row)) }
                }
            }
        }
    )
}

fn status_view(row: &BudgetRow) -> Markup {
    let over_budget = row.spent > row.category.limit().unwrap_or(i64::MAX);
    let status_style = if over_budget {
        "font-medium text-red-600 dark:text-red-400"
    } else {
        "text-gray-600 dark:text-gray-400"
    };

    html!(
        span class=(status_style)
        {
            (limit_status_text(row.spent, row.category.limit()))
        }
    )
}

fn limit_form_view(row: &BudgetRow) -> Markup {
    html!(
        form
            hx-put=(row.set_limit_url)
            hx-target-error="#alert-container"
            class="flex items-center gap-2"
        {
            div class="input-wrapper"
            {
                input
                    type="number"
                    name="limit"
                    min="0"
                    required
                    value=[row.category.limit()]
                    placeholder="No limit"
                    aria-label=(format!("Spending limit for {}", row.category.name))
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button
                type="submit"
                class="px-4 py-2 bg-blue-500 dark:bg-blue-600 hover:bg-blue-600
                    hover:dark:bg-blue-700 text-white rounded"
            {
                "Set"
            }
        }
    )
}

#[cfg(test)]
mod budget_page_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use axum::extract::State;

    use crate::{
        category::{
            budget_page::{BudgetPageState, get_budget_page},
            get_category_by_name, set_spending_limit,
        },
        db::initialize,
        endpoints,
        expense::{NewExpense, create_expense},
        test_utils::{assert_status_ok, get_body_text, parse_html_document},
    };

    fn get_test_state() -> BudgetPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        BudgetPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn shows_a_limit_form_for_every_category() {
        let state = get_test_state();

        let response = get_budget_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let body = get_body_text(response).await;
        let html = parse_html_document(&body);

        let selector = Selector::parse("input[name=limit]").unwrap();
        let input_count = html.select(&selector).count();
        // One form in the table and one in the mobile cards per category.
        assert_eq!(
            input_count, 12,
            "want 12 limit inputs for 6 categories, got {input_count}"
        );
    }

    #[tokio::test]
    async fn forms_submit_to_the_limit_endpoint() {
        let state = get_test_state();
        let food_id = {
            let connection = state.db_connection.lock().unwrap();
            get_category_by_name("Food & Drinks", &connection)
                .unwrap()
                .id
        };

        let response = get_budget_page(State(state)).await.unwrap();

        let body = get_body_text(response).await;
        let want_url = endpoints::format_endpoint(endpoints::PUT_LIMIT, food_id);
        assert!(
            body.contains(&format!("hx-put=\"{want_url}\"")),
            "want a form submitting to {want_url}"
        );
    }

    #[tokio::test]
    async fn shows_budget_status_per_category() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let study = get_category_by_name("Study", &connection).unwrap();
            set_spending_limit(study.id, 100_000, &connection).unwrap();
            create_expense(
                NewExpense {
                    amount: 30_000,
                    date: date!(2025 - 10 - 05),
                    description: "Textbook".to_owned(),
                    category_id: study.id,
                },
                &connection,
            )
            .unwrap();
        }

        let response = get_budget_page(State(state)).await.unwrap();

        let body = get_body_text(response).await;
        assert!(
            body.contains("Remaining: 70.000 đ"),
            "want remaining budget for Study, got {body:?}"
        );
        assert!(body.contains("No limit set yet"));
    }
}

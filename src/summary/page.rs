//! The summary page, showing per-category spending against limits.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    category::get_all_categories,
    expense::get_all_expenses,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base, format_currency},
    navigation::NavBar,
    summary::evaluation::{BudgetReport, CategorySummary, compute_summaries},
};

/// The state needed for the summary page.
#[derive(Debug, Clone)]
pub struct SummaryPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the summary page.
pub async fn get_summary_page(State(state): State<SummaryPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_all_expenses(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?;
    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let report = compute_summaries(&expenses, &categories);

    Ok(summary_view(&report).into_response())
}

/// The status line shown under a category's spent amount.
pub fn limit_status_text(spent: i64, limit: Option<i64>) -> String {
    match limit {
        None => "No limit set yet".to_owned(),
        Some(limit) if spent > limit => {
            format!("Over budget: {}", format_currency(spent - limit))
        }
        Some(limit) => format!("Remaining: {}", format_currency(limit - spent)),
    }
}

fn summary_view(report: &BudgetReport) -> Markup {
    let nav_bar = NavBar::new(endpoints::SUMMARY_VIEW).into_html();

    // Categories that have seen no spending and have no limit set would all
    // render as identical empty cards, so they are left out.
    let summaries: Vec<&CategorySummary> = report
        .categories
        .iter()
        .filter(|summary| summary.spent > 0 || summary.limit.is_some())
        .collect();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full lg:max-w-5xl space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Summary" }

                    span class="text-sm text-gray-600 dark:text-gray-400"
                    {
                        "Total spending: "
                        span class="font-semibold text-gray-900 dark:text-white"
                        {
                            (format_currency(report.total_spending))
                        }
                    }
                }

                @if summaries.is_empty() {
                    div
                        class="rounded border border-dashed border-gray-300 bg-white
                            px-4 py-6 text-center text-sm text-gray-500
                            dark:border-gray-700 dark:bg-gray-800 dark:text-gray-400"
                    {
                        "No spending recorded yet. "
                        a href=(endpoints::NEW_EXPENSE_VIEW) class=(LINK_STYLE)
                        {
                            "Record your first expense"
                        }
                    }
                } @else {
                    div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4"
                    {
                        @for summary in summaries {
                            (summary_card(summary))
                        }
                    }
                }
            }
        }
    );

    base("Summary", &[], &content)
}

fn summary_card(summary: &CategorySummary) -> Markup {
    let status_text = limit_status_text(summary.spent, summary.limit);
    let status_style = if summary.spent > summary.limit.unwrap_or(i64::MAX) {
        "text-sm font-medium text-red-600 dark:text-red-400"
    } else {
        "text-sm text-gray-600 dark:text-gray-400"
    };

    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                dark:border-gray-700 rounded-lg p-4 shadow-md
                hover:shadow-lg transition-shadow flex flex-col"
        {
            h4 class="text-lg font-semibold mb-3 truncate" title=(summary.category)
            {
                (summary.category)
            }

            div class="text-3xl font-bold mb-1" { (format_currency(summary.spent)) }

            p class=(status_style) { (status_text) }

            @if let Some(limit) = summary.limit {
                div class="mt-3"
                {
                    (progress_bar(summary.percent))

                    p class="text-sm text-gray-600 dark:text-gray-400"
                    {
                        (summary.percent) "% of " (format_currency(limit))
                    }
                }
            }
        }
    }
}

/// A horizontal bar showing how much of the limit has been spent.
///
/// Green below 70%, amber from 70%, red at 100%.
fn progress_bar(percent: u8) -> Markup {
    let bar_style = if percent >= 100 {
        "bg-red-600 dark:bg-red-500 h-2.5 rounded-full transition-all"
    } else if percent >= 70 {
        "bg-amber-500 dark:bg-amber-400 h-2.5 rounded-full transition-all"
    } else {
        "bg-green-600 dark:bg-green-500 h-2.5 rounded-full transition-all"
    };

    // Minimum 3% width so the rounded corners stay visible.
    let display_percent = if percent > 0 && percent < 3 {
        3
    } else {
        percent
    };

    html! {
        div
            class="w-full bg-gray-200 dark:bg-gray-700 rounded-full h-2.5 mb-2"
            role="progressbar"
            aria-valuenow=(percent)
            aria-valuemin="0"
            aria-valuemax="100"
        {
            @if percent > 0 {
                div class=(bar_style) style=(format!("width: {display_percent}%")) {}
            }
        }
    }
}

#[cfg(test)]
mod limit_status_text_tests {
    use super::limit_status_text;

    #[test]
    fn no_limit() {
        assert_eq!(limit_status_text(50_000, None), "No limit set yet");
    }

    #[test]
    fn under_limit_shows_remaining() {
        assert_eq!(
            limit_status_text(30_000, Some(100_000)),
            "Remaining: 70.000 đ"
        );
    }

    #[test]
    fn at_limit_shows_zero_remaining() {
        assert_eq!(limit_status_text(100_000, Some(100_000)), "Remaining: 0 đ");
    }

    #[test]
    fn over_limit_shows_overrun() {
        assert_eq!(
            limit_status_text(150_000, Some(120_000)),
            "Over budget: 30.000 đ"
        );
    }
}

//! Alert system for displaying success and error messages to users.
//!
//! Form endpoints return these fragments with a 2xx/4xx status code and HTMX
//! places them in the `#alert-container` element (via `hx-target` for
//! successes and `hx-target-error` from the response-targets extension for
//! errors).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An alert message with a bolded summary line and a details line.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Reports an action that completed successfully.
    Success {
        /// Summary of the action, e.g. "Expense recorded".
        message: String,
        /// Extra context such as counts or timings.
        details: String,
    },
    /// Reports an action that failed.
    Error {
        /// Summary of what went wrong.
        message: String,
        /// What the user can do about it.
        details: String,
    },
}

impl Alert {
    /// Create a new success alert.
    pub fn success(message: &str, details: &str) -> Self {
        Self::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/alerts/
        let (container_style, message, details) = match &self {
            Alert::Success { message, details } => (
                "flex items-start gap-3 p-4 mb-4 rounded-lg border \
                text-green-800 border-green-300 bg-green-50 shadow-lg \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                message.clone(),
                details.clone(),
            ),
            Alert::Error { message, details } => (
                "flex items-start gap-3 p-4 mb-4 rounded-lg border \
                text-red-800 border-red-300 bg-red-50 shadow-lg \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                message.clone(),
                details.clone(),
            ),
        };

        html! {
            div role="alert" class=(container_style)
            {
                div class="flex-1 text-sm"
                {
                    p class="font-semibold" { (message) }

                    @if !details.is_empty() {
                        p { (details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto -mx-1.5 -my-1.5 p-1.5 rounded-lg focus:ring-2 \
                        hover:bg-black/5 dark:hover:bg-white/10"
                    aria-label="Close"
                    hx-on:click="this.closest('div[role=alert]').remove()"
                {
                    "✕"
                }
            }
        }
    }

    /// Render the alert as a response with the given HTTP status code.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_response_with_status(StatusCode::OK)
    }
}

#[cfg(test)]
mod alert_tests {
    use crate::test_utils::parse_html_fragment;

    use super::Alert;

    #[test]
    fn success_alert_contains_message_and_details() {
        let alert = Alert::success("Expense recorded", "Saved 1 expense.");

        let html = alert.into_html().into_string();
        let fragment = parse_html_fragment(&html);
        let text = fragment.root_element().text().collect::<String>();

        assert!(
            text.contains("Expense recorded"),
            "want alert text to contain 'Expense recorded', got {text:?}"
        );
        assert!(
            text.contains("Saved 1 expense."),
            "want alert text to contain 'Saved 1 expense.', got {text:?}"
        );
    }

    #[test]
    fn error_alert_omits_empty_details() {
        let alert = Alert::error("Something went wrong", "");

        let html = alert.into_html().into_string();
        let fragment = parse_html_fragment(&html);
        let paragraphs = fragment
            .select(&scraper::Selector::parse("p").unwrap())
            .count();

        assert_eq!(paragraphs, 1, "want 1 <p> tag, got {paragraphs}");
    }
}

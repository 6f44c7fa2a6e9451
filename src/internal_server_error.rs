//! Defines the 500 page, shown when an error cannot be explained to the user.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// The content of the 500 page.
pub struct InternalServerError<'a> {
    /// A one-line summary of what went wrong.
    pub description: &'a str,
    /// What the user can do about it.
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs.",
        }
    }
}

impl InternalServerError<'_> {
    /// Render the 500 page as HTML.
    pub fn into_html(self) -> Html<String> {
        Html(error_view("Internal Server Error", "500", self.description, self.fix).into_string())
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.into_html()).into_response()
    }
}

/// A route handler that renders the default 500 page.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

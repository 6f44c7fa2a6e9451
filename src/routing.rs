//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category::{
        create_category_endpoint, get_budget_page, get_limits_api, get_new_category_page,
        set_limit_endpoint,
    },
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_expenses_api, get_expenses_page,
        get_export_expenses, get_new_expense_page,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    summary::{get_summary_api, get_summary_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::SUMMARY_VIEW, get(get_summary_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::NEW_EXPENSE_VIEW, get(get_new_expense_page))
        .route(endpoints::EXPORT_EXPENSES, get(get_export_expenses))
        .route(endpoints::BUDGET_VIEW, get(get_budget_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::COFFEE, get(get_coffee))
        .route(
            endpoints::EXPENSES_API,
            get(get_expenses_api).post(create_expense_endpoint),
        )
        .route(endpoints::DELETE_EXPENSE, delete(delete_expense_endpoint))
        .route(endpoints::POST_CATEGORY, post(create_category_endpoint))
        .route(endpoints::PUT_LIMIT, put(set_limit_endpoint))
        .route(endpoints::LIMITS_API, get(get_limits_api))
        .route(endpoints::SUMMARY_API, get(get_summary_api))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}

/// The root path '/' redirects to the summary page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::SUMMARY_VIEW)
}

//! Endpoint for setting a category's spending limit.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    category::{CategoryId, domain::LimitFormData, set_spending_limit},
};

/// The state needed for setting a spending limit.
#[derive(Debug, Clone)]
pub struct SetLimitEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SetLimitEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle limit form submission from the budget page.
///
/// A limit of zero clears the limit.
pub async fn set_limit_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<SetLimitEndpointState>,
    Form(form_data): Form<LimitFormData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match set_spending_limit(category_id, form_data.limit, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::BUDGET_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ (Error::NegativeLimit(_) | Error::UpdateMissingCategory)) => {
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while setting the limit of category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod set_limit_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        endpoints,
        category::{
            domain::LimitFormData, get_category, get_category_by_name,
            set_limit::SetLimitEndpointState, set_limit_endpoint, set_spending_limit,
        },
        test_utils::assert_hx_redirect,
    };

    fn get_test_state() -> SetLimitEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        SetLimitEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn set_limit_succeeds() {
        let state = get_test_state();
        let category_id = {
            let connection = state.db_connection.lock().unwrap();
            get_category_by_name("Food & Drinks", &connection)
                .unwrap()
                .id
        };
        let form = LimitFormData { limit: 120_000 };

        let response = set_limit_endpoint(Path(category_id), State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::BUDGET_VIEW);
        let connection = state.db_connection.lock().unwrap();
        let category = get_category(category_id, &connection).unwrap();
        assert_eq!(category.limit(), Some(120_000));
    }

    #[tokio::test]
    async fn set_limit_to_zero_clears_it() {
        let state = get_test_state();
        let category_id = {
            let connection = state.db_connection.lock().unwrap();
            let category_id = get_category_by_name("Study", &connection).unwrap().id;
            set_spending_limit(category_id, 100_000, &connection).unwrap();

            category_id
        };
        let form = LimitFormData { limit: 0 };

        let response = set_limit_endpoint(Path(category_id), State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let connection = state.db_connection.lock().unwrap();
        let category = get_category(category_id, &connection).unwrap();
        assert_eq!(category.limit(), None);
    }

    #[tokio::test]
    async fn set_limit_rejects_negative_limit() {
        let state = get_test_state();
        let category_id = {
            let connection = state.db_connection.lock().unwrap();
            get_category_by_name("Study", &connection).unwrap().id
        };
        let form = LimitFormData { limit: -1 };

        let response = set_limit_endpoint(Path(category_id), State(state), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn set_limit_with_invalid_id_returns_not_found() {
        let state = get_test_state();
        let form = LimitFormData { limit: 10_000 };

        let response = set_limit_endpoint(Path(999_999), State(state), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

//! JSON endpoint for the current limit mapping.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, category::get_all_categories};

/// The state needed for the limits API.
#[derive(Debug, Clone)]
pub struct LimitsApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LimitsApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Return the categories that have a spending limit set, as a JSON object
/// mapping category name to limit.
pub async fn get_limits_api(State(state): State<LimitsApiState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let limits: BTreeMap<String, i64> = categories
        .iter()
        .filter_map(|category| {
            category
                .limit()
                .map(|limit| (category.name.to_string(), limit))
        })
        .collect();

    Ok(Json(limits).into_response())
}

#[cfg(test)]
mod limits_api_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        category::{api::LimitsApiState, get_category_by_name, get_limits_api, set_spending_limit},
        db::initialize,
        test_utils::{assert_content_type, assert_status_ok, get_body_text},
    };

    fn get_test_state() -> LimitsApiState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        LimitsApiState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn returns_only_categories_with_limits() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let food = get_category_by_name("Food & Drinks", &connection).unwrap();
            let study = get_category_by_name("Study", &connection).unwrap();
            set_spending_limit(food.id, 120_000, &connection).unwrap();
            set_spending_limit(study.id, 50_000, &connection).unwrap();
        }

        let response = get_limits_api(State(state)).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "application/json");
        let body = get_body_text(response).await;
        let json: Value = serde_json::from_str(&body).expect("response is not valid JSON");

        assert_eq!(
            json,
            json!({
                "Food & Drinks": 120_000,
                "Study": 50_000,
            })
        );
    }

    #[tokio::test]
    async fn returns_empty_object_without_limits() {
        let state = get_test_state();

        let response = get_limits_api(State(state)).await.unwrap();

        let body = get_body_text(response).await;
        let json: Value = serde_json::from_str(&body).expect("response is not valid JSON");

        assert_eq!(json, json!({}));
    }
}

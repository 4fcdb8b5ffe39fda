//! # Customer Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use opsdesk_core::Customer;

use crate::error::ApiResult;
use crate::state::AppState;

/// Stores a new customer and echoes it back.
pub async fn add_customer(
    State(state): State<AppState>,
    payload: Result<Json<Customer>, JsonRejection>,
) -> ApiResult<Json<Customer>> {
    let Json(customer) = payload?;

    let stored = state.db.customers().insert(&customer).await?;
    info!(id = %stored.id, "Customer created");

    Ok(Json(stored))
}

/// Lists every stored customer.
pub async fn list_customers(State(state): State<AppState>) -> ApiResult<Json<Vec<Customer>>> {
    Ok(Json(state.db.customers().list_all().await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{app, send};

    fn customer(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": format!("Customer {id}"),
            "email": format!("{}@example.com", id.to_lowercase()),
            "service_history": "",
        })
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let app = app().await;

        let (status, echoed) = send(&app.router, "POST", "/customers/", Some(customer("C1"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(echoed, customer("C1"));

        send(&app.router, "POST", "/customers/", Some(customer("C2"))).await;

        let (status, listed) = send(&app.router, "GET", "/customers/", None).await;
        assert_eq!(status, StatusCode::OK);
        let mut listed = listed.as_array().unwrap().clone();
        listed.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));
        assert_eq!(listed, vec![customer("C1"), customer("C2")]);
    }

    #[tokio::test]
    async fn test_duplicate_customer_conflicts() {
        let app = app().await;
        send(&app.router, "POST", "/customers/", Some(customer("C1"))).await;

        let (status, err) = send(&app.router, "POST", "/customers/", Some(customer("C1"))).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(err["code"], "DUPLICATE_KEY");
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_rejected() {
        let app = app().await;
        let body = json!({ "id": "C9", "name": 7, "email": "x@example.com", "service_history": "" });

        let (status, err) = send(&app.router, "POST", "/customers/", Some(body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err["code"], "VALIDATION_ERROR");
    }
}

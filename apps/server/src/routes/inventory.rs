//! # Inventory Handlers
//!
//! ## Create Flow
//! ```text
//! POST /inventory/ { id, name, quantity, min_stock }
//!        │
//!        ├── body rejected / negative count ──► 4xx VALIDATION_ERROR
//!        ▼
//!   INSERT ──── duplicate id ──► 409 DUPLICATE_KEY
//!        │
//!        ▼
//!   quantity < min_stock ? ──yes──► notifier (failure only logged)
//!        │
//!        ▼
//!   200 + item echoed
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use opsdesk_core::validation::validate_inventory_item;
use opsdesk_core::InventoryItem;

use crate::error::ApiResult;
use crate::state::AppState;

/// Response for `GET /inventory/qr/{item_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrResponse {
    pub qr_url: String,
}

/// Stores a new item and alerts when it starts below its threshold.
pub async fn add_item(
    State(state): State<AppState>,
    payload: Result<Json<InventoryItem>, JsonRejection>,
) -> ApiResult<Json<InventoryItem>> {
    let Json(item) = payload?;
    validate_inventory_item(&item)?;

    let stored = state.db.inventory().insert(&item).await?;
    info!(id = %stored.id, quantity = stored.quantity, "Inventory item created");

    if let Some(alert) = stored.low_stock_alert() {
        match state
            .notifier
            .alert_low_stock(&alert.item_name, alert.quantity)
            .await
        {
            Ok(()) => info!(id = %stored.id, "Low-stock alert sent"),
            Err(e) => error!(id = %stored.id, error = %e, "Low-stock alert failed"),
        }
    }

    Ok(Json(stored))
}

/// Lists every stored item.
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<InventoryItem>>> {
    Ok(Json(state.db.inventory().list_all().await?))
}

/// Writes a QR image for `item_id` and returns where it is served.
pub async fn generate_code(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<QrResponse>> {
    let Path(item_id) = path?;
    let qr_url = state.codes.generate(&item_id).await?;
    Ok(Json(QrResponse { qr_url }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{app, app_with, send};
    use crate::services::notifier::testing::{FailingNotifier, RecordingNotifier};

    #[tokio::test]
    async fn test_create_above_threshold_sends_nothing() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app_with(notifier.clone()).await;

        let body = json!({ "id": "A", "name": "Dish", "quantity": 10, "min_stock": 2 });
        let (status, echoed) = send(&app.router, "POST", "/inventory/", Some(body.clone())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(echoed, body);
        assert!(notifier.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_equal_to_threshold_is_not_low() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app_with(notifier.clone()).await;

        let body = json!({ "id": "E", "name": "Cable", "quantity": 3, "min_stock": 3 });
        let (status, _) = send(&app.router, "POST", "/inventory/", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(notifier.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_below_threshold_sends_one_alert() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app_with(notifier.clone()).await;

        let body = json!({ "id": "L1", "name": "Standard Kit", "quantity": 2, "min_stock": 5 });
        let (status, _) = send(&app.router, "POST", "/inventory/", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].item_name, "Standard Kit");
        assert_eq!(sent[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_failed_alert_does_not_fail_create() {
        let app = app_with(Arc::new(FailingNotifier)).await;

        let body = json!({ "id": "L2", "name": "Router", "quantity": 0, "min_stock": 1 });
        let (status, echoed) = send(&app.router, "POST", "/inventory/", Some(body.clone())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(echoed, body);

        let (_, listed) = send(&app.router, "GET", "/inventory/", None).await;
        assert_eq!(listed, json!([body]));
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts_and_keeps_first() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app_with(notifier.clone()).await;

        let first = json!({ "id": "X1", "name": "First", "quantity": 4, "min_stock": 2 });
        let second = json!({ "id": "X1", "name": "Second", "quantity": 0, "min_stock": 9 });
        send(&app.router, "POST", "/inventory/", Some(first.clone())).await;

        let (status, err) = send(&app.router, "POST", "/inventory/", Some(second)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(err["code"], "DUPLICATE_KEY");
        // Rejected inserts never alert
        assert!(notifier.sent().await.is_empty());

        let (_, listed) = send(&app.router, "GET", "/inventory/", None).await;
        assert_eq!(listed, json!([first]));
    }

    #[tokio::test]
    async fn test_shape_violations_are_rejected() {
        let app = app().await;

        let missing = json!({ "id": "M", "name": "No counts" });
        let (status, err) = send(&app.router, "POST", "/inventory/", Some(missing)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err["code"], "VALIDATION_ERROR");

        let negative = json!({ "id": "N", "name": "Oops", "quantity": -1, "min_stock": 0 });
        let (status, err) = send(&app.router, "POST", "/inventory/", Some(negative)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err["code"], "VALIDATION_ERROR");

        let (_, listed) = send(&app.router, "GET", "/inventory/", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_list_returns_every_created_item() {
        let app = app().await;
        let items = [
            json!({ "id": "A", "name": "Alpha", "quantity": 1, "min_stock": 0 }),
            json!({ "id": "B", "name": "Bravo", "quantity": 2, "min_stock": 1 }),
            json!({ "id": "C", "name": "Charlie", "quantity": 3, "min_stock": 2 }),
        ];
        for item in &items {
            send(&app.router, "POST", "/inventory/", Some(item.clone())).await;
        }

        let (status, listed) = send(&app.router, "GET", "/inventory/", None).await;

        assert_eq!(status, StatusCode::OK);
        let mut listed = listed.as_array().unwrap().clone();
        listed.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));
        assert_eq!(listed, items.to_vec());
    }

    #[tokio::test]
    async fn test_generate_code_is_stable() {
        let app = app().await;

        let (status, first) = send(&app.router, "GET", "/inventory/qr/X1", None).await;
        let (_, second) = send(&app.router, "GET", "/inventory/qr/X1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, json!({ "qr_url": "/static/X1.png" }));
        assert_eq!(first, second);
        assert!(app.static_dir.path().join("X1.png").exists());
    }

    #[tokio::test]
    async fn test_generated_code_is_served() {
        let app = app().await;
        send(&app.router, "GET", "/inventory/qr/X1", None).await;

        let request = axum::http::Request::builder()
            .uri("/static/X1.png")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = tower::ServiceExt::oneshot(app.router.clone(), request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "image/png");
    }

    #[tokio::test]
    async fn test_code_url_is_fetchable_for_ids_with_reserved_characters() {
        let app = app().await;

        let (status, body) = send(&app.router, "GET", "/inventory/qr/kit%20%233", None).await;

        assert_eq!(status, StatusCode::OK);
        let qr_url = body["qr_url"].as_str().unwrap().to_string();
        assert_eq!(qr_url, "/static/kit%20%233.png");
        assert!(qr_url.parse::<axum::http::Uri>().is_ok());

        let request = axum::http::Request::builder()
            .uri(qr_url.as_str())
            .body(axum::body::Body::empty())
            .unwrap();
        let response = tower::ServiceExt::oneshot(app.router.clone(), request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "image/png");
    }

    #[tokio::test]
    async fn test_undecodable_path_is_a_json_error() {
        let app = app().await;

        let (status, err) = send(&app.router, "GET", "/inventory/qr/%FF", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "VALIDATION_ERROR");
        assert!(err["message"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_generate_code_rejects_directory_names() {
        let app = app().await;

        let (status, err) = send(&app.router, "GET", "/inventory/qr/..", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "VALIDATION_ERROR");
    }
}

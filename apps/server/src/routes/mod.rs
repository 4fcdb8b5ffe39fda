//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Opsdesk Router                                   │
//! │                                                                         │
//! │  POST/GET  /inventory/             inventory::add_item / list_items     │
//! │  GET       /inventory/qr/{id}      inventory::generate_code             │
//! │  POST/GET  /customers/             customers::add_customer / list       │
//! │  POST      /tickets/               tickets::create_ticket               │
//! │  POST      /tasks/                 tasks::create_task                   │
//! │  WS        /ws/chat                chat::chat_handler                   │
//! │  GET       /                       console::index                       │
//! │  GET       /health                 health                               │
//! │  GET       {public_prefix}/*       generated QR images (ServeDir)       │
//! │                                                                         │
//! │  All routes share AppState and one TraceLayer.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collection paths carry a trailing slash and only that form is routed.

pub mod chat;
pub mod console;
pub mod customers;
pub mod inventory;
pub mod tasks;
pub mod tickets;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(state.codes.static_dir());
    let prefix = state.codes.public_prefix().to_string();

    Router::new()
        .route("/", get(console::index))
        .route("/health", get(health))
        .route(
            "/inventory/",
            get(inventory::list_items).post(inventory::add_item),
        )
        .route("/inventory/qr/{item_id}", get(inventory::generate_code))
        .route(
            "/customers/",
            get(customers::list_customers).post(customers::add_customer),
        )
        .route("/tickets/", post(tickets::create_ticket))
        .route("/tasks/", post(tasks::create_task))
        .route("/ws/chat", get(chat::chat_handler))
        .nest_service(&prefix, static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise
    pub status: &'static str,
    pub timestamp: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.db.health_check().await {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use opsdesk_db::{Database, DbConfig};

    use crate::services::{Notifier, QrGenerator};
    use crate::state::AppState;

    /// Router over an in-memory database and a scratch static directory.
    pub struct TestApp {
        pub router: Router,
        pub state: AppState,
        pub static_dir: TempDir,
    }

    pub async fn app_with(notifier: Arc<dyn Notifier>) -> TestApp {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let static_dir = TempDir::new().unwrap();
        let codes = QrGenerator::new(static_dir.path(), "/static");
        let state = AppState::new(db, notifier, codes);

        TestApp {
            router: super::router(state.clone()),
            state,
            static_dir,
        }
    }

    pub async fn app() -> TestApp {
        app_with(Arc::new(crate::services::LogNotifier)).await
    }

    /// Sends one request and returns the status with the decoded JSON body.
    pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}

//! # Opsdesk Server
//!
//! HTTP and WebSocket surface for the Opsdesk back office.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Opsdesk Server                                   │
//! │                                                                         │
//! │  Browser console ──► axum Router ──► handlers ──► opsdesk-db (SQLite)  │
//! │                           │              │                              │
//! │                           │              ├──► Notifier (SMTP / log)     │
//! │                           │              └──► QrGenerator (static/)     │
//! │                           │                                             │
//! │                           └──► /ws/chat echo sessions                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`config`]: layered configuration (defaults, TOML file, environment)
//! - [`error`]: API and startup error types
//! - [`state`]: shared handler state
//! - [`services`]: mail alerts and QR rendering
//! - [`routes`]: the router and its handlers

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult, StartupError};
pub use routes::router;
pub use state::AppState;

//! # Application State
//!
//! Everything a handler needs, built once at startup and cloned per request.

use std::sync::Arc;

use tracing::{info, warn};

use opsdesk_db::{Database, DbConfig};

use crate::config::AppConfig;
use crate::error::StartupError;
use crate::services::{LogNotifier, Notifier, QrGenerator, SmtpNotifier};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub notifier: Arc<dyn Notifier>,
    pub codes: QrGenerator,
}

impl AppState {
    /// Assembles state from already-built parts.
    pub fn new(db: Database, notifier: Arc<dyn Notifier>, codes: QrGenerator) -> Self {
        AppState {
            db,
            notifier,
            codes,
        }
    }

    /// Opens the database, prepares the static directory and picks a notifier.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        tokio::fs::create_dir_all(&config.storage.static_dir).await?;

        let db = Database::new(
            DbConfig::new(&config.database.path)
                .max_connections(config.database.max_connections)
                .connect_timeout(config.database.acquire_timeout()),
        )
        .await?;

        let notifier: Arc<dyn Notifier> = match &config.mail {
            Some(mail) => Arc::new(SmtpNotifier::new(mail)?),
            None => {
                warn!("No [mail] relay configured; low-stock alerts will only be logged");
                Arc::new(LogNotifier)
            }
        };

        let codes = QrGenerator::new(
            &config.storage.static_dir,
            config.storage.public_prefix.clone(),
        );

        info!(
            static_dir = %config.storage.static_dir.display(),
            prefix = %config.storage.public_prefix,
            "Application state ready"
        );

        Ok(AppState::new(db, notifier, codes))
    }
}

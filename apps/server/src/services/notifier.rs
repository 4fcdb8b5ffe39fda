//! # Low-Stock Notifier
//!
//! Delivers the one-shot alert raised when an item is created below its
//! reorder threshold.
//!
//! ## Delivery Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    POST /inventory/ with quantity < min_stock           │
//! │                                                                         │
//! │  1. INSERT row ──────────────► committed                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  2. notifier.alert_low_stock(name, quantity)                           │
//! │           │                                                             │
//! │           ├── Ok  ──► info! "Low-stock alert sent"                     │
//! │           └── Err ──► error! logged, request still succeeds            │
//! │                                                                         │
//! │  At most one attempt per created item. No queue, no retry.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`SmtpNotifier`] submits over STARTTLS with credentials from
//! [`MailConfig`]. [`LogNotifier`] is used when no relay is configured.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info, warn};

use opsdesk_core::{LowStockAlert, LOW_STOCK_SUBJECT};

use crate::config::MailConfig;

/// Notification failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// A configured sender or recipient does not parse as a mailbox.
    #[error("Invalid {field} address: {reason}")]
    InvalidAddress { field: &'static str, reason: String },

    /// The relay host could not be turned into a transport.
    #[error("Invalid relay: {0}")]
    Relay(String),

    /// The message could not be assembled.
    #[error("Failed to build message: {0}")]
    Build(String),

    /// The relay refused the message, rejected the login, or was unreachable.
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Sends low-stock alerts.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one alert for the given item name and remaining quantity.
    async fn alert_low_stock(&self, item_name: &str, quantity: i64) -> Result<(), NotifyError>;
}

// =============================================================================
// SMTP
// =============================================================================

/// Mails alerts through an authenticated STARTTLS relay.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl SmtpNotifier {
    /// Builds the transport from configuration. No connection is made yet.
    pub fn new(config: &MailConfig) -> Result<Self, NotifyError> {
        let sender = parse_mailbox("sender", &config.sender)?;
        let recipient = parse_mailbox("recipient", &config.recipient)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.relay_host)
            .map_err(|e| NotifyError::Relay(e.to_string()))?
            .port(config.relay_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.secret.clone(),
            ))
            .build();

        info!(
            relay = %config.relay_host,
            port = config.relay_port,
            recipient = %recipient,
            "SMTP notifier configured"
        );

        Ok(SmtpNotifier {
            transport,
            sender,
            recipient,
        })
    }

    /// Builds the alert email without sending it.
    pub fn compose(&self, alert: &LowStockAlert) -> Result<Message, NotifyError> {
        Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(LOW_STOCK_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(alert.body())
            .map_err(|e| NotifyError::Build(e.to_string()))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn alert_low_stock(&self, item_name: &str, quantity: i64) -> Result<(), NotifyError> {
        let alert = LowStockAlert::new(item_name, quantity);
        let message = self.compose(&alert)?;

        debug!(item = %item_name, quantity, "Submitting low-stock alert");

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        Ok(())
    }
}

fn parse_mailbox(field: &'static str, value: &str) -> Result<Mailbox, NotifyError> {
    value.parse::<Mailbox>().map_err(|e| NotifyError::InvalidAddress {
        field,
        reason: e.to_string(),
    })
}

// =============================================================================
// Log only
// =============================================================================

/// Records alerts in the log. Used when no mail relay is configured.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn alert_low_stock(&self, item_name: &str, quantity: i64) -> Result<(), NotifyError> {
        let alert = LowStockAlert::new(item_name, quantity);
        warn!(item = %item_name, quantity, "{}", alert.body());
        Ok(())
    }
}

// =============================================================================
// Test doubles
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tokio::sync::Mutex;

    /// Remembers every alert it is asked to send.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        sent: Mutex<Vec<LowStockAlert>>,
    }

    impl RecordingNotifier {
        pub async fn sent(&self) -> Vec<LowStockAlert> {
            self.sent.lock().await.clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn alert_low_stock(&self, item_name: &str, quantity: i64) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .await
                .push(LowStockAlert::new(item_name, quantity));
            Ok(())
        }
    }

    /// Fails every delivery, like a relay rejecting the login.
    #[derive(Debug, Default)]
    pub struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn alert_low_stock(&self, _item_name: &str, _quantity: i64) -> Result<(), NotifyError> {
            Err(NotifyError::Delivery("535 authentication rejected".to_string()))
        }
    }
}

//! # Services
//!
//! Side effects triggered by handlers: mail alerts and QR images.

pub mod notifier;
pub mod qr;

pub use notifier::{LogNotifier, Notifier, NotifyError, SmtpNotifier};
pub use qr::{QrError, QrGenerator};

//! # opsdesk-core: Records and Rules for Opsdesk
//!
//! The four record kinds the back office keeps, and the validation applied
//! to them before anything touches the database. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Opsdesk Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Operator Console (HTML) / API clients              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / WebSocket                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  opsdesk-server (axum routes)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ opsdesk-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐  ┌───────────┐  ┌───────────────────┐      │   │
//! │  │   │    types      │  │   error   │  │    validation     │      │   │
//! │  │   │ InventoryItem │  │ CoreError │  │ stock levels      │      │   │
//! │  │   │ Customer      │  │ Validation│  │ file-safe ids     │      │   │
//! │  │   │ Ticket / Task │  │   Error   │  │                   │      │   │
//! │  │   └───────────────┘  └───────────┘  └───────────────────┘      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  opsdesk-db (SQLite repositories)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - InventoryItem, Customer, Ticket, Task
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules checked before persistence
//!
//! ## Example Usage
//!
//! ```rust
//! use opsdesk_core::InventoryItem;
//!
//! let item = InventoryItem {
//!     id: "SL-KIT-01".to_string(),
//!     name: "Standard Kit".to_string(),
//!     quantity: 2,
//!     min_stock: 5,
//! };
//!
//! assert!(item.is_below_min_stock());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix of every reply sent on the chat echo channel.
pub const ECHO_PREFIX: &str = "Message received: ";

/// Subject line of the low-stock alert email.
pub const LOW_STOCK_SUBJECT: &str = "Inventory Alert";

/// Maximum length of an identifier that can be turned into a QR file name.
///
/// Keeps `{id}.png` below the 255-byte file name limit of common filesystems.
pub const MAX_CODE_ID_LEN: usize = 200;

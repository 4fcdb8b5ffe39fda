//! # opsdesk-db: Database Layer for Opsdesk
//!
//! SQLite storage for the four record kinds, accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Opsdesk Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (POST /inventory/)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     opsdesk-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │               │    │ InventoryRepo  │   │              │   │   │
//! │  │   │ SqlitePool    │◄───│ CustomerRepo   │   │ 0001_initial │   │   │
//! │  │   │ Connection    │    │ TicketRepo     │   │ _schema.sql  │   │   │
//! │  │   │ Management    │    │ TaskRepo       │   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (data.db)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per table
//!
//! ## Usage
//!
//! ```rust,ignore
//! use opsdesk_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("data.db")).await?;
//!
//! db.inventory().insert(&item).await?;
//! let items = db.inventory().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::customer::CustomerRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::task::TaskRepository;
pub use repository::ticket::TicketRepository;

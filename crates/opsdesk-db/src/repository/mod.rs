//! # Repository Module
//!
//! One repository per table. Each exposes the same narrow contract:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Contract                                  │
//! │                                                                         │
//! │  insert(&record)   → one INSERT, auto-committed                        │
//! │                      DbError::UniqueViolation if the id is taken        │
//! │                                                                         │
//! │  list_all()        → SELECT every row, storage order (no ORDER BY)     │
//! │                                                                         │
//! │  count()           → row count, for diagnostics and seeding            │
//! │                                                                         │
//! │  No update, no delete: records are create-then-read-only.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`InventoryRepository`](inventory::InventoryRepository)
//! - [`CustomerRepository`](customer::CustomerRepository)
//! - [`TicketRepository`](ticket::TicketRepository)
//! - [`TaskRepository`](task::TaskRepository)

pub mod customer;
pub mod inventory;
pub mod task;
pub mod ticket;

//! # Ticket Repository
//!
//! Database operations for support tickets. `customer_id` is stored as
//! given; no customer lookup happens.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use opsdesk_core::Ticket;

/// Repository for ticket database operations.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: SqlitePool,
}

impl TicketRepository {
    /// Creates a new TicketRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TicketRepository { pool }
    }

    /// Inserts a new ticket.
    pub async fn insert(&self, ticket: &Ticket) -> DbResult<Ticket> {
        debug!(id = %ticket.id, customer_id = %ticket.customer_id, "Inserting ticket");

        sqlx::query(
            r#"
            INSERT INTO tickets (id, customer_id, issue, status)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&ticket.id)
        .bind(&ticket.customer_id)
        .bind(&ticket.issue)
        .bind(&ticket.status)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_value(&ticket.id))?;

        Ok(ticket.clone())
    }

    /// Lists every ticket in storage order.
    ///
    /// Not exposed over HTTP.
    pub async fn list_all(&self) -> DbResult<Vec<Ticket>> {
        let tickets =
            sqlx::query_as::<_, Ticket>("SELECT id, customer_id, issue, status FROM tickets")
                .fetch_all(&self.pool)
                .await?;

        Ok(tickets)
    }

    /// Counts tickets (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

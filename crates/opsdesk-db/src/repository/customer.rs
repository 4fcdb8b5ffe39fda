//! # Customer Repository
//!
//! Database operations for customer profiles.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use opsdesk_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a new customer.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - The customer exactly as stored
    /// * `Err(DbError::UniqueViolation)` - A customer with this id exists
    pub async fn insert(&self, customer: &Customer) -> DbResult<Customer> {
        debug!(id = %customer.id, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, service_history)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.service_history)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_value(&customer.id))?;

        Ok(customer.clone())
    }

    /// Lists every customer in storage order.
    pub async fn list_all(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, service_history FROM customers",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    /// Counts customers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::database;

    fn customer(id: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: "Ada Lovelace".to_string(),
            // Stored verbatim, no format check
            email: "not-an-email".to_string(),
            service_history: "Installed dish 2024-03; replaced router".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let repo = database().await.customers();

        assert_eq!(repo.insert(&customer("C1")).await.unwrap(), customer("C1"));
        repo.insert(&customer("C2")).await.unwrap();

        let mut listed = repo.list_all().await.unwrap();
        listed.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(listed, vec![customer("C1"), customer("C2")]);
    }

    #[tokio::test]
    async fn test_duplicate_customer() {
        let repo = database().await.customers();
        repo.insert(&customer("C1")).await.unwrap();

        let err = repo.insert(&customer("C1")).await.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}

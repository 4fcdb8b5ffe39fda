//! # Inventory Repository
//!
//! Database operations for inventory items.
//!
//! The low-stock check is not done here: the repository only stores rows.
//! The server decides whether to alert after the insert has committed.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use opsdesk_core::InventoryItem;

/// Repository for inventory database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = InventoryRepository::new(pool);
///
/// repo.insert(&item).await?;
/// let items = repo.list_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Inserts a new item.
    ///
    /// ## Returns
    /// * `Ok(InventoryItem)` - The item exactly as stored
    /// * `Err(DbError::UniqueViolation)` - An item with this id exists
    pub async fn insert(&self, item: &InventoryItem) -> DbResult<InventoryItem> {
        debug!(id = %item.id, quantity = item.quantity, "Inserting inventory item");

        sqlx::query(
            r#"
            INSERT INTO inventory (id, name, quantity, min_stock)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(item.min_stock)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_value(&item.id))?;

        Ok(item.clone())
    }

    /// Lists every item in storage order.
    pub async fn list_all(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT id, name, quantity, min_stock FROM inventory",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Listed inventory");
        Ok(items)
    }

    /// Counts items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::database;

    fn item(id: &str, quantity: i64, min_stock: i64) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            name: format!("Item {id}"),
            quantity,
            min_stock,
        }
    }

    #[tokio::test]
    async fn test_insert_returns_item_unchanged() {
        let repo = database().await.inventory();
        let input = item("A", 7, 3);

        let stored = repo.insert(&input).await.unwrap();

        assert_eq!(stored, input);
        assert_eq!(repo.list_all().await.unwrap(), vec![input]);
    }

    #[tokio::test]
    async fn test_list_all_returns_every_field() {
        let repo = database().await.inventory();
        let inputs = vec![item("A", 1, 5), item("B", 10, 2), item("C", 0, 0)];
        for input in &inputs {
            repo.insert(input).await.unwrap();
        }

        let mut listed = repo.list_all().await.unwrap();
        listed.sort_by(|a, b| a.id.cmp(&b.id));

        assert_eq!(listed, inputs);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected_and_first_row_kept() {
        let repo = database().await.inventory();
        repo.insert(&item("X1", 4, 2)).await.unwrap();

        let err = repo.insert(&item("X1", 99, 1)).await.unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "inventory.id");
                assert_eq!(value, "X1");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }

        let listed = repo.list_all().await.unwrap();
        assert_eq!(listed, vec![item("X1", 4, 2)]);
    }
}

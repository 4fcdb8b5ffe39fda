//! # Task Repository
//!
//! Database operations for tasks.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use opsdesk_core::Task;

/// Repository for task database operations.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    pool: SqlitePool,
}

impl TaskRepository {
    /// Creates a new TaskRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TaskRepository { pool }
    }

    /// Inserts a new task.
    pub async fn insert(&self, task: &Task) -> DbResult<Task> {
        debug!(id = %task.id, assigned_to = %task.assigned_to, "Inserting task");

        sqlx::query(
            r#"
            INSERT INTO tasks (id, description, assigned_to, status)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&task.id)
        .bind(&task.description)
        .bind(&task.assigned_to)
        .bind(&task.status)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_value(&task.id))?;

        Ok(task.clone())
    }

    /// Lists every task in storage order.
    ///
    /// Not exposed over HTTP.
    pub async fn list_all(&self) -> DbResult<Vec<Task>> {
        let tasks =
            sqlx::query_as::<_, Task>("SELECT id, description, assigned_to, status FROM tasks")
                .fetch_all(&self.pool)
                .await?;

        Ok(tasks)
    }

    /// Counts tasks (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

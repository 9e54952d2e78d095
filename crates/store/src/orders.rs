use async_trait::async_trait;
use domain::Order;
use sqlx::PgPool;
use uuid::Uuid;

use crate::StoreError;

/// Document store access for placed orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Load an order by id; `NotFound` when absent.
    async fn get(&self, order_id: Uuid) -> Result<Order, StoreError>;

    /// Insert or replace an order document.
    async fn put(&self, order: &Order) -> Result<(), StoreError>;

    /// Delete an order; `NotFound` when no such document exists.
    async fn delete(&self, order_id: Uuid) -> Result<(), StoreError>;

    /// All orders placed by a user, newest first. Empty vec when none.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError>;
}

/// PostgreSQL order store; each order is one JSONB document row with the
/// owning user and creation time lifted into columns for querying.
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn get(&self, order_id: Uuid) -> Result<Order, StoreError> {
        let doc: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT doc FROM orders WHERE order_id = $1")
                .bind(order_id)
                .fetch_optional(&self.pool)
                .await?;

        let doc = doc.ok_or(StoreError::NotFound(order_id))?;
        Ok(serde_json::from_value(doc)?)
    }

    async fn put(&self, order: &Order) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO orders (order_id, user_id, doc, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (order_id)
            DO UPDATE SET doc = EXCLUDED.doc
            "#,
        )
        .bind(order.id)
        .bind(order.user_id)
        .bind(serde_json::to_value(order)?)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(order_id = %order.id, user_id = %order.user_id, "Order saved");

        Ok(())
    }

    async fn delete(&self, order_id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM orders WHERE order_id = $1")
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(order_id));
        }

        tracing::info!(order_id = %order_id, "Order deleted");

        Ok(())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError> {
        let docs: Vec<serde_json::Value> = sqlx::query_scalar(
            r#"
            SELECT doc FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        docs.into_iter()
            .map(|doc| Ok(serde_json::from_value(doc)?))
            .collect()
    }
}

use async_trait::async_trait;
use chrono::Utc;
use domain::Cart;
use sqlx::PgPool;
use uuid::Uuid;

use crate::StoreError;

/// Document store access for shopping carts.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Load a cart by id; `NotFound` when absent.
    async fn get(&self, cart_id: Uuid) -> Result<Cart, StoreError>;

    /// Insert or replace a cart document.
    async fn put(&self, cart: &Cart) -> Result<(), StoreError>;
}

/// PostgreSQL cart store; each cart is one JSONB document row.
pub struct PostgresCartStore {
    pool: PgPool,
}

impl PostgresCartStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStore for PostgresCartStore {
    async fn get(&self, cart_id: Uuid) -> Result<Cart, StoreError> {
        let doc: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT doc FROM carts WHERE cart_id = $1")
                .bind(cart_id)
                .fetch_optional(&self.pool)
                .await?;

        let doc = doc.ok_or(StoreError::NotFound(cart_id))?;
        Ok(serde_json::from_value(doc)?)
    }

    async fn put(&self, cart: &Cart) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO carts (cart_id, user_id, doc, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (cart_id)
            DO UPDATE SET doc = EXCLUDED.doc, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(cart.id)
        .bind(cart.user_id)
        .bind(serde_json::to_value(cart)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        tracing::debug!(cart_id = %cart.id, items = cart.line_items.len(), "Cart saved");

        Ok(())
    }
}

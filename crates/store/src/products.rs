use async_trait::async_trait;
use chrono::Utc;
use domain::Product;
use sqlx::PgPool;
use uuid::Uuid;

use crate::StoreError;

/// Document store access for the product catalog.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product in the catalog.
    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Load a product by id; `NotFound` when absent.
    async fn get(&self, product_id: Uuid) -> Result<Product, StoreError>;

    /// Insert or replace a product document.
    async fn put(&self, product: &Product) -> Result<(), StoreError>;

    /// Delete a product; `NotFound` when no such document exists.
    async fn delete(&self, product_id: Uuid) -> Result<(), StoreError>;
}

/// PostgreSQL product store; each product is one JSONB document row.
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let docs: Vec<serde_json::Value> =
            sqlx::query_scalar("SELECT doc FROM products ORDER BY updated_at DESC")
                .fetch_all(&self.pool)
                .await?;

        docs.into_iter()
            .map(|doc| Ok(serde_json::from_value(doc)?))
            .collect()
    }

    async fn get(&self, product_id: Uuid) -> Result<Product, StoreError> {
        let doc: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT doc FROM products WHERE product_id = $1")
                .bind(product_id)
                .fetch_optional(&self.pool)
                .await?;

        let doc = doc.ok_or(StoreError::NotFound(product_id))?;
        Ok(serde_json::from_value(doc)?)
    }

    async fn put(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO products (product_id, doc, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (product_id)
            DO UPDATE SET doc = EXCLUDED.doc, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(product.id)
        .bind(serde_json::to_value(product)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        tracing::info!(product_id = %product.id, name = %product.name, "Product saved");

        Ok(())
    }

    async fn delete(&self, product_id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(product_id));
        }

        tracing::info!(product_id = %product_id, "Product deleted");

        Ok(())
    }
}

use async_trait::async_trait;
use domain::User;
use sqlx::PgPool;
use uuid::Uuid;

use crate::StoreError;

/// Document store access for user accounts. Lookup only; registration and
/// credentials are handled elsewhere.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Load a user by id; `NotFound` when absent.
    async fn get(&self, user_id: Uuid) -> Result<User, StoreError>;
}

/// PostgreSQL user store; each user is one JSONB document row.
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn get(&self, user_id: Uuid) -> Result<User, StoreError> {
        let doc: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT doc FROM users WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        let doc = doc.ok_or(StoreError::NotFound(user_id))?;
        Ok(serde_json::from_value(doc)?)
    }
}

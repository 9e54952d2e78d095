pub mod carts;
pub mod memory;
pub mod orders;
pub mod products;
pub mod users;

pub use carts::{CartStore, PostgresCartStore};
pub use memory::{MemoryCartStore, MemoryOrderStore, MemoryProductStore, MemoryUserStore};
pub use orders::{OrderStore, PostgresOrderStore};
pub use products::{PostgresProductStore, ProductStore};
pub use users::{PostgresUserStore, UserStore};

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

/// Apply the embedded schema migrations. Safe to run on every startup.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

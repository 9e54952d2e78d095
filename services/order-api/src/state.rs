use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use catalog::CachedProductStore;
use checkout::CommandInvoker;
use common::config::AppConfig;
use sqlx::postgres::PgPoolOptions;
use store::{
    CartStore, OrderStore, PostgresCartStore, PostgresOrderStore, PostgresProductStore,
    PostgresUserStore, ProductStore, UserStore,
};
use tracing::info;

use crate::auth::AuthService;

/// Application state shared across handlers. All catalog reads and writes go
/// through the cache proxy held in `products`.
#[derive(Clone)]
pub struct AppState {
    pub carts: Arc<dyn CartStore>,
    pub orders: Arc<dyn OrderStore>,
    pub products: Arc<dyn ProductStore>,
    pub users: Arc<dyn UserStore>,
    pub invoker: Arc<CommandInvoker>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        info!("Connecting to database");
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database_url())
            .await?;
        info!("Database connected");

        store::run_migrations(&pool).await?;
        info!("Migrations applied");

        let carts: Arc<dyn CartStore> = Arc::new(PostgresCartStore::new(pool.clone()));
        let orders: Arc<dyn OrderStore> = Arc::new(PostgresOrderStore::new(pool.clone()));
        let users: Arc<dyn UserStore> = Arc::new(PostgresUserStore::new(pool.clone()));

        let backing_products = Arc::new(PostgresProductStore::new(pool));
        let products: Arc<dyn ProductStore> = Arc::new(CachedProductStore::new(
            backing_products,
            Duration::from_secs(config.cache_ttl_secs),
        ));

        Ok(Self::assemble(carts, orders, products, users))
    }

    /// Wire the state from already-built stores; tests use this with the
    /// in-memory implementations.
    pub fn assemble(
        carts: Arc<dyn CartStore>,
        orders: Arc<dyn OrderStore>,
        products: Arc<dyn ProductStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        let auth = Arc::new(AuthService::new(users.clone()));
        Self {
            carts,
            orders,
            products,
            users,
            invoker: Arc::new(CommandInvoker::new()),
            auth,
        }
    }
}

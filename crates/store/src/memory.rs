//! In-memory store implementations backed by `RwLock<HashMap>`.
//!
//! These stand in for PostgreSQL in unit and integration tests across the
//! workspace. The product store counts backing fetches so cache tests can
//! assert hit/miss behavior, and every writable store can be switched into a
//! failing mode to exercise partial-write handling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use domain::{Cart, Order, Product, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::carts::CartStore;
use crate::orders::OrderStore;
use crate::products::ProductStore;
use crate::users::UserStore;
use crate::StoreError;

fn unavailable() -> StoreError {
    StoreError::Unavailable("write failure injected".to_string())
}

#[derive(Default)]
pub struct MemoryCartStore {
    carts: RwLock<HashMap<Uuid, Cart>>,
    fail_writes: AtomicBool,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` fail, until disabled again.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn get(&self, cart_id: Uuid) -> Result<Cart, StoreError> {
        self.carts
            .read()
            .await
            .get(&cart_id)
            .cloned()
            .ok_or(StoreError::NotFound(cart_id))
    }

    async fn put(&self, cart: &Cart) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.carts.write().await.insert(cart.id, cart.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryOrderStore {
    orders: RwLock<HashMap<Uuid, Order>>,
    fail_writes: AtomicBool,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn get(&self, order_id: Uuid) -> Result<Order, StoreError> {
        self.orders
            .read()
            .await
            .get(&order_id)
            .cloned()
            .ok_or(StoreError::NotFound(order_id))
    }

    async fn put(&self, order: &Order) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.orders.write().await.insert(order.id, order.clone());
        Ok(())
    }

    async fn delete(&self, order_id: Uuid) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.orders
            .write()
            .await
            .remove(&order_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(order_id))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}

#[derive(Default)]
pub struct MemoryProductStore {
    products: RwLock<HashMap<Uuid, Product>>,
    get_fetches: AtomicUsize,
    list_fetches: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `get` calls that reached this backing store.
    pub fn get_fetches(&self) -> usize {
        self.get_fetches.load(Ordering::SeqCst)
    }

    /// Number of `find_all` calls that reached this backing store.
    pub fn list_fetches(&self) -> usize {
        self.list_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        self.list_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn get(&self, product_id: Uuid) -> Result<Product, StoreError> {
        self.get_fetches.fetch_add(1, Ordering::SeqCst);
        self.products
            .read()
            .await
            .get(&product_id)
            .cloned()
            .ok_or(StoreError::NotFound(product_id))
    }

    async fn put(&self, product: &Product) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn delete(&self, product_id: Uuid) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.products
            .write()
            .await
            .remove(&product_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(product_id))
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, user_id: Uuid) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or(StoreError::NotFound(user_id))
    }
}

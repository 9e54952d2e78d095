use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{CartSnapshot, Order};
use store::{CartStore, OrderStore};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::command::Command;
use crate::errors::{CheckoutError, Result};

/// The cart-to-order transition as a reversible command.
///
/// `execute` snapshots the cart, persists a new order built from it, then
/// clears and persists the cart. `undo` deletes the order and writes the
/// snapshot back. The snapshot is a deep copy; clearing the cart after taking
/// it must not leak into what undo restores.
pub struct PlaceOrderCommand {
    cart_id: Uuid,
    address: String,
    delivery_date: NaiveDate,
    carts: Arc<dyn CartStore>,
    orders: Arc<dyn OrderStore>,
    placed: Option<Order>,
    snapshot: Option<CartSnapshot>,
}

impl PlaceOrderCommand {
    pub fn new(
        cart_id: Uuid,
        address: String,
        delivery_date: NaiveDate,
        carts: Arc<dyn CartStore>,
        orders: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            cart_id,
            address,
            delivery_date,
            carts,
            orders,
            placed: None,
            snapshot: None,
        }
    }

    /// The order created by a successful `execute`, until it is undone.
    pub fn placed_order(&self) -> Option<&Order> {
        self.placed.as_ref()
    }
}

#[async_trait]
impl Command for PlaceOrderCommand {
    fn name(&self) -> &'static str {
        "place_order"
    }

    async fn execute(&mut self) -> Result<serde_json::Value> {
        let mut cart = match self.carts.get(self.cart_id).await {
            Ok(cart) => cart,
            Err(e) if e.is_not_found() => {
                return Err(CheckoutError::CartNotFound(self.cart_id));
            }
            Err(e) => return Err(e.into()),
        };

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart(self.cart_id));
        }

        // Deep copy before any mutation; this is the sole input to undo.
        let snapshot = cart.snapshot();

        let order = Order::place(&cart, self.address.clone(), self.delivery_date);

        if let Err(e) = self.orders.put(&order).await {
            // Nothing has been written; the cart is untouched.
            error!(cart_id = %self.cart_id, error = %e, "Order write failed");
            return Err(CheckoutError::TransactionFailure {
                stage: "order write",
                source: e,
            });
        }

        cart.clear();
        if let Err(e) = self.carts.put(&cart).await {
            // The order write stands; there is no recovery log for this
            // window.
            error!(
                cart_id = %self.cart_id,
                order_id = %order.id,
                error = %e,
                "Cart clear failed after order write"
            );
            return Err(CheckoutError::TransactionFailure {
                stage: "cart write",
                source: e,
            });
        }

        info!(
            order_id = %order.id,
            cart_id = %self.cart_id,
            total_cost = order.total_cost,
            "Order placed"
        );

        let doc = serde_json::to_value(&order)?;
        self.snapshot = Some(snapshot);
        self.placed = Some(order);
        Ok(doc)
    }

    async fn undo(&mut self) -> Result<()> {
        // Taking the order here makes a second undo a no-op.
        let Some(order) = self.placed.take() else {
            debug!(cart_id = %self.cart_id, "Nothing to undo");
            return Ok(());
        };

        match self.orders.delete(order.id).await {
            Ok(()) => {}
            // Already deleted elsewhere; the compensation goal is met.
            Err(e) if e.is_not_found() => {
                debug!(order_id = %order.id, "Order already gone during undo");
            }
            Err(e) => return Err(e.into()),
        }

        let snapshot = self.snapshot.take();
        match self.carts.get(self.cart_id).await {
            Ok(mut cart) => {
                if let Some(snapshot) = snapshot {
                    snapshot.restore_into(&mut cart);
                    self.carts.put(&cart).await?;
                    info!(
                        cart_id = %self.cart_id,
                        order_id = %order.id,
                        "Order placement undone, cart restored"
                    );
                }
            }
            // Best effort: the order deletion still happened.
            Err(e) if e.is_not_found() => {
                warn!(
                    cart_id = %self.cart_id,
                    order_id = %order.id,
                    "Cart no longer exists; undo deleted the order only"
                );
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}

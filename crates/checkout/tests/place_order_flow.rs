//! End-to-end checkout flow over in-memory stores: place an order through
//! the invoker, inspect the resulting state, undo, verify the cart came back
//! exactly as it was.

use std::sync::Arc;

use checkout::{CheckoutError, CommandInvoker, PlaceOrderCommand};
use chrono::NaiveDate;
use domain::{Cart, LineItem, Order};
use store::{CartStore, MemoryCartStore, MemoryOrderStore, OrderStore, StoreError};
use uuid::Uuid;

fn delivery() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

async fn seeded_cart(carts: &MemoryCartStore) -> Cart {
    let mut cart = Cart::new(Uuid::new_v4());
    cart.add_item(LineItem::new(Uuid::new_v4(), "Widget".to_string(), 2, 10.0).unwrap());
    cart.add_item(LineItem::new(Uuid::new_v4(), "Gadget".to_string(), 1, 29.98).unwrap());
    carts.put(&cart).await.unwrap();
    cart
}

fn place_command(
    cart_id: Uuid,
    carts: &Arc<MemoryCartStore>,
    orders: &Arc<MemoryOrderStore>,
) -> Box<PlaceOrderCommand> {
    Box::new(PlaceOrderCommand::new(
        cart_id,
        "123 Main St".to_string(),
        delivery(),
        carts.clone(),
        orders.clone(),
    ))
}

#[tokio::test]
async fn place_then_undo_round_trips_the_cart() {
    let carts = Arc::new(MemoryCartStore::new());
    let orders = Arc::new(MemoryOrderStore::new());
    let invoker = CommandInvoker::new();

    let cart = seeded_cart(&carts).await;
    assert_eq!(cart.total_cost, 49.98);

    let doc = invoker
        .execute_command(place_command(cart.id, &carts, &orders))
        .await
        .unwrap();
    let order: Order = serde_json::from_value(doc).unwrap();

    assert_eq!(order.total_cost, 49.98);
    assert_eq!(order.line_items.len(), 2);
    assert_eq!(order.user_id, cart.user_id);

    let emptied = carts.get(cart.id).await.unwrap();
    assert_eq!(emptied.line_items.len(), 0);
    assert_eq!(emptied.total_cost, 0.0);

    assert!(invoker.undo_last().await.unwrap());

    let restored = carts.get(cart.id).await.unwrap();
    assert_eq!(restored.line_items.len(), 2);
    assert_eq!(restored.total_cost, 49.98);
    assert_eq!(restored.line_items, cart.line_items);

    // The order is no longer retrievable by its id.
    assert!(matches!(
        orders.get(order.id).await.unwrap_err(),
        StoreError::NotFound(_)
    ));
    assert!(!invoker.undo_last().await.unwrap());
}

#[tokio::test]
async fn failed_placement_is_not_undoable() {
    let carts = Arc::new(MemoryCartStore::new());
    let orders = Arc::new(MemoryOrderStore::new());
    let invoker = CommandInvoker::new();

    // Empty cart: rejected before any write.
    let empty = Cart::new(Uuid::new_v4());
    carts.put(&empty).await.unwrap();

    let err = invoker
        .execute_command(place_command(empty.id, &carts, &orders))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart(_)));

    assert_eq!(invoker.history_len().await, 0);
    assert!(!invoker.undo_last().await.unwrap());
}

#[tokio::test]
async fn replaying_execute_on_the_emptied_cart_terminates() {
    let carts = Arc::new(MemoryCartStore::new());
    let orders = Arc::new(MemoryOrderStore::new());
    let invoker = CommandInvoker::new();

    let cart = seeded_cart(&carts).await;
    invoker
        .execute_command(place_command(cart.id, &carts, &orders))
        .await
        .unwrap();

    // A retry after confirmed success sees the emptied cart and gets the
    // correct terminal signal instead of a duplicate order.
    let err = invoker
        .execute_command(place_command(cart.id, &carts, &orders))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart(_)));
    assert_eq!(orders.len().await, 1);
}

#[tokio::test]
async fn undo_unwinds_multiple_placements_in_reverse() {
    let carts = Arc::new(MemoryCartStore::new());
    let orders = Arc::new(MemoryOrderStore::new());
    let invoker = CommandInvoker::new();

    let cart = seeded_cart(&carts).await;

    invoker
        .execute_command(place_command(cart.id, &carts, &orders))
        .await
        .unwrap();

    // Refill the cart and place again.
    let mut refill = carts.get(cart.id).await.unwrap();
    refill.add_item(LineItem::new(Uuid::new_v4(), "Doohickey".to_string(), 1, 5.0).unwrap());
    carts.put(&refill).await.unwrap();

    invoker
        .execute_command(place_command(cart.id, &carts, &orders))
        .await
        .unwrap();
    assert_eq!(orders.len().await, 2);

    // First undo reverses the second placement.
    assert!(invoker.undo_last().await.unwrap());
    assert_eq!(orders.len().await, 1);
    let after_first = carts.get(cart.id).await.unwrap();
    assert_eq!(after_first.total_cost, 5.0);

    // Second undo reverses the first placement and restores the original
    // two-item cart.
    assert!(invoker.undo_last().await.unwrap());
    assert_eq!(orders.len().await, 0);
    let after_second = carts.get(cart.id).await.unwrap();
    assert_eq!(after_second.line_items, cart.line_items);
    assert_eq!(after_second.total_cost, 49.98);
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// One product reference plus quantity and the unit price captured when the
/// item was added to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(
        product_id: Uuid,
        product_name: String,
        quantity: u32,
        unit_price: f64,
    ) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity);
        }
        if unit_price <= 0.0 {
            return Err(DomainError::InvalidPrice);
        }

        Ok(Self {
            product_id,
            product_name,
            quantity,
            unit_price,
        })
    }

    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// A user's shopping cart. Lives across orders: checkout empties it, undoing
/// a checkout refills it from a [`CartSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub line_items: Vec<LineItem>,
    pub total_cost: f64,
}

impl Cart {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            line_items: Vec::new(),
            total_cost: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    pub fn add_item(&mut self, item: LineItem) {
        self.line_items.push(item);
        self.recompute_total();
    }

    /// Re-derive `total_cost` from the line items. The total is stored, not
    /// computed on read, so callers that mutate `line_items` directly must
    /// call this afterwards.
    pub fn recompute_total(&mut self) {
        self.total_cost = self.line_items.iter().map(LineItem::subtotal).sum();
    }

    /// Empty the cart after a successful checkout. The cart itself survives.
    pub fn clear(&mut self) {
        self.line_items.clear();
        self.total_cost = 0.0;
    }

    /// Deep copy of the cart's checkout-relevant state. The snapshot owns its
    /// own line-item sequence: clearing the cart afterwards must not touch it.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            line_items: self.line_items.clone(),
            total_cost: self.total_cost,
        }
    }
}

/// Pre-checkout copy of a cart's contents, used to restore the cart when an
/// order placement is undone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub line_items: Vec<LineItem>,
    pub total_cost: f64,
}

impl CartSnapshot {
    /// Write the snapshot back into a cart, replacing whatever it holds now.
    pub fn restore_into(&self, cart: &mut Cart) {
        cart.line_items = self.line_items.clone();
        cart.total_cost = self.total_cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, unit_price: f64) -> LineItem {
        LineItem::new(Uuid::new_v4(), "Widget".to_string(), quantity, unit_price).unwrap()
    }

    #[test]
    fn test_line_item_subtotal() {
        let li = item(3, 4.50);
        assert_eq!(li.subtotal(), 13.50);
    }

    #[test]
    fn test_line_item_rejects_zero_quantity() {
        let result = LineItem::new(Uuid::new_v4(), "Widget".to_string(), 0, 4.50);
        assert!(matches!(result, Err(DomainError::InvalidQuantity)));
    }

    #[test]
    fn test_line_item_rejects_negative_price() {
        let result = LineItem::new(Uuid::new_v4(), "Widget".to_string(), 1, -4.50);
        assert!(matches!(result, Err(DomainError::InvalidPrice)));
    }

    #[test]
    fn test_add_item_keeps_total_in_sync() {
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_item(item(2, 10.0));
        cart.add_item(item(1, 29.98));

        assert_eq!(cart.line_items.len(), 2);
        assert_eq!(cart.total_cost, 49.98);
    }

    #[test]
    fn test_clear_empties_items_and_total() {
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_item(item(2, 10.0));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_cost, 0.0);
    }

    #[test]
    fn test_snapshot_does_not_alias_the_cart() {
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_item(item(2, 10.0));
        cart.add_item(item(1, 29.98));

        let snapshot = cart.snapshot();
        cart.clear();

        // The snapshot kept its own copy of the items.
        assert_eq!(snapshot.line_items.len(), 2);
        assert_eq!(snapshot.total_cost, 49.98);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_restore_into_round_trips() {
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_item(item(2, 10.0));
        let snapshot = cart.snapshot();
        let before = cart.clone();

        cart.clear();
        snapshot.restore_into(&mut cart);

        assert_eq!(cart, before);
    }
}

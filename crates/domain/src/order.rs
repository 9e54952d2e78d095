use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{Cart, LineItem};

/// A placed order. Immutable once created; it disappears only through the
/// compensating undo of its placement or an explicit cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub line_items: Vec<LineItem>,
    pub total_cost: f64,
    pub address: String,
    pub delivery_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build an order from a cart at the moment of placement. The line items
    /// are copied into an independent sequence: later cart mutations must not
    /// show through on a placed order.
    pub fn place(cart: &Cart, address: String, delivery_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: cart.user_id,
            line_items: cart.line_items.clone(),
            total_cost: cart.total_cost,
            address,
            delivery_date,
            created_at: Utc::now(),
        }
    }
}

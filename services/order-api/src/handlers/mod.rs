pub mod delete_order;
pub mod get_order;
pub mod health;
pub mod list_orders;
pub mod place_order;
pub mod products;
pub mod reviews;
pub mod undo_order;
pub mod users;

use serde::Deserialize;
use uuid::Uuid;

/// Query parameter carrying the acting user for admin-gated endpoints.
#[derive(Debug, Deserialize)]
pub struct ActingUser {
    pub user_id: Uuid,
}

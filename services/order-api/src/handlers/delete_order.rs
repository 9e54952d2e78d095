use axum::extract::{Path, Query, State};
use axum::Json;
use domain::Order;
use store::OrderStore;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::ActingUser;
use crate::state::AppState;

/// Explicit administrative cancellation of an order, outside the undo
/// history. Returns the owner's remaining orders.
pub async fn handle(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Query(acting): Query<ActingUser>,
) -> Result<Json<Vec<Order>>, ApiError> {
    state.auth.require_admin(acting.user_id).await?;

    info!(order_id = %order_id, admin = %acting.user_id, "Cancelling order");

    let order = state.orders.get(order_id).await?;
    state.orders.delete(order_id).await?;

    let remaining = state.orders.find_by_user(order.user_id).await?;
    Ok(Json(remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use domain::{Cart, LineItem, Role, User};
    use std::sync::Arc;
    use store::{
        MemoryCartStore, MemoryOrderStore, MemoryProductStore, MemoryUserStore, OrderStore,
    };

    async fn state_with_admin() -> (AppState, User, Arc<MemoryOrderStore>) {
        let users = Arc::new(MemoryUserStore::new());
        let admin = User {
            id: Uuid::new_v4(),
            username: "root".to_string(),
            email: "root@example.com".to_string(),
            role: Role::Admin,
        };
        users.insert(admin.clone()).await;

        let orders = Arc::new(MemoryOrderStore::new());
        let state = AppState::assemble(
            Arc::new(MemoryCartStore::new()),
            orders.clone(),
            Arc::new(MemoryProductStore::new()),
            users,
        );
        (state, admin, orders)
    }

    fn placed_order() -> Order {
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_item(LineItem::new(Uuid::new_v4(), "Widget".to_string(), 1, 10.0).unwrap());
        Order::place(
            &cart,
            "123 Main St".to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_admin_can_cancel_an_order() {
        let (state, admin, orders) = state_with_admin().await;
        let order = placed_order();
        orders.put(&order).await.unwrap();

        let Json(remaining) = handle(
            State(state),
            Path(order.id),
            Query(ActingUser { user_id: admin.id }),
        )
        .await
        .unwrap();

        assert!(remaining.is_empty());
        assert!(orders.is_empty().await);
    }

    #[tokio::test]
    async fn test_non_admin_is_rejected() {
        let (state, _admin, orders) = state_with_admin().await;
        let order = placed_order();
        orders.put(&order).await.unwrap();

        let err = handle(
            State(state),
            Path(order.id),
            Query(ActingUser {
                user_id: Uuid::new_v4(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(orders.len().await, 1);
    }
}

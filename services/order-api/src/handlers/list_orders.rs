use axum::extract::{Path, State};
use axum::Json;
use domain::Order;
use store::OrderStore;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// All orders placed by a user, newest first.
pub async fn handle(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Order>>, ApiError> {
    info!(user_id = %user_id, "Listing orders for user");

    let orders = state.orders.find_by_user(user_id).await?;

    Ok(Json(orders))
}

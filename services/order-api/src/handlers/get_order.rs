use axum::extract::{Path, State};
use axum::Json;
use domain::Order;
use store::OrderStore;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Fetch one order by id.
pub async fn handle(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    info!(order_id = %order_id, "Fetching order");

    let order = state.orders.get(order_id).await?;

    Ok(Json(order))
}

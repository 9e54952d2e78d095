use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use checkout::PlaceOrderCommand;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct PlaceOrderRequest {
    #[validate(length(min = 1, message = "Shipping address cannot be empty"))]
    pub address: String,
    pub delivery_date: NaiveDate,
}

/// Convert a cart into an order through the command invoker, so the
/// placement lands on the undo history.
pub async fn handle(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    info!(cart_id = %cart_id, "Placing order");

    request.validate()?;

    let command = Box::new(PlaceOrderCommand::new(
        cart_id,
        request.address,
        request.delivery_date,
        state.carts.clone(),
        state.orders.clone(),
    ));

    let order = state.invoker.execute_command(command).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use domain::{Product, Review};
use serde::{Deserialize, Serialize};
use store::ProductStore;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct AddReviewRequest {
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Review body cannot be empty"))]
    pub body: String,
    pub rating: u8,
}

#[derive(Debug, Serialize)]
pub struct ReviewedProductResponse {
    pub product: Product,
    pub average_rating: f64,
}

/// Append a review to a product. The write goes through the cache proxy so
/// catalog reads see the new review immediately.
pub async fn add(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(request): Json<AddReviewRequest>,
) -> Result<(StatusCode, Json<ReviewedProductResponse>), ApiError> {
    request.validate()?;

    let review = Review::new(request.user_id, request.username, request.body, request.rating)?;

    let mut product = state.products.get(product_id).await?;
    product.add_review(review);
    state.products.put(&product).await?;

    info!(
        product_id = %product_id,
        reviews = product.reviews.len(),
        "Review added"
    );

    let average_rating = product.average_rating();
    Ok((
        StatusCode::CREATED,
        Json(ReviewedProductResponse {
            product,
            average_rating,
        }),
    ))
}

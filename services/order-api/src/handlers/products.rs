use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use domain::Product;
use serde::{Deserialize, Serialize};
use store::ProductStore;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::handlers::ActingUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SaveProductRequest {
    #[validate(length(min = 1, message = "Product name cannot be empty"))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0.01, message = "Price must be positive"))]
    pub price: f64,
    pub image_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub success: bool,
    pub id: Uuid,
}

/// Browse the catalog through the cache proxy.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.find_all().await?;
    Ok(Json(products))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.get(product_id).await?;
    Ok(Json(product))
}

/// Add a product to the catalog. Admin only.
pub async fn create(
    State(state): State<AppState>,
    Query(acting): Query<ActingUser>,
    Json(request): Json<SaveProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    state.auth.require_admin(acting.user_id).await?;
    request.validate()?;

    let mut product = Product::new(request.name, request.description, request.price);
    product.image_url = request.image_url;
    product.categories = request.categories;

    info!(product_id = %product.id, name = %product.name, "Adding product");
    state.products.put(&product).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's catalog fields, keeping its accumulated reviews.
/// Admin only.
pub async fn update(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Query(acting): Query<ActingUser>,
    Json(request): Json<SaveProductRequest>,
) -> Result<Json<Product>, ApiError> {
    state.auth.require_admin(acting.user_id).await?;
    request.validate()?;

    let mut product = state.products.get(product_id).await?;
    product.name = request.name;
    product.description = request.description;
    product.price = request.price;
    product.image_url = request.image_url;
    product.categories = request.categories;

    info!(product_id = %product_id, "Updating product");
    state.products.put(&product).await?;

    Ok(Json(product))
}

/// Remove a product from the catalog. Admin only.
pub async fn remove(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Query(acting): Query<ActingUser>,
) -> Result<Json<DeleteProductResponse>, ApiError> {
    state.auth.require_admin(acting.user_id).await?;

    info!(product_id = %product_id, "Deleting product");
    state.products.delete(product_id).await?;

    Ok(Json(DeleteProductResponse {
        success: true,
        id: product_id,
    }))
}

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    delete_order, get_order, health, list_orders, place_order, products, reviews, undo_order,
    users,
};
use crate::state::AppState;

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/carts/:cart_id/orders", post(place_order::handle))
        .route("/api/v1/orders/undo", post(undo_order::handle))
        .route(
            "/api/v1/orders/:order_id",
            get(get_order::handle).delete(delete_order::handle),
        )
        .route("/api/v1/users/:user_id/orders", get(list_orders::handle))
        .route(
            "/api/v1/products",
            get(products::list).post(products::create),
        )
        .route(
            "/api/v1/products/:product_id",
            get(products::get_one)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/api/v1/products/:product_id/reviews", post(reviews::add))
        .route("/api/v1/users/:user_id", get(users::get_one))
        .route("/api/v1/users/:user_id/role", get(users::get_role))
        .with_state(state)
}

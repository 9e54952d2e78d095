use axum::extract::{Path, State};
use axum::Json;
use domain::{Role, User};
use serde::Serialize;
use store::UserStore;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub user_id: Uuid,
    pub role: Option<Role>,
    pub is_admin: bool,
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    info!(user_id = %user_id, "Fetching user");
    let user = state.users.get(user_id).await?;
    Ok(Json(user))
}

/// Role lookup for the storefront UI. An unknown user is reported as a
/// non-admin rather than an error.
pub async fn get_role(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<RoleResponse>, ApiError> {
    match state.users.get(user_id).await {
        Ok(user) => Ok(Json(RoleResponse {
            user_id,
            role: Some(user.role),
            is_admin: user.is_admin(),
        })),
        Err(e) if e.is_not_found() => Ok(Json(RoleResponse {
            user_id,
            role: None,
            is_admin: false,
        })),
        Err(e) => Err(e.into()),
    }
}

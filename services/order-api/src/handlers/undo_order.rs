use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UndoResponse {
    pub undone: bool,
}

/// Undo the most recent command on the history stack. Empty history is a
/// reported no-op, not an error.
pub async fn handle(State(state): State<AppState>) -> Result<Json<UndoResponse>, ApiError> {
    info!("Undo requested");

    let undone = state.invoker.undo_last().await?;

    Ok(Json(UndoResponse { undone }))
}

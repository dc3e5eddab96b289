use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::shared::dashboard_layout::{DashboardLayout, SaveLayoutRequest, SaveLayoutResponse};

use crate::dashboards::layout::service;
use crate::shared::state::AppState;

/// GET /api/dashboard-layout/:user_key
pub async fn get_layout(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
) -> Result<Json<DashboardLayout>, StatusCode> {
    match service::get_layout(&state.db, &user_key).await {
        Ok(layout) => Ok(Json(layout)),
        Err(e) => {
            tracing::error!("Failed to load dashboard layout of '{}': {}", user_key, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/dashboard-layout
pub async fn save_layout(
    State(state): State<AppState>,
    Json(request): Json<SaveLayoutRequest>,
) -> Result<Json<SaveLayoutResponse>, StatusCode> {
    if request.user_key.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    match service::save_layout(&state.db, &request.user_key, request.layout).await {
        Ok(_) => Ok(Json(SaveLayoutResponse {
            success: true,
            message: "Layout saved".to_string(),
        })),
        Err(e) => {
            tracing::error!("Failed to save dashboard layout: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

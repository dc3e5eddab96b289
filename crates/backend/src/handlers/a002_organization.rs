use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_organization::aggregate::Organization;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a002_organization;
use crate::shared::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Only organizations this user belongs to
    pub user_key: Option<String>,
}

/// GET /api/organization
pub async fn list_all(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Organization>>, StatusCode> {
    let user_key = query.user_key.as_deref().filter(|k| !k.is_empty());
    match a002_organization::service::list(&state.db, user_key).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list organizations: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/organization/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Organization>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match a002_organization::service::get_by_id(&state.db, uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load organization {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/organization/testdata
pub async fn insert_test_data(State(state): State<AppState>) -> Result<Json<serde_json::Value>, StatusCode> {
    match a002_organization::service::insert_test_data(&state.db).await {
        Ok(orgs) => Ok(Json(json!({"success": true, "count": orgs.len()}))),
        Err(e) => {
            tracing::error!("Failed to insert test organizations: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::shared::state::AppState;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Organizations
        .route("/api/organization", get(handlers::a002_organization::list_all))
        .route(
            "/api/organization/:id",
            get(handlers::a002_organization::get_by_id),
        )
        .route(
            "/api/organization/testdata",
            post(handlers::a002_organization::insert_test_data),
        )
        // Reports
        .route(
            "/api/reports/testdata",
            post(handlers::reports::insert_test_data),
        )
        .route("/api/reports/:kind", get(handlers::reports::get_report))
        .route(
            "/api/reports/:kind/export",
            get(handlers::reports::export_csv),
        )
        .route(
            "/api/reports/:kind/summary",
            get(handlers::reports::get_summary),
        )
        // Dashboard layout
        .route(
            "/api/dashboard-layout",
            post(handlers::dashboard_layout::save_layout),
        )
        .route(
            "/api/dashboard-layout/:user_key",
            get(handlers::dashboard_layout::get_layout),
        )
        .with_state(state)
}

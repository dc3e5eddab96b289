use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use contracts::reports::common::export::{export_file_name, CSV_CONTENT_TYPE};
use contracts::reports::summary::CompactSummary;
use contracts::reports::{ReportQuery, ReportResponse};
use serde::Deserialize;
use serde_json::json;

use crate::reports::service::{self, ReportRequestError};
use crate::reports::export;
use crate::shared::state::AppState;

fn status_for(kind: &str, err: &ReportRequestError) -> StatusCode {
    if err.is_client_error() {
        tracing::warn!("Rejected report request '{}': {}", kind, err);
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!("Failed to build report '{}': {}", kind, err);
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

async fn load(state: &AppState, kind: &str, query: &ReportQuery) -> Result<ReportResponse, StatusCode> {
    let report_kind = service::parse_kind(kind).map_err(|e| status_for(kind, &e))?;
    service::get_report(&state.db, report_kind, query)
        .await
        .map_err(|e| status_for(kind, &e))
}

/// GET /api/reports/:kind
pub async fn get_report(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, StatusCode> {
    let response = load(&state, &kind, &query).await?;
    tracing::info!(
        "Report {} on {}: {} nodes, consolidated={}, sample={}",
        kind,
        query.report_date,
        response.tree.node_count(),
        response.consolidated,
        response.is_sample
    );
    Ok(Json(response))
}

/// GET /api/reports/:kind/export
pub async fn export_csv(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let response = load(&state, &kind, &query).await?;
    let bytes = export::write_csv(&response.tree.csv_table()).map_err(|e| {
        tracing::error!("Failed to write CSV for {}: {}", kind, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let file_name = export_file_name(response.kind.code(), response.report_date);
    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    ))
}

/// GET /api/reports/:kind/summary
pub async fn get_summary(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<CompactSummary>, StatusCode> {
    let response = load(&state, &kind, &query).await?;
    Ok(Json(response.compact_summary()))
}

#[derive(Debug, Deserialize)]
pub struct TestDataQuery {
    pub report_date: Option<NaiveDate>,
}

/// POST /api/reports/testdata
pub async fn insert_test_data(
    State(state): State<AppState>,
    Query(query): Query<TestDataQuery>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let report_date = query.report_date.unwrap_or_else(|| Utc::now().date_naive());
    match service::insert_test_data(&state.db, report_date).await {
        Ok(inserted) => Ok(Json(json!({
            "success": true,
            "inserted": inserted,
            "report_date": report_date,
        }))),
        Err(e) => {
            tracing::error!("Failed to insert test report rows: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

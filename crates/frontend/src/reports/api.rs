use contracts::domain::a002_organization::Organization;
use contracts::reports::summary::CompactSummary;
use contracts::reports::{ReportKind, ReportQuery, ReportResponse};
use contracts::shared::dashboard_layout::{DashboardLayout, SaveLayoutRequest, SaveLayoutResponse};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::shared::api_utils::api_url;

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

fn organizations_path(user_key: &str) -> String {
    format!("/api/organization?user_key={}", urlencoding::encode(user_key))
}

fn layout_path(user_key: &str) -> String {
    format!("/api/dashboard-layout/{}", urlencoding::encode(user_key))
}

fn report_path(kind: ReportKind, suffix: &str, query: &ReportQuery) -> Result<String, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to encode query: {}", e))?;
    Ok(format!("/api/reports/{}{}?{}", kind.code(), suffix, qs))
}

/// Организации, доступные пользователю
pub async fn fetch_organizations(user_key: &str) -> Result<Vec<Organization>, String> {
    get_json(&api_url(&organizations_path(user_key))).await
}

/// Дерево отчёта
pub async fn fetch_report(kind: ReportKind, query: &ReportQuery) -> Result<ReportResponse, String> {
    let path = report_path(kind, "", query)?;
    get_json(&api_url(&path)).await
}

/// Краткая сводка для компактного вида
pub async fn fetch_summary(kind: ReportKind, query: &ReportQuery) -> Result<CompactSummary, String> {
    let path = report_path(kind, "/summary", query)?;
    get_json(&api_url(&path)).await
}

pub async fn fetch_layout(user_key: &str) -> Result<DashboardLayout, String> {
    get_json(&api_url(&layout_path(user_key))).await
}

pub async fn save_layout(user_key: &str, layout: &DashboardLayout) -> Result<(), String> {
    let request = SaveLayoutRequest {
        user_key: user_key.to_string(),
        layout: layout.clone(),
    };

    let response = Request::post(&api_url("/api/dashboard-layout"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize layout: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let result: SaveLayoutResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;
    if result.success {
        Ok(())
    } else {
        Err(result.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_user_key_is_encoded() {
        assert_eq!(layout_path("ivan petrov"), "/api/dashboard-layout/ivan%20petrov");
        assert_eq!(
            organizations_path("a&b=c"),
            "/api/organization?user_key=a%26b%3Dc"
        );
        assert_eq!(layout_path("demo"), "/api/dashboard-layout/demo");
    }

    #[test]
    fn test_report_path_encodes_query() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let query = ReportQuery::new(date, &["org 1".to_string(), "org&2".to_string()], false);

        let path = report_path(ReportKind::CashBank, "/summary", &query).unwrap();
        let (prefix, qs) = path.split_once('?').unwrap();
        assert_eq!(prefix, format!("/api/reports/{}/summary", ReportKind::CashBank.code()));
        assert!(qs.contains("report_date=2025-03-31"));
        assert!(!qs.contains(' '));

        let decoded: ReportQuery = serde_qs::from_str(qs).unwrap();
        assert_eq!(decoded.organization_ids, "org 1,org&2");
        assert_eq!(decoded.report_date, date);
        assert!(!decoded.all_organizations);
    }
}

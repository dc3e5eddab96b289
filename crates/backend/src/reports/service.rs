use chrono::NaiveDate;
use contracts::reports::common::should_consolidate;
use contracts::reports::{EmptyResultPolicy, ReportKind, ReportQuery, ReportResponse, ReportTree};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use thiserror::Error;

use super::repository::{self, NewReportRow};
use super::sample_data;
use crate::domain::a002_organization::service as organization_service;

/// Ошибки запроса отчёта
#[derive(Debug, Error)]
pub enum ReportRequestError {
    #[error("unknown report kind '{0}'")]
    UnknownKind(String),
    #[error("no organization selected")]
    NoOrganizations,
    #[error("unknown organizations: {0}")]
    UnknownOrganizations(String),
    #[error("stored rows cannot be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ReportRequestError {
    /// Caller sent something wrong (400), as opposed to a server failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ReportRequestError::UnknownKind(_)
                | ReportRequestError::NoOrganizations
                | ReportRequestError::UnknownOrganizations(_)
        )
    }
}

pub fn parse_kind(code: &str) -> Result<ReportKind, ReportRequestError> {
    ReportKind::from_code(code).ok_or_else(|| ReportRequestError::UnknownKind(code.to_string()))
}

/// Build the report tree for a kind, date and organization set
pub async fn get_report(
    db: &DatabaseConnection,
    kind: ReportKind,
    query: &ReportQuery,
) -> Result<ReportResponse, ReportRequestError> {
    let requested = query.organization_id_list();
    if requested.is_empty() {
        return Err(ReportRequestError::NoOrganizations);
    }

    let found = organization_service::find_by_ids(db, &requested).await?;
    let missing: Vec<&str> = requested
        .iter()
        .filter(|id| !found.iter().any(|o| &o.to_string_id() == *id))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(ReportRequestError::UnknownOrganizations(missing.join(",")));
    }

    let stored = repository::load_rows(db, kind, query.report_date, &requested).await?;
    let rows = stored
        .into_iter()
        .map(|row| row.into_json(kind))
        .collect::<anyhow::Result<Vec<Value>>>()?;

    let consolidate = should_consolidate(query.all_organizations, requested.len());

    if rows.is_empty() && kind.empty_result_policy() == EmptyResultPolicy::SampleData {
        if let Some(sample) = sample_data::sample_rows(kind) {
            tracing::info!("{} on {} is empty, serving sample data", kind, query.report_date);
            return Ok(ReportResponse {
                kind,
                report_date: query.report_date,
                consolidated: false,
                is_sample: true,
                organization_count: requested.len(),
                tree: ReportTree::from_json_rows(kind, sample, false)?,
            });
        }
    }

    let tree = ReportTree::from_json_rows(kind, rows, consolidate)?;
    Ok(ReportResponse {
        kind,
        report_date: query.report_date,
        consolidated: consolidate && !tree.is_empty(),
        is_sample: false,
        organization_count: requested.len(),
        tree,
    })
}

fn demo_row(id: String, parent: Option<String>, level: i32, name: &str, payload: Value) -> NewReportRow {
    NewReportRow {
        is_total_row: parent.is_none(),
        row_id: id,
        parent_id: parent,
        level,
        name: name.to_string(),
        payload,
    }
}

/// Демо-строки одного вида отчёта для одной организации.
/// `scale` differentiates organizations so consolidated sums are visible.
fn demo_rows(kind: ReportKind, org_code: &str, scale: f64) -> Vec<NewReportRow> {
    let id = |suffix: &str| format!("{}-{}-{}", kind.code(), org_code, suffix);
    let root = id("root");
    match kind {
        ReportKind::CashBank => {
            let cash = (100_000.0 * scale, 40_000.0 * scale, 60_000.0 * scale);
            let bank = (900_000.0 * scale, 500_000.0 * scale, 350_000.0 * scale);
            let line = |(open, inc, out): (f64, f64, f64), kind: &str| {
                serde_json::json!({
                    "account_type": kind, "currency": "RUB",
                    "opening_balance": open, "incoming": inc, "outgoing": out,
                    "closing_balance": open + inc - out
                })
            };
            let total = (cash.0 + bank.0, cash.1 + bank.1, cash.2 + bank.2);
            vec![
                demo_row(root.clone(), None, 0, "Денежные средства", line(total, "")),
                demo_row(id("cash"), Some(root.clone()), 1, "Касса", line(cash, "cash")),
                demo_row(id("bank"), Some(root), 1, "Расчётный счёт", line(bank, "bank")),
            ]
        }
        ReportKind::Receivables | ReportKind::Payables => {
            let debt = |amount: f64, overdue: f64, advance: f64| {
                serde_json::json!({
                    "debt_amount": amount, "overdue_amount": overdue, "advance_amount": advance
                })
            };
            let (a, b) = (300_000.0 * scale, 120_000.0 * scale);
            let counterparty = id("cp-1");
            vec![
                demo_row(root.clone(), None, 0, "Итого", debt(a + b, b / 2.0, 10_000.0 * scale)),
                demo_row(counterparty.clone(), Some(root.clone()), 1, "ООО \"Поставка\"", debt(a, 0.0, 0.0)),
                demo_row(id("cp-1-contract"), Some(counterparty), 2, "Договор №1", debt(a, 0.0, 0.0)),
                demo_row(id("cp-2"), Some(root), 1, "АО \"Опт\"", debt(b, b / 2.0, 10_000.0 * scale)),
            ]
        }
        ReportKind::Inventory => {
            let stock = |open: f64, receipt: f64, issue: f64, price: f64| {
                let closing = open + receipt - issue;
                serde_json::json!({
                    "opening_qty": open, "receipt_qty": receipt, "issue_qty": issue,
                    "closing_qty": closing, "closing_amount": closing * price
                })
            };
            vec![
                demo_row(root.clone(), None, 0, "Запасы", stock(700.0 * scale, 300.0 * scale, 400.0 * scale, 1_000.0)),
                demo_row(id("goods"), Some(root), 1, "Товары", stock(700.0 * scale, 300.0 * scale, 400.0 * scale, 1_000.0)),
            ]
        }
        ReportKind::PlanFact => {
            let pf = |plan: f64, fact: f64| serde_json::json!({"plan_amount": plan, "fact_amount": fact});
            vec![
                demo_row(root.clone(), None, 0, "Выручка", pf(1_000_000.0 * scale, 870_000.0 * scale)),
                demo_row(id("retail"), Some(root.clone()), 1, "Розница", pf(600_000.0 * scale, 570_000.0 * scale)),
                demo_row(id("wholesale"), Some(root), 1, "Опт", pf(400_000.0 * scale, 300_000.0 * scale)),
            ]
        }
    }
}

/// Seed demo organizations and every report for `report_date`
pub async fn insert_test_data(db: &DatabaseConnection, report_date: NaiveDate) -> anyhow::Result<usize> {
    let organizations = organization_service::insert_test_data(db).await?;
    let mut inserted = 0;
    for (index, organization) in organizations.iter().enumerate() {
        let scale = (index + 1) as f64;
        for kind in ReportKind::ALL {
            let rows = demo_rows(kind, &organization.code, scale);
            inserted +=
                repository::replace_rows(db, kind, report_date, &organization.to_string_id(), &rows).await?;
        }
    }
    tracing::info!("Inserted {} demo report rows for {}", inserted, report_date);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_connection;
    use contracts::reports::common::CONSOLIDATED_TOTAL_ID;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
    }

    async fn seeded() -> (DatabaseConnection, Vec<String>) {
        let db = test_connection().await;
        insert_test_data(&db, date()).await.unwrap();
        let ids = organization_service::list(&db, None)
            .await
            .unwrap()
            .iter()
            .map(|o| o.to_string_id())
            .collect();
        (db, ids)
    }

    #[tokio::test]
    async fn test_consolidated_report_over_all_organizations() {
        let (db, ids) = seeded().await;
        let query = ReportQuery::new(date(), &ids, true);

        let response = get_report(&db, ReportKind::PlanFact, &query).await.unwrap();

        assert!(response.consolidated);
        assert!(!response.is_sample);
        assert_eq!(response.tree.root_count(), 1);
        let display = response.tree.display_nodes();
        assert_eq!(display[0].id, CONSOLIDATED_TOTAL_ID);
        assert_eq!(display[0].children.len(), 3);
        // 1 + 2 + 3 scales of the plan
        assert_eq!(display[0].cells[0], "6 000 000.00");
        assert!(display[0].children.iter().all(|c| c.name.ends_with(" - Выручка")));
    }

    #[tokio::test]
    async fn test_single_organization_is_not_consolidated() {
        let (db, ids) = seeded().await;
        let query = ReportQuery::new(date(), &ids[..1], true);

        let response = get_report(&db, ReportKind::Receivables, &query).await.unwrap();

        assert!(!response.consolidated);
        assert_eq!(response.tree.root_count(), 1);
        assert_eq!(response.tree.display_nodes()[0].name, "Итого");
    }

    #[tokio::test]
    async fn test_empty_result_policies() {
        let (db, ids) = seeded().await;
        let other_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let query = ReportQuery::new(other_date, &ids, true);

        let cash = get_report(&db, ReportKind::CashBank, &query).await.unwrap();
        assert!(cash.is_sample);
        assert!(!cash.tree.is_empty());

        let payables = get_report(&db, ReportKind::Payables, &query).await.unwrap();
        assert!(!payables.is_sample);
        assert!(payables.tree.is_empty());
        assert!(!payables.consolidated);
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let (db, _) = seeded().await;

        let none = ReportQuery::new(date(), &[], false);
        let err = get_report(&db, ReportKind::CashBank, &none).await.unwrap_err();
        assert!(matches!(err, ReportRequestError::NoOrganizations));
        assert!(err.is_client_error());

        let unknown = ReportQuery::new(date(), &["missing".to_string()], false);
        let err = get_report(&db, ReportKind::CashBank, &unknown).await.unwrap_err();
        assert!(matches!(err, ReportRequestError::UnknownOrganizations(_)));

        assert!(parse_kind("balance_sheet").unwrap_err().is_client_error());
    }
}

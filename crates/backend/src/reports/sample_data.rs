use contracts::reports::ReportKind;
use serde_json::{json, Value};

/// Built-in rows shown when a report with the sample-data policy comes back empty.
///
/// Rows are flat with `parent_id` links, exactly like stored ones.
pub fn sample_rows(kind: ReportKind) -> Option<Vec<Value>> {
    match kind {
        ReportKind::CashBank => Some(cash_bank()),
        ReportKind::Inventory => Some(inventory()),
        ReportKind::Receivables | ReportKind::Payables | ReportKind::PlanFact => None,
    }
}

fn cash_bank() -> Vec<Value> {
    vec![
        json!({
            "id": "sample-org", "parent_id": null, "level": 0, "is_total_row": true,
            "organization_name": "Пример организации", "account_name": "Денежные средства",
            "opening_balance": 1_250_000.0, "incoming": 830_000.0, "outgoing": 610_000.0,
            "closing_balance": 1_470_000.0
        }),
        json!({
            "id": "sample-cash", "parent_id": "sample-org", "level": 1,
            "account_name": "Кассы", "account_type": "cash", "currency": "RUB",
            "opening_balance": 50_000.0, "incoming": 30_000.0, "outgoing": 45_000.0,
            "closing_balance": 35_000.0
        }),
        json!({
            "id": "sample-cash-main", "parent_id": "sample-cash", "level": 2,
            "account_name": "Основная касса", "account_type": "cash", "currency": "RUB",
            "opening_balance": 50_000.0, "incoming": 30_000.0, "outgoing": 45_000.0,
            "closing_balance": 35_000.0
        }),
        json!({
            "id": "sample-bank", "parent_id": "sample-org", "level": 1,
            "account_name": "Расчётные счета", "account_type": "bank", "currency": "RUB",
            "opening_balance": 1_200_000.0, "incoming": 800_000.0, "outgoing": 565_000.0,
            "closing_balance": 1_435_000.0
        }),
        json!({
            "id": "sample-bank-1", "parent_id": "sample-bank", "level": 2,
            "account_name": "р/с 40702810000000000001", "account_type": "bank", "currency": "RUB",
            "opening_balance": 900_000.0, "incoming": 500_000.0, "outgoing": 365_000.0,
            "closing_balance": 1_035_000.0
        }),
        json!({
            "id": "sample-bank-2", "parent_id": "sample-bank", "level": 2,
            "account_name": "р/с 40702810000000000002", "account_type": "bank", "currency": "RUB",
            "opening_balance": 300_000.0, "incoming": 300_000.0, "outgoing": 200_000.0,
            "closing_balance": 400_000.0
        }),
    ]
}

fn inventory() -> Vec<Value> {
    vec![
        json!({
            "id": "sample-org", "parent_id": null, "level": 0, "is_total_row": true,
            "organization_name": "Пример организации", "item_name": "Запасы",
            "opening_qty": 1_500.0, "receipt_qty": 900.0, "issue_qty": 1_100.0,
            "closing_qty": 1_300.0, "closing_amount": 2_600_000.0
        }),
        json!({
            "id": "sample-materials", "parent_id": "sample-org", "level": 1,
            "item_name": "Материалы", "unit": "кг",
            "opening_qty": 1_000.0, "receipt_qty": 600.0, "issue_qty": 800.0,
            "closing_qty": 800.0, "closing_amount": 400_000.0
        }),
        json!({
            "id": "sample-goods", "parent_id": "sample-org", "level": 1,
            "item_name": "Товары", "unit": "шт",
            "opening_qty": 500.0, "receipt_qty": 300.0, "issue_qty": 300.0,
            "closing_qty": 500.0, "closing_amount": 2_200_000.0
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::reports::ReportTree;

    #[test]
    fn test_sample_rows_build_single_root() {
        for kind in [ReportKind::CashBank, ReportKind::Inventory] {
            let rows = sample_rows(kind).unwrap();
            let count = rows.len();
            let tree = ReportTree::from_json_rows(kind, rows, false).unwrap();
            assert_eq!(tree.root_count(), 1);
            assert_eq!(tree.node_count(), count);
        }
    }

    #[test]
    fn test_no_sample_for_empty_state_reports() {
        assert!(sample_rows(ReportKind::Receivables).is_none());
        assert!(sample_rows(ReportKind::PlanFact).is_none());
    }
}

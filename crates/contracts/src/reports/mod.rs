pub mod common;
pub mod r500_cash_bank;
pub mod r501_debts;
pub mod r502_inventory;
pub mod r503_plan_fact;
pub mod summary;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use common::{build_hierarchy, count_nodes, CsvTable, DisplayNode, ReportColumns, ReportNode, ReportRecord};
use r500_cash_bank::CashBankRow;
use r501_debts::DebtRow;
use r502_inventory::InventoryRow;
use r503_plan_fact::PlanFactRow;
use summary::{CompactSummary, SummaryLine};

/// Available financial reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    CashBank,
    Receivables,
    Payables,
    Inventory,
    PlanFact,
}

/// What the UI shows when a report query returns no rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyResultPolicy {
    /// Substitute a built-in sample hierarchy
    SampleData,
    /// Show an "no data" message
    EmptyState,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::CashBank,
        ReportKind::Receivables,
        ReportKind::Payables,
        ReportKind::Inventory,
        ReportKind::PlanFact,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ReportKind::CashBank => "cash_bank",
            ReportKind::Receivables => "receivables",
            ReportKind::Payables => "payables",
            ReportKind::Inventory => "inventory",
            ReportKind::PlanFact => "plan_fact",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::CashBank => "Остатки денежных средств",
            ReportKind::Receivables => "Дебиторская задолженность",
            ReportKind::Payables => "Кредиторская задолженность",
            ReportKind::Inventory => "Оборачиваемость запасов",
            ReportKind::PlanFact => "План-факт выручки",
        }
    }

    /// JSON field holding the display name of a row
    pub fn name_field(&self) -> &'static str {
        match self {
            ReportKind::CashBank => "account_name",
            ReportKind::Receivables | ReportKind::Payables => "counterparty_name",
            ReportKind::Inventory => "item_name",
            ReportKind::PlanFact => "article_name",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    pub fn empty_result_policy(&self) -> EmptyResultPolicy {
        match self {
            ReportKind::CashBank | ReportKind::Inventory => EmptyResultPolicy::SampleData,
            ReportKind::Receivables | ReportKind::Payables | ReportKind::PlanFact => {
                EmptyResultPolicy::EmptyState
            }
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Query-string part of a report request (`report_date`, `organization_ids`, `all_organizations`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub report_date: NaiveDate,
    /// Comma-separated organization ids
    #[serde(default)]
    pub organization_ids: String,
    /// "All organizations" scope selected in the picker
    #[serde(default)]
    pub all_organizations: bool,
}

impl ReportQuery {
    pub fn new(report_date: NaiveDate, organization_ids: &[String], all_organizations: bool) -> Self {
        Self {
            report_date,
            organization_ids: organization_ids.join(","),
            all_organizations,
        }
    }

    /// Distinct, non-empty ids in the order given
    pub fn organization_id_list(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in self.organization_ids.split(',').map(str::trim) {
            if !id.is_empty() && !ids.iter().any(|existing| existing == id) {
                ids.push(id.to_string());
            }
        }
        ids
    }
}

/// Typed report forest, one variant per report kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "nodes", rename_all = "snake_case")]
pub enum ReportTree {
    CashBank(Vec<ReportNode<CashBankRow>>),
    Receivables(Vec<ReportNode<DebtRow>>),
    Payables(Vec<ReportNode<DebtRow>>),
    Inventory(Vec<ReportNode<InventoryRow>>),
    PlanFact(Vec<ReportNode<PlanFactRow>>),
}

fn decode_and_build<R>(rows: Vec<serde_json::Value>, consolidate: bool) -> Result<Vec<ReportNode<R>>, serde_json::Error>
where
    R: ReportRecord + serde::de::DeserializeOwned,
{
    let typed = rows
        .into_iter()
        .map(serde_json::from_value::<R>)
        .collect::<Result<Vec<R>, _>>()?;
    Ok(build_hierarchy(typed, consolidate))
}

fn summarize<R: ReportRecord + ReportColumns>(nodes: &[ReportNode<R>]) -> Vec<SummaryLine> {
    let label = R::measure_headers()
        .get(R::headline_index())
        .copied()
        .unwrap_or_default()
        .to_string();
    nodes
        .iter()
        .map(|node| SummaryLine {
            name: node.row.display_name().to_string(),
            is_total: node.row.is_total_row(),
            headline_label: label.clone(),
            headline: node
                .row
                .measures()
                .get(R::headline_index())
                .map(|m| m.display())
                .unwrap_or_default(),
        })
        .collect()
}

impl ReportTree {
    /// Decode flat JSON rows of the given kind and build the hierarchy
    pub fn from_json_rows(
        kind: ReportKind,
        rows: Vec<serde_json::Value>,
        consolidate: bool,
    ) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ReportKind::CashBank => ReportTree::CashBank(decode_and_build(rows, consolidate)?),
            ReportKind::Receivables => ReportTree::Receivables(decode_and_build(rows, consolidate)?),
            ReportKind::Payables => ReportTree::Payables(decode_and_build(rows, consolidate)?),
            ReportKind::Inventory => ReportTree::Inventory(decode_and_build(rows, consolidate)?),
            ReportKind::PlanFact => ReportTree::PlanFact(decode_and_build(rows, consolidate)?),
        })
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            ReportTree::CashBank(_) => ReportKind::CashBank,
            ReportTree::Receivables(_) => ReportKind::Receivables,
            ReportTree::Payables(_) => ReportKind::Payables,
            ReportTree::Inventory(_) => ReportKind::Inventory,
            ReportTree::PlanFact(_) => ReportKind::PlanFact,
        }
    }

    pub fn root_count(&self) -> usize {
        match self {
            ReportTree::CashBank(n) => n.len(),
            ReportTree::Receivables(n) | ReportTree::Payables(n) => n.len(),
            ReportTree::Inventory(n) => n.len(),
            ReportTree::PlanFact(n) => n.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root_count() == 0
    }

    pub fn node_count(&self) -> usize {
        match self {
            ReportTree::CashBank(n) => count_nodes(n),
            ReportTree::Receivables(n) | ReportTree::Payables(n) => count_nodes(n),
            ReportTree::Inventory(n) => count_nodes(n),
            ReportTree::PlanFact(n) => count_nodes(n),
        }
    }

    /// Name column header followed by measure headers
    pub fn columns(&self) -> Vec<&'static str> {
        fn cols<R: ReportColumns>() -> Vec<&'static str> {
            let mut v = vec![R::name_header()];
            v.extend(R::measure_headers());
            v
        }
        match self {
            ReportTree::CashBank(_) => cols::<CashBankRow>(),
            ReportTree::Receivables(_) | ReportTree::Payables(_) => cols::<DebtRow>(),
            ReportTree::Inventory(_) => cols::<InventoryRow>(),
            ReportTree::PlanFact(_) => cols::<PlanFactRow>(),
        }
    }

    pub fn display_nodes(&self) -> Vec<DisplayNode> {
        match self {
            ReportTree::CashBank(n) => DisplayNode::from_forest(n),
            ReportTree::Receivables(n) | ReportTree::Payables(n) => DisplayNode::from_forest(n),
            ReportTree::Inventory(n) => DisplayNode::from_forest(n),
            ReportTree::PlanFact(n) => DisplayNode::from_forest(n),
        }
    }

    pub fn csv_table(&self) -> CsvTable {
        match self {
            ReportTree::CashBank(n) => CsvTable::from_tree(n),
            ReportTree::Receivables(n) | ReportTree::Payables(n) => CsvTable::from_tree(n),
            ReportTree::Inventory(n) => CsvTable::from_tree(n),
            ReportTree::PlanFact(n) => CsvTable::from_tree(n),
        }
    }

    pub fn summary_lines(&self) -> Vec<SummaryLine> {
        match self {
            ReportTree::CashBank(n) => summarize(n),
            ReportTree::Receivables(n) | ReportTree::Payables(n) => summarize(n),
            ReportTree::Inventory(n) => summarize(n),
            ReportTree::PlanFact(n) => summarize(n),
        }
    }
}

/// Response of `GET /api/reports/:kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub kind: ReportKind,
    pub report_date: NaiveDate,
    /// Organization roots were wrapped into the consolidated node
    pub consolidated: bool,
    /// The query returned nothing and a sample hierarchy is shown instead
    pub is_sample: bool,
    pub organization_count: usize,
    pub tree: ReportTree,
}

impl ReportResponse {
    pub fn compact_summary(&self) -> CompactSummary {
        CompactSummary {
            kind: self.kind,
            title: self.kind.title().to_string(),
            report_date: self.report_date,
            is_sample: self.is_sample,
            lines: self.tree.summary_lines(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_codes_round_trip() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ReportKind::from_code("unknown"), None);
        assert_eq!(
            serde_json::to_value(ReportKind::PlanFact).unwrap(),
            json!("plan_fact")
        );
    }

    #[test]
    fn test_empty_result_policy() {
        assert_eq!(ReportKind::CashBank.empty_result_policy(), EmptyResultPolicy::SampleData);
        assert_eq!(ReportKind::Inventory.empty_result_policy(), EmptyResultPolicy::SampleData);
        assert_eq!(ReportKind::Payables.empty_result_policy(), EmptyResultPolicy::EmptyState);
    }

    #[test]
    fn test_query_organization_list() {
        let query = ReportQuery {
            report_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            organization_ids: " a, b,,a ,c".to_string(),
            all_organizations: true,
        };
        assert_eq!(query.organization_id_list(), vec!["a", "b", "c"]);
        assert_eq!(
            ReportQuery::new(query.report_date, &["a".to_string(), "b".to_string()], false).organization_ids,
            "a,b"
        );
    }

    #[test]
    fn test_tree_from_json_rows() {
        let rows = vec![
            json!({"id": "O1", "parent_id": null, "is_total_row": true, "balance": 100.0,
                   "organization_name": "X", "account_name": "Деньги"}),
            json!({"id": "O2", "parent_id": null, "is_total_row": true, "balance": 50.0,
                   "organization_name": "Y", "account_name": "Деньги"}),
            json!({"id": "B", "parent_id": "O1", "level": 1, "balance": 100.0, "account_name": "Банк"}),
        ];

        let tree = ReportTree::from_json_rows(ReportKind::CashBank, rows, true).unwrap();

        assert_eq!(tree.kind(), ReportKind::CashBank);
        assert_eq!(tree.root_count(), 1);
        assert_eq!(tree.node_count(), 4);
        let display = tree.display_nodes();
        assert_eq!(display[0].id, common::CONSOLIDATED_TOTAL_ID);
        assert_eq!(display[0].cells[4], "150.00");
        assert_eq!(display[0].children[0].name, "X - Деньги");
        assert_eq!(display[0].children[0].children[0].name, "Банк");
    }

    #[test]
    fn test_tree_from_malformed_row_is_error() {
        let rows = vec![json!({"parent_id": "x"})];
        assert!(ReportTree::from_json_rows(ReportKind::Inventory, rows, false).is_err());
    }

    #[test]
    fn test_tree_serializes_with_kind_tag() {
        let tree = ReportTree::PlanFact(vec![]);
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({"kind": "plan_fact", "nodes": []})
        );
    }

    #[test]
    fn test_compact_summary_uses_headline_measure() {
        let rows = vec![json!({"id": "1", "article_name": "Выручка", "plan_amount": 200.0,
                               "fact_amount": 150.0, "is_total_row": true})];
        let response = ReportResponse {
            kind: ReportKind::PlanFact,
            report_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            consolidated: false,
            is_sample: false,
            organization_count: 1,
            tree: ReportTree::from_json_rows(ReportKind::PlanFact, rows, false).unwrap(),
        };

        let summary = response.compact_summary();

        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.lines[0].headline_label, "Выполнение");
        assert_eq!(summary.lines[0].headline, "75.0%");
        assert!(summary.lines[0].is_total);
    }
}

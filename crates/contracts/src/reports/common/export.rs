use serde::{Deserialize, Serialize};

use super::columns::ReportColumns;
use super::hierarchy::flatten;
use super::record::{ReportNode, ReportRecord};

/// Column separator used for exported reports (Excel with a Russian locale
/// opens `;`-separated files directly)
pub const CSV_DELIMITER: char = ';';

pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

/// Flattened report ready to be written as CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Flatten a report tree in display order.
    ///
    /// The first two columns carry the depth and the name indented by depth,
    /// so the hierarchy survives in a spreadsheet.
    pub fn from_tree<R: ReportRecord + ReportColumns>(nodes: &[ReportNode<R>]) -> Self {
        let mut headers = vec!["Уровень".to_string(), R::name_header().to_string()];
        headers.extend(R::measure_headers().into_iter().map(str::to_string));

        let rows = flatten(nodes)
            .into_iter()
            .map(|flat| {
                let mut cells = Vec::with_capacity(headers.len());
                cells.push(flat.depth.to_string());
                cells.push(format!(
                    "{}{}",
                    "  ".repeat(flat.depth),
                    flat.node.row.display_name()
                ));
                cells.extend(flat.node.row.measures().iter().map(|m| m.raw()));
                cells
            })
            .collect();

        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render with a UTF-8 BOM so that Excel picks up Cyrillic text
    pub fn to_csv_string(&self) -> String {
        let mut out = String::new();
        out.push('\u{FEFF}');
        push_line(&mut out, &self.headers);
        for row in &self.rows {
            push_line(&mut out, row);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String]) {
    let line: Vec<String> = cells.iter().map(|c| escape_csv_cell(c)).collect();
    let separator = CSV_DELIMITER.to_string();
    out.push_str(&line.join(separator.as_str()));
    out.push('\n');
}

/// Quote a cell when it contains the delimiter, quotes or line breaks
pub fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(CSV_DELIMITER) || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// File name like `cash_bank_2025-01-31.csv`
pub fn export_file_name(report_code: &str, report_date: chrono::NaiveDate) -> String {
    format!("{}_{}.csv", report_code, report_date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::common::build_hierarchy;
    use crate::reports::common::record::RowHeader;
    use crate::reports::r503_plan_fact::PlanFactRow;

    fn plan_row(id: &str, parent: Option<&str>, name: &str, plan: f64, fact: f64) -> PlanFactRow {
        PlanFactRow {
            header: RowHeader::new(id, parent),
            article_name: name.to_string(),
            plan_amount: plan,
            fact_amount: fact,
        }
    }

    #[test]
    fn test_table_from_tree() {
        let tree = build_hierarchy(
            vec![
                plan_row("1", None, "Выручка", 100.0, 80.0),
                plan_row("2", Some("1"), "Опт", 0.0, 5.0),
            ],
            false,
        );

        let table = CsvTable::from_tree(&tree);

        assert_eq!(
            table.headers,
            vec!["Уровень", "Статья", "План", "Факт", "Отклонение", "Выполнение"]
        );
        assert_eq!(table.rows[0], vec!["0", "Выручка", "100.00", "80.00", "-20.00", "80.00"]);
        assert_eq!(table.rows[1], vec!["1", "  Опт", "0.00", "5.00", "5.00", ""]);
    }

    #[test]
    fn test_csv_string_escapes_cells() {
        let table = CsvTable {
            headers: vec!["a".to_string(), "b".to_string()],
            rows: vec![vec!["x;y".to_string(), "say \"hi\"".to_string()]],
        };
        let csv = table.to_csv_string();
        assert!(csv.starts_with('\u{FEFF}'));
        assert_eq!(&csv['\u{FEFF}'.len_utf8()..], "a;b\n\"x;y\";\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_export_file_name() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(export_file_name("cash_bank", date), "cash_bank_2025-01-31.csv");
    }
}

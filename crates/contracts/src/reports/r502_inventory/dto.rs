use serde::{Deserialize, Serialize};

use crate::reports::common::{Measure, ReportColumns, ReportRecord, RowHeader};

/// Row of the inventory turnover report
///
/// Organization root → warehouse → nomenclature group → item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    #[serde(flatten)]
    pub header: RowHeader,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub opening_qty: f64,
    #[serde(default)]
    pub receipt_qty: f64,
    #[serde(default)]
    pub issue_qty: f64,
    #[serde(default)]
    pub closing_qty: f64,
    #[serde(default)]
    pub closing_amount: f64,
}

impl InventoryRow {
    /// Issues divided by the average stock of the period
    pub fn turnover_ratio(&self) -> Option<f64> {
        let average_stock = (self.opening_qty + self.closing_qty) / 2.0;
        if average_stock.abs() < f64::EPSILON {
            None
        } else {
            Some(self.issue_qty / average_stock)
        }
    }
}

impl ReportRecord for InventoryRow {
    fn header(&self) -> &RowHeader {
        &self.header
    }

    fn display_name(&self) -> &str {
        &self.item_name
    }

    fn set_display_name(&mut self, name: String) {
        self.item_name = name;
    }

    fn accumulate(&mut self, other: &Self) {
        self.opening_qty += other.opening_qty;
        self.receipt_qty += other.receipt_qty;
        self.issue_qty += other.issue_qty;
        self.closing_qty += other.closing_qty;
        self.closing_amount += other.closing_amount;
    }

    fn consolidated_total() -> Self {
        Self {
            header: RowHeader::consolidated(),
            item_name: "Итого по всем организациям".to_string(),
            ..Default::default()
        }
    }
}

impl ReportColumns for InventoryRow {
    fn name_header() -> &'static str {
        "Склад / номенклатура"
    }

    fn measure_headers() -> Vec<&'static str> {
        vec![
            "Нач. остаток",
            "Приход",
            "Расход",
            "Кон. остаток",
            "Сумма остатка",
            "Оборачиваемость",
        ]
    }

    fn measures(&self) -> Vec<Measure> {
        vec![
            Measure::quantity(self.opening_qty),
            Measure::quantity(self.receipt_qty),
            Measure::quantity(self.issue_qty),
            Measure::quantity(self.closing_qty),
            Measure::money(self.closing_amount),
            Measure::ratio(self.turnover_ratio()),
        ]
    }

    fn headline_index() -> usize {
        4
    }
}

use serde::{Deserialize, Serialize};

use crate::reports::common::{Measure, ReportColumns, ReportRecord, RowHeader};

/// Row of the receivables / payables reports
///
/// Both reports share the same shape: organization root → counterparty →
/// contract. Which side of the ledger a row belongs to is decided by the
/// report kind, not by the row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtRow {
    #[serde(flatten)]
    pub header: RowHeader,
    #[serde(default)]
    pub counterparty_name: String,
    #[serde(default)]
    pub contract_name: Option<String>,
    #[serde(default)]
    pub debt_amount: f64,
    #[serde(default)]
    pub overdue_amount: f64,
    #[serde(default)]
    pub advance_amount: f64,
}

impl DebtRow {
    /// Debt that is not yet due
    pub fn current_amount(&self) -> f64 {
        self.debt_amount - self.overdue_amount
    }

    /// Share of overdue debt, `None` when there is no debt at all
    pub fn overdue_share(&self) -> Option<f64> {
        if self.debt_amount.abs() < f64::EPSILON {
            None
        } else {
            Some(self.overdue_amount / self.debt_amount * 100.0)
        }
    }
}

impl ReportRecord for DebtRow {
    fn header(&self) -> &RowHeader {
        &self.header
    }

    fn display_name(&self) -> &str {
        &self.counterparty_name
    }

    fn set_display_name(&mut self, name: String) {
        self.counterparty_name = name;
    }

    fn accumulate(&mut self, other: &Self) {
        self.debt_amount += other.debt_amount;
        self.overdue_amount += other.overdue_amount;
        self.advance_amount += other.advance_amount;
    }

    fn consolidated_total() -> Self {
        Self {
            header: RowHeader::consolidated(),
            counterparty_name: "Итого по всем организациям".to_string(),
            ..Default::default()
        }
    }
}

impl ReportColumns for DebtRow {
    fn name_header() -> &'static str {
        "Контрагент / договор"
    }

    fn measure_headers() -> Vec<&'static str> {
        vec![
            "Задолженность",
            "В т.ч. просрочено",
            "Текущая",
            "Доля просрочки",
            "Авансы",
        ]
    }

    fn measures(&self) -> Vec<Measure> {
        vec![
            Measure::money(self.debt_amount),
            Measure::money(self.overdue_amount),
            Measure::money(self.current_amount()),
            Measure::percent(self.overdue_share()),
            Measure::money(self.advance_amount),
        ]
    }
}

use serde::{Deserialize, Serialize};

use crate::reports::common::{Measure, ReportColumns, ReportRecord, RowHeader};

/// Row of the cash and bank balances report
///
/// Organization root → account group (cash desks, bank accounts) → account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashBankRow {
    #[serde(flatten)]
    pub header: RowHeader,
    #[serde(default)]
    pub account_name: String,
    /// "cash" / "bank", empty for group rows
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub opening_balance: f64,
    #[serde(default)]
    pub incoming: f64,
    #[serde(default)]
    pub outgoing: f64,
    #[serde(default, alias = "balance")]
    pub closing_balance: f64,
}

impl CashBankRow {
    pub fn net_flow(&self) -> f64 {
        self.incoming - self.outgoing
    }
}

impl ReportRecord for CashBankRow {
    fn header(&self) -> &RowHeader {
        &self.header
    }

    fn display_name(&self) -> &str {
        &self.account_name
    }

    fn set_display_name(&mut self, name: String) {
        self.account_name = name;
    }

    fn accumulate(&mut self, other: &Self) {
        self.opening_balance += other.opening_balance;
        self.incoming += other.incoming;
        self.outgoing += other.outgoing;
        self.closing_balance += other.closing_balance;
    }

    fn consolidated_total() -> Self {
        Self {
            header: RowHeader::consolidated(),
            account_name: "Итого по всем организациям".to_string(),
            ..Default::default()
        }
    }
}

impl ReportColumns for CashBankRow {
    fn name_header() -> &'static str {
        "Счёт / касса"
    }

    fn measure_headers() -> Vec<&'static str> {
        vec![
            "Остаток на начало",
            "Поступления",
            "Списания",
            "Чистый поток",
            "Остаток на конец",
        ]
    }

    fn measures(&self) -> Vec<Measure> {
        vec![
            Measure::money(self.opening_balance),
            Measure::money(self.incoming),
            Measure::money(self.outgoing),
            Measure::money(self.net_flow()),
            Measure::money(self.closing_balance),
        ]
    }

    fn headline_index() -> usize {
        4
    }
}

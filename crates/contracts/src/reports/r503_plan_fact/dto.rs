use serde::{Deserialize, Serialize};

use crate::reports::common::{Measure, ReportColumns, ReportRecord, RowHeader};

/// Row of the plan-vs-actual revenue report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanFactRow {
    #[serde(flatten)]
    pub header: RowHeader,
    #[serde(default)]
    pub article_name: String,
    #[serde(default)]
    pub plan_amount: f64,
    #[serde(default)]
    pub fact_amount: f64,
}

impl PlanFactRow {
    pub fn deviation(&self) -> f64 {
        self.fact_amount - self.plan_amount
    }

    /// Fact as a percentage of plan, `None` when nothing was planned
    pub fn completion_percent(&self) -> Option<f64> {
        if self.plan_amount.abs() < f64::EPSILON {
            None
        } else {
            Some(self.fact_amount / self.plan_amount * 100.0)
        }
    }
}

impl ReportRecord for PlanFactRow {
    fn header(&self) -> &RowHeader {
        &self.header
    }

    fn display_name(&self) -> &str {
        &self.article_name
    }

    fn set_display_name(&mut self, name: String) {
        self.article_name = name;
    }

    fn accumulate(&mut self, other: &Self) {
        self.plan_amount += other.plan_amount;
        self.fact_amount += other.fact_amount;
    }

    fn consolidated_total() -> Self {
        Self {
            header: RowHeader::consolidated(),
            article_name: "Итого по всем организациям".to_string(),
            ..Default::default()
        }
    }
}

impl ReportColumns for PlanFactRow {
    fn name_header() -> &'static str {
        "Статья"
    }

    fn measure_headers() -> Vec<&'static str> {
        vec!["План", "Факт", "Отклонение", "Выполнение"]
    }

    fn measures(&self) -> Vec<Measure> {
        vec![
            Measure::money(self.plan_amount),
            Measure::money(self.fact_amount),
            Measure::money(self.deviation()),
            Measure::percent(self.completion_percent()),
        ]
    }

    fn headline_index() -> usize {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_percent() {
        let row = PlanFactRow {
            plan_amount: 200.0,
            fact_amount: 150.0,
            ..Default::default()
        };
        assert_eq!(row.deviation(), -50.0);
        assert_eq!(row.completion_percent(), Some(75.0));
    }

    #[test]
    fn test_zero_plan_has_no_completion() {
        let row = PlanFactRow {
            fact_amount: 10.0,
            ..Default::default()
        };
        assert_eq!(row.completion_percent(), None);
    }
}

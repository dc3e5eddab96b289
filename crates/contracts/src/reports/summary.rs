use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ReportKind;

/// Short report digest for the chat-bot companion view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactSummary {
    pub kind: ReportKind,
    pub title: String,
    pub report_date: NaiveDate,
    pub is_sample: bool,
    /// One line per top-level node
    pub lines: Vec<SummaryLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub name: String,
    pub is_total: bool,
    pub headline_label: String,
    /// Formatted value of the headline measure
    pub headline: String,
}

impl CompactSummary {
    /// Plain-text rendering, one line per entry
    pub fn to_text(&self) -> String {
        let mut out = format!("{} на {}", self.title, self.report_date.format("%d.%m.%Y"));
        if self.is_sample {
            out.push_str(" (пример данных)");
        }
        if self.lines.is_empty() {
            out.push_str("\nНет данных");
        }
        for line in &self.lines {
            out.push_str(&format!("\n{}: {} {}", line.name, line.headline_label, line.headline));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        let summary = CompactSummary {
            kind: ReportKind::CashBank,
            title: ReportKind::CashBank.title().to_string(),
            report_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            is_sample: false,
            lines: vec![SummaryLine {
                name: "ООО Ромашка".to_string(),
                is_total: true,
                headline_label: "Остаток на конец".to_string(),
                headline: "1 500.00".to_string(),
            }],
        };
        assert_eq!(
            summary.to_text(),
            "Остатки денежных средств на 31.01.2025\nООО Ромашка: Остаток на конец 1 500.00"
        );
    }

    #[test]
    fn test_to_text_without_lines() {
        let summary = CompactSummary {
            kind: ReportKind::Payables,
            title: "Кредиторская задолженность".to_string(),
            report_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            is_sample: false,
            lines: vec![],
        };
        assert!(summary.to_text().ends_with("\nНет данных"));
    }
}

use crate::shared::number_format::{format_money, format_number_with_decimals, format_percent};

/// How a measure is shown in tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureFormat {
    Money,
    Quantity,
    Percent,
    Ratio,
}

/// One numeric cell of a report row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measure {
    /// `None` for derived values that cannot be computed (e.g. zero plan)
    pub value: Option<f64>,
    pub format: MeasureFormat,
}

impl Measure {
    pub fn money(value: f64) -> Self {
        Self {
            value: Some(value),
            format: MeasureFormat::Money,
        }
    }

    pub fn quantity(value: f64) -> Self {
        Self {
            value: Some(value),
            format: MeasureFormat::Quantity,
        }
    }

    pub fn percent(value: Option<f64>) -> Self {
        Self {
            value,
            format: MeasureFormat::Percent,
        }
    }

    pub fn ratio(value: Option<f64>) -> Self {
        Self {
            value,
            format: MeasureFormat::Ratio,
        }
    }

    /// Text for the on-screen table
    pub fn display(&self) -> String {
        match (self.value, self.format) {
            (None, MeasureFormat::Percent) => format_percent(None),
            (None, _) => "—".to_string(),
            (Some(v), MeasureFormat::Money) => format_money(v),
            (Some(v), MeasureFormat::Quantity) => format_number_with_decimals(v, 3),
            (Some(v), MeasureFormat::Percent) => format_percent(Some(v)),
            (Some(v), MeasureFormat::Ratio) => format_number_with_decimals(v, 2),
        }
    }

    /// Text for CSV: plain number, no thousands separator, empty when absent
    pub fn raw(&self) -> String {
        match (self.value, self.format) {
            (None, _) => String::new(),
            (Some(v), MeasureFormat::Quantity) => format!("{:.3}", v),
            (Some(v), _) => format!("{:.2}", v),
        }
    }
}

/// Column layout of a report row type
pub trait ReportColumns {
    /// Header of the name column
    fn name_header() -> &'static str;

    fn measure_headers() -> Vec<&'static str>;

    /// Values in the order of `measure_headers`
    fn measures(&self) -> Vec<Measure>;

    /// Measure shown in compact summaries
    fn headline_index() -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_display_and_raw() {
        assert_eq!(Measure::money(1234.5).display(), "1 234.50");
        assert_eq!(Measure::money(1234.5).raw(), "1234.50");
        assert_eq!(Measure::quantity(12.0).raw(), "12.000");
        assert_eq!(Measure::ratio(None).display(), "—");
        assert_eq!(Measure::ratio(None).raw(), "");
        assert_eq!(Measure::percent(Some(87.456)).display(), "87.5%");
    }
}

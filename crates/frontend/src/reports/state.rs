use chrono::{NaiveDate, Utc};
use contracts::reports::ReportQuery;
use leptos::prelude::*;

/// Выбор пользователя, общий для всех виджетов дашборда
#[derive(Clone, Copy)]
pub struct ReportFilters {
    pub user_key: RwSignal<String>,
    pub organization_ids: RwSignal<Vec<String>>,
    /// "Все организации" in the picker
    pub all_organizations: RwSignal<bool>,
    pub report_date: RwSignal<NaiveDate>,
}

impl ReportFilters {
    pub fn new(user_key: String) -> Self {
        Self {
            user_key: RwSignal::new(user_key),
            organization_ids: RwSignal::new(Vec::new()),
            all_organizations: RwSignal::new(false),
            report_date: RwSignal::new(Utc::now().date_naive()),
        }
    }

    /// Current query; tracks the filter signals when called inside a reactive scope
    pub fn query(&self) -> Option<ReportQuery> {
        selection_query(
            self.report_date.get(),
            &self.organization_ids.get(),
            self.all_organizations.get(),
        )
    }
}

/// Report query for a selection, `None` while nothing is selected
pub fn selection_query(
    report_date: NaiveDate,
    organization_ids: &[String],
    all_organizations: bool,
) -> Option<ReportQuery> {
    if organization_ids.is_empty() {
        return None;
    }
    Some(ReportQuery::new(report_date, organization_ids, all_organizations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_query() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert!(selection_query(date, &[], true).is_none());

        let query = selection_query(date, &["a".to_string(), "b".to_string()], true).unwrap();
        assert!(query.all_organizations);
        assert_eq!(query.organization_id_list(), vec!["a", "b"]);
    }
}

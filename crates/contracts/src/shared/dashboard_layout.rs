use serde::{Deserialize, Serialize};

use crate::reports::ReportKind;

/// Dashboard widget; one widget per report
pub type WidgetKind = ReportKind;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WidgetPreference {
    pub widget: WidgetKind,
    pub visible: bool,
    pub position: u32,
}

/// Order and visibility of the dashboard widgets for one user
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardLayout {
    pub widgets: Vec<WidgetPreference>,
}

impl Default for DashboardLayout {
    fn default() -> Self {
        let mut layout = Self { widgets: Vec::new() };
        layout.normalize();
        layout
    }
}

impl DashboardLayout {
    /// Bring a stored layout to a consistent state.
    ///
    /// Widgets are ordered by `position` (stable for ties), duplicates are
    /// dropped keeping the first, widgets the layout does not know about are
    /// appended as visible, and positions are renumbered `0..n`.
    pub fn normalize(&mut self) {
        self.widgets.sort_by_key(|w| w.position);

        let mut seen: Vec<WidgetKind> = Vec::with_capacity(WidgetKind::ALL.len());
        self.widgets.retain(|w| {
            if seen.contains(&w.widget) {
                false
            } else {
                seen.push(w.widget);
                true
            }
        });

        for kind in WidgetKind::ALL {
            if !seen.contains(&kind) {
                self.widgets.push(WidgetPreference {
                    widget: kind,
                    visible: true,
                    position: 0,
                });
            }
        }

        self.renumber();
    }

    fn renumber(&mut self) {
        for (i, w) in self.widgets.iter_mut().enumerate() {
            w.position = i as u32;
        }
    }

    /// Move the widget at index `from` to index `to`; `false` when either index is out of range
    pub fn move_widget(&mut self, from: usize, to: usize) -> bool {
        if from >= self.widgets.len() || to >= self.widgets.len() {
            return false;
        }
        let widget = self.widgets.remove(from);
        self.widgets.insert(to, widget);
        self.renumber();
        true
    }

    /// Move a widget one step up or down among the visible widgets, skipping
    /// hidden ones; `false` when it is already at that edge
    pub fn shift_visible(&mut self, widget: WidgetKind, up: bool) -> bool {
        let Some(from) = self.index_of(widget) else {
            return false;
        };
        let target = if up {
            self.widgets[..from].iter().rposition(|w| w.visible)
        } else {
            self.widgets[from + 1..]
                .iter()
                .position(|w| w.visible)
                .map(|i| from + 1 + i)
        };
        match target {
            Some(to) => self.move_widget(from, to),
            None => false,
        }
    }

    pub fn index_of(&self, widget: WidgetKind) -> Option<usize> {
        self.widgets.iter().position(|w| w.widget == widget)
    }

    /// Returns `false` when the widget already had this visibility
    pub fn set_visible(&mut self, widget: WidgetKind, visible: bool) -> bool {
        match self.widgets.iter_mut().find(|w| w.widget == widget) {
            Some(w) if w.visible != visible => {
                w.visible = visible;
                true
            }
            _ => false,
        }
    }

    pub fn visible_widgets(&self) -> Vec<WidgetKind> {
        self.widgets
            .iter()
            .filter(|w| w.visible)
            .map(|w| w.widget)
            .collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SaveLayoutRequest {
    pub user_key: String,
    pub layout: DashboardLayout,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SaveLayoutResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pref(widget: WidgetKind, visible: bool, position: u32) -> WidgetPreference {
        WidgetPreference {
            widget,
            visible,
            position,
        }
    }

    #[test]
    fn test_default_layout_has_all_widgets() {
        let layout = DashboardLayout::default();
        assert_eq!(layout.visible_widgets(), WidgetKind::ALL.to_vec());
        assert_eq!(
            layout.widgets.iter().map(|w| w.position).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn test_normalize_sorts_dedups_and_fills() {
        let mut layout = DashboardLayout {
            widgets: vec![
                pref(ReportKind::PlanFact, true, 7),
                pref(ReportKind::Inventory, false, 2),
                pref(ReportKind::PlanFact, false, 9),
            ],
        };

        layout.normalize();

        let order: Vec<WidgetKind> = layout.widgets.iter().map(|w| w.widget).collect();
        assert_eq!(
            order,
            vec![
                ReportKind::Inventory,
                ReportKind::PlanFact,
                ReportKind::CashBank,
                ReportKind::Receivables,
                ReportKind::Payables,
            ]
        );
        assert!(!layout.widgets[0].visible);
        assert!(layout.widgets[1].visible);
        assert_eq!(layout.widgets[4].position, 4);
    }

    #[test]
    fn test_move_widget() {
        let mut layout = DashboardLayout::default();

        assert!(layout.move_widget(0, 3));
        assert_eq!(layout.index_of(ReportKind::CashBank), Some(3));
        assert_eq!(layout.index_of(ReportKind::Receivables), Some(0));
        assert_eq!(layout.widgets[3].position, 3);

        assert!(!layout.move_widget(0, 10));
    }

    #[test]
    fn test_set_visible() {
        let mut layout = DashboardLayout::default();
        assert!(layout.set_visible(ReportKind::Payables, false));
        assert!(!layout.visible_widgets().contains(&ReportKind::Payables));
        assert_eq!(layout.visible_widgets().len(), 4);
        assert!(!layout.set_visible(ReportKind::Payables, false));
    }

    #[test]
    fn test_shift_visible_skips_hidden() {
        let mut layout = DashboardLayout::default();
        layout.set_visible(ReportKind::Receivables, false);

        assert!(layout.shift_visible(ReportKind::CashBank, false));
        assert_eq!(
            layout.visible_widgets(),
            vec![
                ReportKind::Payables,
                ReportKind::CashBank,
                ReportKind::Inventory,
                ReportKind::PlanFact,
            ]
        );

        assert!(!layout.shift_visible(ReportKind::Payables, true));
        assert!(!layout.shift_visible(ReportKind::PlanFact, false));
    }
}

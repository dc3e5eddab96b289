use contracts::reports::ReportKind;
use contracts::shared::dashboard_layout::DashboardLayout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::report_widget::ReportWidget;
use crate::reports::api;
use crate::reports::state::ReportFilters;

fn persist(user_key: String, layout: DashboardLayout) {
    spawn_local(async move {
        if let Err(e) = api::save_layout(&user_key, &layout).await {
            log::error!("Failed to save dashboard layout: {}", e);
        }
    });
}

/// Apply an edit only once the saved layout is known; returns whether to save
fn apply_edit(
    loaded: bool,
    layout: &mut DashboardLayout,
    edit: &dyn Fn(&mut DashboardLayout) -> bool,
) -> bool {
    loaded && edit(layout)
}

/// Дашборд: виджеты отчётов в сохранённом порядке
#[component]
pub fn Dashboard(filters: ReportFilters) -> impl IntoView {
    let layout = RwSignal::new(DashboardLayout::default());
    // Пока сохранённая раскладка не получена, правки не принимаются
    let loaded = RwSignal::new(false);

    Effect::new(move |_| {
        let user_key = filters.user_key.get();
        loaded.set(false);
        spawn_local(async move {
            match api::fetch_layout(&user_key).await {
                Ok(saved) => layout.set(saved),
                Err(e) => log::warn!("Using default layout, failed to load saved one: {}", e),
            }
            loaded.set(true);
        });
    });
    let locked = Signal::derive(move || !loaded.get());

    // Apply a change and save it when it did something
    let change = move |f: &dyn Fn(&mut DashboardLayout) -> bool| {
        let ready = loaded.get_untracked();
        let mut changed = false;
        layout.update(|l| changed = apply_edit(ready, l, f));
        if changed {
            persist(filters.user_key.get_untracked(), layout.get_untracked());
        }
    };

    let on_shift = Callback::new(move |(kind, up): (ReportKind, bool)| {
        change(&|l| l.shift_visible(kind, up));
    });
    let on_hide = Callback::new(move |kind: ReportKind| {
        change(&|l| l.set_visible(kind, false));
    });

    let hidden = move || {
        layout.with(|l| {
            l.widgets
                .iter()
                .filter(|w| !w.visible)
                .map(|w| w.widget)
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="dashboard">
            <For
                each=move || layout.with(|l| l.visible_widgets())
                key=|kind| *kind
                children=move |kind| {
                    let is_first = Signal::derive(move || {
                        layout.with(|l| l.visible_widgets().first() == Some(&kind))
                    });
                    let is_last = Signal::derive(move || {
                        layout.with(|l| l.visible_widgets().last() == Some(&kind))
                    });
                    view! {
                        <ReportWidget
                            kind=kind
                            filters=filters
                            is_first=is_first
                            is_last=is_last
                            locked=locked
                            on_shift=on_shift
                            on_hide=on_hide
                        />
                    }
                }
            />
            {move || {
                let hidden = hidden();
                (!hidden.is_empty()).then(|| {
                    let buttons = hidden
                        .into_iter()
                        .map(|kind| {
                            view! {
                                <button
                                    prop:disabled=move || locked.get()
                                    on:click=move |_| change(&|l| l.set_visible(kind, true))
                                >
                                    {format!("Показать: {}", kind.title())}
                                </button>
                            }
                        })
                        .collect_view();
                    view! { <div class="dashboard-hidden">{buttons}</div> }
                })
            }}
        </div>
    }
}

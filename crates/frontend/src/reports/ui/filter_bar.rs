use chrono::NaiveDate;
use contracts::domain::a002_organization::Organization;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::reports::api;
use crate::reports::state::ReportFilters;

const ALL_ORGANIZATIONS: &str = "__all__";

/// Выбор организации: одна или все доступные пользователю
#[component]
pub fn OrganizationPicker(filters: ReportFilters) -> impl IntoView {
    let (organizations, set_organizations) = signal(Vec::<Organization>::new());
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        let user_key = filters.user_key.get();
        spawn_local(async move {
            match api::fetch_organizations(&user_key).await {
                Ok(list) => {
                    log::debug!("{} organizations available to {}", list.len(), user_key);
                    filters
                        .organization_ids
                        .set(list.iter().map(|o| o.to_string_id()).collect());
                    filters.all_organizations.set(true);
                    set_organizations.set(list);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load organizations: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    });

    let on_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        if value == ALL_ORGANIZATIONS {
            let ids = organizations.with_untracked(|list| {
                list.iter().map(|o| o.to_string_id()).collect::<Vec<_>>()
            });
            filters.organization_ids.set(ids);
            filters.all_organizations.set(true);
        } else {
            filters.organization_ids.set(vec![value]);
            filters.all_organizations.set(false);
        }
    };

    let selected = move || {
        if filters.all_organizations.get() {
            ALL_ORGANIZATIONS.to_string()
        } else {
            filters
                .organization_ids
                .with(|ids| ids.first().cloned().unwrap_or_default())
        }
    };

    view! {
        <label class="filter-field">
            <span>"Организация"</span>
            <select on:change=on_change prop:value=selected>
                <option value=ALL_ORGANIZATIONS>"Все организации"</option>
                {move || {
                    organizations
                        .get()
                        .into_iter()
                        .map(|org| {
                            let id = org.to_string_id();
                            view! { <option value=id>{org.description}</option> }
                        })
                        .collect_view()
                }}
            </select>
            {move || error.get().map(|e| view! { <span class="filter-error">{e}</span> })}
        </label>
    }
}

/// Дата, на которую строятся отчёты
#[component]
pub fn ReportDateInput(filters: ReportFilters) -> impl IntoView {
    view! {
        <label class="filter-field">
            <span>"Дата отчёта"</span>
            <input
                type="date"
                prop:value=move || filters.report_date.get().format("%Y-%m-%d").to_string()
                on:change=move |ev| {
                    match NaiveDate::parse_from_str(&event_target_value(&ev), "%Y-%m-%d") {
                        Ok(date) => filters.report_date.set(date),
                        Err(e) => log::warn!("Ignoring invalid report date: {}", e),
                    }
                }
            />
        </label>
    }
}

#[component]
pub fn FilterBar(filters: ReportFilters) -> impl IntoView {
    view! {
        <div class="filter-bar">
            <OrganizationPicker filters=filters />
            <ReportDateInput filters=filters />
        </div>
    }
}

use contracts::reports::common::export::export_file_name;
use contracts::reports::{ReportKind, ReportResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::tree_table::TreeTable;
use crate::reports::api;
use crate::reports::state::ReportFilters;
use crate::shared::export::download_csv;
use crate::shared::fetch_state::FetchState;
use crate::shared::request_guard::RequestSequencer;

/// Виджет одного отчёта на дашборде
#[component]
pub fn ReportWidget(
    kind: ReportKind,
    filters: ReportFilters,
    #[prop(into)] is_first: Signal<bool>,
    #[prop(into)] is_last: Signal<bool>,
    /// Layout controls disabled while the saved layout is loading
    #[prop(into)] locked: Signal<bool>,
    /// `true` moves the widget up
    on_shift: Callback<(ReportKind, bool)>,
    on_hide: Callback<ReportKind>,
) -> impl IntoView {
    let state = RwSignal::new(FetchState::<ReportResponse>::default());
    let sequencer = RequestSequencer::new();

    // Reload on any filter change; only the latest response is applied
    Effect::new(move |_| {
        let ticket = sequencer.begin();
        let Some(query) = filters.query() else {
            state.update(FetchState::clear);
            return;
        };
        state.update(FetchState::start);

        spawn_local(async move {
            let result = api::fetch_report(kind, &query).await;
            if !ticket.is_current() {
                log::debug!("Dropping stale {} response", kind);
                return;
            }
            if let Err(e) = &result {
                log::error!("Failed to load {}: {}", kind, e);
            }
            state.update(|s| s.finish(result));
        });
    });

    let export = move |_: leptos::ev::MouseEvent| {
        let Some(data) = state.with_untracked(|s| s.data.clone()) else {
            return;
        };
        let file_name = export_file_name(kind.code(), data.report_date);
        if let Err(e) = download_csv(&data.tree.csv_table(), &file_name) {
            log::error!("CSV export of {} failed: {}", kind, e);
            state.update(|s| s.error = Some(e));
        }
    };

    let body = move || {
        let (data, error, loading) = state.with(|s| (s.data.clone(), s.error.clone(), s.loading));
        if let Some(err) = error {
            return view! {
                <div class="widget-error">
                    <strong>"⚠ Ошибка: "</strong>
                    {err}
                </div>
            }
            .into_any();
        }
        match data {
            None if loading => view! { <div class="widget-loading">"Загрузка данных..."</div> }.into_any(),
            None => view! { <div class="widget-empty">"Выберите организацию"</div> }.into_any(),
            Some(data) if data.tree.is_empty() => {
                view! { <div class="widget-empty">"Нет данных на выбранную дату"</div> }.into_any()
            }
            Some(data) => {
                let columns = data.tree.columns().into_iter().map(str::to_string).collect::<Vec<_>>();
                let nodes = data.tree.display_nodes();
                view! {
                    {data.is_sample.then(|| view! { <div class="widget-sample">"Пример данных"</div> })}
                    <TreeTable columns=columns nodes=nodes />
                }
                .into_any()
            }
        }
    };

    view! {
        <section class="report-widget">
            <header class="report-widget__header">
                <h2>{kind.title()}</h2>
                <div class="report-widget__actions">
                    <button
                        title="Выше"
                        prop:disabled=move || locked.get() || is_first.get()
                        on:click=move |_| on_shift.run((kind, true))
                    >
                        "↑"
                    </button>
                    <button
                        title="Ниже"
                        prop:disabled=move || locked.get() || is_last.get()
                        on:click=move |_| on_shift.run((kind, false))
                    >
                        "↓"
                    </button>
                    <button
                        title="Экспорт в CSV"
                        prop:disabled=move || state.with(|s| s.data.as_ref().map_or(true, |d| d.tree.is_empty()))
                        on:click=export
                    >
                        "CSV"
                    </button>
                    <button
                        title="Скрыть"
                        prop:disabled=move || locked.get()
                        on:click=move |_| on_hide.run(kind)
                    >
                        "✕"
                    </button>
                </div>
            </header>
            <div class="report-widget__body">{body}</div>
        </section>
    }
}

use contracts::reports::summary::CompactSummary;
use contracts::reports::ReportKind;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::reports::api;
use crate::reports::state::ReportFilters;
use crate::shared::fetch_state::FetchState;
use crate::shared::request_guard::RequestSequencer;

/// Компактный вид для чат-бота: текстовые сводки всех отчётов
#[component]
pub fn CompactView(filters: ReportFilters) -> impl IntoView {
    let state = RwSignal::new(FetchState::<Vec<CompactSummary>>::default());
    let sequencer = RequestSequencer::new();

    Effect::new(move |_| {
        let ticket = sequencer.begin();
        let Some(query) = filters.query() else {
            state.update(FetchState::clear);
            return;
        };
        state.update(FetchState::start);

        spawn_local(async move {
            let mut loaded = Vec::with_capacity(ReportKind::ALL.len());
            let mut failure = None;
            for kind in ReportKind::ALL {
                match api::fetch_summary(kind, &query).await {
                    Ok(summary) => loaded.push(summary),
                    Err(e) => {
                        log::error!("Failed to load {} summary: {}", kind, e);
                        failure = Some(e);
                    }
                }
            }
            if ticket.is_current() {
                state.update(|s| s.finish_partial(loaded, failure));
            }
        });
    });

    view! {
        <div class="compact-view">
            {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="widget-error">{e}</div> })}
            {move || {
                state
                    .with(|s| s.data.clone().unwrap_or_default())
                    .into_iter()
                    .map(|summary| view! { <pre class="compact-summary">{summary.to_text()}</pre> })
                    .collect_view()
            }}
        </div>
    }
}

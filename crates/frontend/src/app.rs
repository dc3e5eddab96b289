use leptos::prelude::*;

use crate::reports::state::ReportFilters;
use crate::reports::ui::compact::CompactView;
use crate::reports::ui::dashboard::Dashboard;
use crate::reports::ui::filter_bar::FilterBar;
use crate::shared::api_utils::page_query_params;

/// Пользователь по умолчанию, пока нет входа в систему
const DEFAULT_USER_KEY: &str = "demo";

#[component]
pub fn App() -> impl IntoView {
    let mut params = page_query_params();
    let user_key = params
        .remove("user")
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_USER_KEY.to_string());
    // ?view=compact is the chat-bot companion view
    let compact = params.get("view").map(String::as_str) == Some("compact");

    let filters = ReportFilters::new(user_key);

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Финансовая отчётность"</h1>
                <FilterBar filters=filters />
            </header>
            <main>
                {if compact {
                    view! { <CompactView filters=filters /> }.into_any()
                } else {
                    view! { <Dashboard filters=filters /> }.into_any()
                }}
            </main>
        </div>
    }
}

use contracts::reports::common::DisplayNode;
use leptos::prelude::*;
use std::collections::HashSet;

/// Строки одного узла и, если он раскрыт, его потомков
fn render_rows(
    node: &DisplayNode,
    depth: usize,
    open: &HashSet<String>,
    expanded: RwSignal<HashSet<String>>,
    rows: &mut Vec<AnyView>,
) {
    let is_open = open.contains(&node.id);

    let toggle: AnyView = if node.has_children() {
        let id = node.id.clone();
        view! {
            <button
                class="tree-toggle"
                on:click=move |_| {
                    expanded.update(|set| {
                        if !set.remove(&id) {
                            set.insert(id.clone());
                        }
                    })
                }
            >
                {if is_open { "▾" } else { "▸" }}
            </button>
        }
        .into_any()
    } else {
        view! { <span class="tree-toggle-placeholder"></span> }.into_any()
    };

    let cells = node
        .cells
        .iter()
        .map(|cell| view! { <td class="cell-number">{cell.clone()}</td> })
        .collect_view();

    let row_class = if node.is_total { "tree-row total-row" } else { "tree-row" };
    let indent = format!("display: flex; align-items: center; gap: 6px; padding-left: {}px;", depth * 16);
    rows.push(
        view! {
            <tr class=row_class>
                <td class="cell-name">
                    <div style=indent>
                        {toggle}
                        <span class="tree-label">{node.name.clone()}</span>
                    </div>
                </td>
                {cells}
            </tr>
        }
        .into_any(),
    );

    if is_open {
        for child in &node.children {
            render_rows(child, depth + 1, open, expanded, rows);
        }
    }
}

/// Таблица-дерево отчёта; верхний уровень раскрыт сразу
#[component]
pub fn TreeTable(columns: Vec<String>, nodes: Vec<DisplayNode>) -> impl IntoView {
    let expanded = RwSignal::new(nodes.iter().map(|n| n.id.clone()).collect::<HashSet<String>>());

    let header = columns
        .into_iter()
        .map(|title| view! { <th>{title}</th> })
        .collect_view();

    let body = move || {
        let open = expanded.get();
        let mut rows = Vec::new();
        for node in &nodes {
            render_rows(node, 0, &open, expanded, &mut rows);
        }
        rows
    };

    view! {
        <table class="report-tree-table">
            <thead>
                <tr>{header}</tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}

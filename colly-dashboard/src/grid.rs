//! Client-side table engine shared by the environments and clusters
//! views: column model, display preferences, and the pure row pipeline
//! (quick filter, per-column filters, sort, paging) that the components
//! drive through signals.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Duration;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::FocusEvent;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnDef {
    pub field: String,
    pub header: String,
    pub width: u32,
}

impl ColumnDef {
    pub fn new(field: &str, header: &str, width: u32) -> Self {
        Self {
            field: field.to_string(),
            header: header.to_string(),
            width,
        }
    }
}

/// A row that can hand out a display string for any column field.
/// Unknown fields resolve to the empty string.
pub trait GridRow {
    fn field(&self, name: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortModel {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterItem {
    pub field: String,
    pub value: String,
}

/// The persistable ensemble of display preferences. Row selection,
/// cell focus and open-panel state are deliberately not part of this
/// struct, so they can never be persisted or restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridViewState {
    pub hidden_columns: Vec<String>,
    pub column_widths: HashMap<String, u32>,
    pub sort: Option<SortModel>,
    pub filters: Vec<FilterItem>,
    pub quick_filter: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for GridViewState {
    fn default() -> Self {
        Self {
            hidden_columns: Vec::new(),
            column_widths: HashMap::new(),
            sort: None,
            filters: Vec::new(),
            quick_filter: String::new(),
            page: 0,
            page_size: 20,
        }
    }
}

pub fn is_column_visible(state: &GridViewState, field: &str) -> bool {
    !state.hidden_columns.iter().any(|hidden| hidden == field)
}

pub fn visible_columns(columns: &[ColumnDef], state: &GridViewState) -> Vec<ColumnDef> {
    columns
        .iter()
        .filter(|column| is_column_visible(state, &column.field))
        .cloned()
        .collect()
}

pub fn toggle_column(state: &mut GridViewState, field: &str) {
    if is_column_visible(state, field) {
        state.hidden_columns.push(field.to_string());
    } else {
        state.hidden_columns.retain(|hidden| hidden != field);
    }
}

pub fn column_width(state: &GridViewState, column: &ColumnDef) -> u32 {
    state
        .column_widths
        .get(&column.field)
        .copied()
        .unwrap_or(column.width)
}

pub fn filter_value(state: &GridViewState, field: &str) -> String {
    state
        .filters
        .iter()
        .find(|item| item.field == field)
        .map(|item| item.value.clone())
        .unwrap_or_default()
}

/// Replaces the filter for `field`; an empty value removes it.
pub fn set_filter(state: &mut GridViewState, field: &str, value: &str) {
    state.filters.retain(|item| item.field != field);
    if !value.is_empty() {
        state.filters.push(FilterItem {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

/// Cycles a column through ascending, descending, unsorted.
pub fn toggle_sort(state: &mut GridViewState, field: &str) {
    state.sort = match state.sort.take() {
        Some(model) if model.field == field && model.order == SortOrder::Asc => Some(SortModel {
            field: model.field,
            order: SortOrder::Desc,
        }),
        Some(model) if model.field == field => None,
        _ => Some(SortModel {
            field: field.to_string(),
            order: SortOrder::Asc,
        }),
    };
}

/// Quick-filter semantics: the query is split on whitespace and every
/// term must match (case-insensitively) in at least one visible column.
pub fn quick_filter_matches<R: GridRow>(row: &R, visible: &[ColumnDef], query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    query.split_whitespace().all(|term| {
        let term = term.to_lowercase();
        visible
            .iter()
            .any(|column| row.field(&column.field).to_lowercase().contains(&term))
    })
}

pub fn column_filters_match<R: GridRow>(row: &R, filters: &[FilterItem]) -> bool {
    filters.iter().all(|item| {
        item.value.is_empty()
            || row
                .field(&item.field)
                .to_lowercase()
                .contains(&item.value.to_lowercase())
    })
}

/// Numeric-aware comparison: values that both parse as numbers compare
/// numerically (monitoring metrics arrive as strings), everything else
/// compares as case-insensitive text.
pub fn compare_values(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Runs the full view pipeline short of paging: quick filter over the
/// visible columns, then column filters, then sort.
pub fn apply_view<R: GridRow + Clone>(
    rows: &[R],
    columns: &[ColumnDef],
    state: &GridViewState,
) -> Vec<R> {
    let visible = visible_columns(columns, state);
    let mut rows: Vec<R> = rows
        .iter()
        .filter(|row| quick_filter_matches(*row, &visible, &state.quick_filter))
        .filter(|row| column_filters_match(*row, &state.filters))
        .cloned()
        .collect();
    if let Some(sort) = &state.sort {
        rows.sort_by(|a, b| {
            let ordering = compare_values(&a.field(&sort.field), &b.field(&sort.field));
            match sort.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
    rows
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.min(page_count(total, page_size) - 1)
}

pub fn paged_rows<R: Clone>(rows: &[R], page: usize, page_size: usize) -> Vec<R> {
    if page_size == 0 {
        return rows.to_vec();
    }
    let page = clamp_page(page, rows.len(), page_size);
    rows.iter()
        .skip(page * page_size)
        .take(page_size)
        .cloned()
        .collect()
}

#[component]
pub fn SortableHeaderCell(
    column: ColumnDef,
    view_state: RwSignal<GridViewState>,
    persist: Callback<()>,
) -> impl IntoView {
    let field = column.field.clone();
    let sort_field = field.clone();
    let width_field = column.clone();
    let resize_field = field.clone();

    let sort_order = Signal::derive(move || {
        view_state.with(|state| match &state.sort {
            Some(model) if model.field == sort_field => Some(model.order),
            _ => None,
        })
    });

    let on_sort = move |_| {
        view_state.update(|state| toggle_sort(state, &field));
        persist.run(());
    };

    // Pointer capture keeps move/up events on the handle while dragging.
    let resizing = RwSignal::new(None::<(i32, u32)>);
    let on_pointerdown = {
        let column = column.clone();
        move |ev: web_sys::PointerEvent| {
            ev.stop_propagation();
            if let Some(target) = ev.target() {
                let _ = target
                    .unchecked_into::<web_sys::Element>()
                    .set_pointer_capture(ev.pointer_id());
            }
            let width = view_state.with_untracked(|state| column_width(state, &column));
            resizing.set(Some((ev.client_x(), width)));
        }
    };
    let on_pointermove = {
        let field = resize_field.clone();
        move |ev: web_sys::PointerEvent| {
            if let Some((start_x, start_width)) = resizing.get_untracked() {
                let width = (start_width as i32 + ev.client_x() - start_x).max(50) as u32;
                view_state.update(|state| {
                    state.column_widths.insert(field.clone(), width);
                });
            }
        }
    };
    let on_pointerup = move |_: web_sys::PointerEvent| {
        if resizing.get_untracked().is_some() {
            resizing.set(None);
            persist.run(());
        }
    };

    view! {
        <th
            scope="col"
            class="py-2 px-4 font-bold select-none"
            style:width=move || format!("{}px", view_state.with(|state| column_width(state, &width_field)))
        >
            <div class="flex flex-row items-center">
                <span class="cursor-pointer" on:click=on_sort>{column.header.clone()}</span>
                <span class:hidden=move || sort_order.get() != Some(SortOrder::Asc)>
                    <svg class="w-3 h-3 ml-1" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 10 6">
                        <path stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 5 5 1 1 5"/>
                    </svg>
                </span>
                <span class:hidden=move || sort_order.get() != Some(SortOrder::Desc)>
                    <svg class="w-3 h-3 ml-1" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 10 6">
                        <path stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="m1 1 4 4 4-4"/>
                    </svg>
                </span>
                <span
                    class="ml-auto w-1 h-5 cursor-col-resize rounded bg-gray-200 hover:bg-blue-400"
                    on:pointerdown=on_pointerdown
                    on:pointermove=on_pointermove
                    on:pointerup=on_pointerup
                ></span>
            </div>
        </th>
    }
}

#[component]
pub fn QuickFilterInput(
    view_state: RwSignal<GridViewState>,
    persist: Callback<()>,
    placeholder: String,
) -> impl IntoView {
    view! {
        <form class="flex items-center">
            <label for="simple-search" class="sr-only">{placeholder.clone()}</label>
            <div class="relative w-full">
                <div class="absolute inset-y-0 left-0 flex items-center pl-3 pointer-events-none">
                    <svg aria-hidden="true" class="w-5 h-5 text-gray-500" fill="currentColor" viewBox="0 0 20 20" xmlns="http://www.w3.org/2000/svg">
                        <path fill-rule="evenodd" d="M8 4a4 4 0 100 8 4 4 0 000-8zM2 8a6 6 0 1110.89 3.476l4.817 4.817a1 1 0 01-1.414 1.414l-4.816-4.816A6 6 0 012 8z" clip-rule="evenodd" />
                    </svg>
                </div>
                <input
                    prop:value={move || view_state.with(|state| state.quick_filter.clone())}
                    on:input=move |ev| {
                        view_state.update(|state| {
                            state.quick_filter = event_target_value(&ev);
                            state.page = 0;
                        });
                        persist.run(());
                    }
                    type="text"
                    class="bg-white block w-full p-2 pl-10 text-sm text-gray-900 border border-gray-300 rounded-lg bg-gray-50 focus:ring-blue-500 focus:border-blue-500"
                    placeholder={placeholder}
                />
            </div>
        </form>
    }
}

#[component]
pub fn ColumnsPanel(
    columns: Signal<Vec<ColumnDef>>,
    view_state: RwSignal<GridViewState>,
    persist: Callback<()>,
) -> impl IntoView {
    let dropdown_hidden = RwSignal::new(true);

    let toggle_dropdown = move |_| {
        dropdown_hidden.set(!dropdown_hidden.get_untracked());
    };

    let on_focusout = move |e: FocusEvent| {
        let node = e
            .current_target()
            .unwrap_throw()
            .unchecked_into::<web_sys::HtmlElement>();

        set_timeout(
            move || {
                let has_focus = if let Some(active) = document().active_element() {
                    let active: web_sys::Node = active.into();
                    node.contains(Some(&active))
                } else {
                    false
                };
                if !has_focus && !dropdown_hidden.get_untracked() {
                    dropdown_hidden.set(true);
                }
            },
            Duration::from_secs(0),
        );
    };

    view! {
        <div class="relative" on:focusout=on_focusout>
            <button
                type="button"
                title="Columns"
                class="hover:bg-gray-100 focus:outline-none font-medium rounded-lg text-sm p-2.5 text-center inline-flex items-center"
                on:click=toggle_dropdown
            >
                <svg class="w-4 h-4 text-gray-600" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                    <path stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 4v16m6-16v16M4 4h16a1 1 0 0 1 1 1v14a1 1 0 0 1-1 1H4a1 1 0 0 1-1-1V5a1 1 0 0 1 1-1Z"/>
                </svg>
            </button>
            <div
                class="absolute pt-2 z-10 right-0"
                class:hidden=move || dropdown_hidden.get()
            >
                <ul class="py-2 text-sm text-gray-700 bg-white rounded-lg border shadow w-56 max-h-96 overflow-y-auto">
                    <For
                        each=move || columns.get()
                        key=|column| column.field.clone()
                        children=move |column| {
                            let field = column.field.clone();
                            let checked_field = column.field.clone();
                            view! {
                                <li class="px-4 py-1">
                                    <label class="flex items-center text-sm font-medium text-gray-900">
                                        <input
                                            type="checkbox"
                                            class="w-4 h-4 mr-2 border border-gray-300 rounded bg-gray-50 focus:ring-3 focus:ring-blue-300"
                                            prop:checked=move || view_state.with(|state| is_column_visible(state, &checked_field))
                                            on:change=move |_| {
                                                view_state.update(|state| toggle_column(state, &field));
                                                persist.run(());
                                            }
                                        />
                                        {column.header.clone()}
                                    </label>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </div>
    }
}

#[component]
pub fn FiltersPanel(
    columns: Signal<Vec<ColumnDef>>,
    view_state: RwSignal<GridViewState>,
    persist: Callback<()>,
) -> impl IntoView {
    let dropdown_hidden = RwSignal::new(true);

    let toggle_dropdown = move |_| {
        dropdown_hidden.set(!dropdown_hidden.get_untracked());
    };

    let on_focusout = move |e: FocusEvent| {
        let node = e
            .current_target()
            .unwrap_throw()
            .unchecked_into::<web_sys::HtmlElement>();

        set_timeout(
            move || {
                let has_focus = if let Some(active) = document().active_element() {
                    let active: web_sys::Node = active.into();
                    node.contains(Some(&active))
                } else {
                    false
                };
                if !has_focus && !dropdown_hidden.get_untracked() {
                    dropdown_hidden.set(true);
                }
            },
            Duration::from_secs(0),
        );
    };

    view! {
        <div class="relative" on:focusout=on_focusout>
            <button
                type="button"
                title="Filters"
                class="relative hover:bg-gray-100 focus:outline-none font-medium rounded-lg text-sm p-2.5 text-center inline-flex items-center"
                on:click=toggle_dropdown
            >
                <svg class="w-4 h-4 text-gray-600" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                    <path stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 5h16M7 10h10m-7 5h4"/>
                </svg>
                <span
                    class="absolute top-1.5 right-1.5 w-2 h-2 rounded-full bg-blue-600"
                    class:hidden=move || view_state.with(|state| state.filters.is_empty())
                ></span>
            </button>
            <div
                class="absolute pt-2 z-10 right-0"
                class:hidden=move || dropdown_hidden.get()
            >
                <div class="py-2 px-4 text-sm text-gray-700 bg-white rounded-lg border shadow w-72 max-h-96 overflow-y-auto">
                    <For
                        each=move || columns.get()
                        key=|column| column.field.clone()
                        children=move |column| {
                            let field = column.field.clone();
                            let value_field = column.field.clone();
                            view! {
                                <div class="py-1">
                                    <label class="block mb-1 text-xs font-medium text-gray-500">{column.header.clone()}</label>
                                    <input
                                        type="text"
                                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-1.5"
                                        placeholder="contains"
                                        prop:value=move || view_state.with(|state| filter_value(state, &value_field))
                                        on:input=move |ev| {
                                            view_state.update(|state| {
                                                set_filter(state, &field, &event_target_value(&ev));
                                                state.page = 0;
                                            });
                                            persist.run(());
                                        }
                                    />
                                </div>
                            }
                        }
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn PaginationBar(
    total: Signal<usize>,
    view_state: RwSignal<GridViewState>,
    persist: Callback<()>,
) -> impl IntoView {
    let first_shown = move || {
        let total = total.get();
        if total == 0 {
            0
        } else {
            view_state.with(|state| clamp_page(state.page, total, state.page_size) * state.page_size) + 1
        }
    };
    let last_shown = move || {
        let total = total.get();
        view_state.with(|state| {
            let page = clamp_page(state.page, total, state.page_size);
            total.min((page + 1) * state.page_size)
        })
    };
    let at_first_page = move || view_state.with(|state| clamp_page(state.page, total.get(), state.page_size) == 0);
    let at_last_page = move || {
        view_state.with(|state| {
            clamp_page(state.page, total.get(), state.page_size) + 1
                >= page_count(total.get(), state.page_size)
        })
    };

    let prev_page = move |_| {
        if at_first_page() {
            return;
        }
        view_state.update(|state| state.page = state.page.saturating_sub(1));
        persist.run(());
    };
    let next_page = move |_| {
        if at_last_page() {
            return;
        }
        view_state.update(|state| {
            state.page = clamp_page(state.page + 1, total.get_untracked(), state.page_size);
        });
        persist.run(());
    };
    let change_page_size = move |ev| {
        let page_size = event_target_value(&ev).parse().unwrap_or(20);
        view_state.update(|state| {
            state.page_size = page_size;
            state.page = 0;
        });
        persist.run(());
    };

    view! {
        <div class="mt-4 flex flex-row items-center justify-between">
            <span class="text-sm font-normal text-gray-500">
                {"Showing "}
                <span class="font-semibold text-gray-900">
                    {move || format!("{}-{}", first_shown(), last_shown())}
                </span>
                {" of "}
                <span class="font-semibold text-gray-900">{move || total.get()}</span>
            </span>
            <div class="flex flex-row items-center">
                <p class="mr-2">{"rows per page"}</p>
                <select
                    class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-18 p-2.5"
                    on:change=change_page_size
                >
                    {[10usize, 20, 50, 100]
                        .iter()
                        .map(|size| {
                            let size = *size;
                            view! {
                                <option
                                    value=size.to_string()
                                    selected=move || view_state.with(|state| state.page_size == size)
                                >
                                    {size}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <button class="ml-2 p-2 rounded"
                    class=("text-gray-300", at_first_page)
                    class=("cursor-pointer", move || !at_first_page())
                    class=("hover:bg-gray-100", move || !at_first_page())
                    disabled=at_first_page
                    on:click=prev_page
                >
                    <svg class="w-5 h-5" aria-hidden="true" fill="currentColor" viewBox="0 0 20 20" xmlns="http://www.w3.org/2000/svg">
                        <path fill-rule="evenodd" d="M12.707 5.293a1 1 0 010 1.414L9.414 10l3.293 3.293a1 1 0 01-1.414 1.414l-4-4a1 1 0 010-1.414l4-4a1 1 0 011.414 0z" clip-rule="evenodd"></path>
                    </svg>
                </button>
                <button class="p-2 rounded"
                    class=("text-gray-300", at_last_page)
                    class=("cursor-pointer", move || !at_last_page())
                    class=("hover:bg-gray-100", move || !at_last_page())
                    disabled=at_last_page
                    on:click=next_page
                >
                    <svg class="w-5 h-5" aria-hidden="true" fill="currentColor" viewBox="0 0 20 20" xmlns="http://www.w3.org/2000/svg">
                        <path fill-rule="evenodd" d="M7.293 14.707a1 1 0 010-1.414L10.586 10 7.293 6.707a1 1 0 011.414-1.414l4 4a1 1 0 010 1.414l-4 4a1 1 0 01-1.414 0z" clip-rule="evenodd"></path>
                    </svg>
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRow(HashMap<String, String>);

    impl TestRow {
        fn new(fields: &[(&str, &str)]) -> Self {
            Self(
                fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
        }
    }

    impl Clone for TestRow {
        fn clone(&self) -> Self {
            Self(self.0.clone())
        }
    }

    impl GridRow for TestRow {
        fn field(&self, name: &str) -> String {
            self.0.get(name).cloned().unwrap_or_default()
        }
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("name", "Name", 150),
            ColumnDef::new("owner", "Owner", 120),
            ColumnDef::new("cpu", "cpu", 100),
        ]
    }

    fn rows() -> Vec<TestRow> {
        vec![
            TestRow::new(&[("name", "env-a"), ("owner", "alice"), ("cpu", "9")]),
            TestRow::new(&[("name", "env-b"), ("owner", "bob"), ("cpu", "10")]),
            TestRow::new(&[("name", "shared"), ("owner", "alice"), ("cpu", "2")]),
        ]
    }

    #[test]
    fn quick_filter_requires_all_terms_across_visible_columns() {
        let columns = columns();
        let state = GridViewState::default();
        let visible = visible_columns(&columns, &state);
        let row = TestRow::new(&[("name", "env-a"), ("owner", "Alice"), ("cpu", "9")]);

        assert!(quick_filter_matches(&row, &visible, ""));
        assert!(quick_filter_matches(&row, &visible, "alice"));
        assert!(quick_filter_matches(&row, &visible, "env alice"));
        assert!(!quick_filter_matches(&row, &visible, "env bob"));
    }

    #[test]
    fn quick_filter_ignores_hidden_columns() {
        let columns = columns();
        let mut state = GridViewState::default();
        toggle_column(&mut state, "owner");
        let visible = visible_columns(&columns, &state);
        let row = TestRow::new(&[("name", "env-a"), ("owner", "alice")]);

        assert!(!quick_filter_matches(&row, &visible, "alice"));
        assert!(quick_filter_matches(&row, &visible, "env-a"));
    }

    #[test]
    fn column_filters_are_conjunctive_and_case_insensitive() {
        let row = TestRow::new(&[("name", "env-a"), ("owner", "Alice")]);
        let filters = vec![
            FilterItem {
                field: "owner".to_string(),
                value: "ali".to_string(),
            },
            FilterItem {
                field: "name".to_string(),
                value: "ENV".to_string(),
            },
        ];
        assert!(column_filters_match(&row, &filters));

        let filters = vec![FilterItem {
            field: "owner".to_string(),
            value: "bob".to_string(),
        }];
        assert!(!column_filters_match(&row, &filters));
    }

    #[test]
    fn compare_values_is_numeric_aware() {
        assert_eq!(compare_values("9", "10"), Ordering::Less);
        assert_eq!(compare_values("2.5", "2.5"), Ordering::Equal);
        assert_eq!(compare_values("abc", "ABD"), Ordering::Less);
        // mixed values fall back to text comparison
        assert_eq!(compare_values("10", "env"), Ordering::Less);
    }

    #[test]
    fn toggle_sort_cycles_asc_desc_none() {
        let mut state = GridViewState::default();
        toggle_sort(&mut state, "name");
        assert_eq!(
            state.sort,
            Some(SortModel {
                field: "name".to_string(),
                order: SortOrder::Asc
            })
        );
        toggle_sort(&mut state, "name");
        assert_eq!(state.sort.as_ref().unwrap().order, SortOrder::Desc);
        toggle_sort(&mut state, "name");
        assert_eq!(state.sort, None);

        toggle_sort(&mut state, "name");
        toggle_sort(&mut state, "owner");
        assert_eq!(state.sort.as_ref().unwrap().field, "owner");
        assert_eq!(state.sort.as_ref().unwrap().order, SortOrder::Asc);
    }

    #[test]
    fn apply_view_filters_then_sorts() {
        let columns = columns();
        let mut state = GridViewState::default();
        set_filter(&mut state, "owner", "alice");
        toggle_sort(&mut state, "cpu");

        let result = apply_view(&rows(), &columns, &state);
        let names: Vec<String> = result.iter().map(|row| row.field("name")).collect();
        assert_eq!(names, vec!["shared", "env-a"]);

        toggle_sort(&mut state, "cpu");
        let result = apply_view(&rows(), &columns, &state);
        let names: Vec<String> = result.iter().map(|row| row.field("name")).collect();
        assert_eq!(names, vec!["env-a", "shared"]);
    }

    #[test]
    fn set_filter_replaces_and_clears() {
        let mut state = GridViewState::default();
        set_filter(&mut state, "owner", "alice");
        set_filter(&mut state, "owner", "bob");
        assert_eq!(state.filters.len(), 1);
        assert_eq!(filter_value(&state, "owner"), "bob");

        set_filter(&mut state, "owner", "");
        assert!(state.filters.is_empty());
    }

    #[test]
    fn column_visibility_and_width_overrides() {
        let columns = columns();
        let mut state = GridViewState::default();
        assert_eq!(visible_columns(&columns, &state).len(), 3);

        toggle_column(&mut state, "owner");
        assert!(!is_column_visible(&state, "owner"));
        assert_eq!(visible_columns(&columns, &state).len(), 2);
        toggle_column(&mut state, "owner");
        assert!(is_column_visible(&state, "owner"));

        assert_eq!(column_width(&state, &columns[0]), 150);
        state.column_widths.insert("name".to_string(), 220);
        assert_eq!(column_width(&state, &columns[0]), 220);
    }

    #[test]
    fn paging_clamps_and_slices() {
        assert_eq!(page_count(0, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);

        let rows: Vec<usize> = (0..45).collect();
        assert_eq!(paged_rows(&rows, 0, 20).len(), 20);
        assert_eq!(paged_rows(&rows, 2, 20), (40..45).collect::<Vec<_>>());
        // out-of-range page clamps to the last page
        assert_eq!(paged_rows(&rows, 9, 20), (40..45).collect::<Vec<_>>());
        assert_eq!(clamp_page(9, 45, 20), 2);
    }

    #[test]
    fn view_state_round_trips_without_transient_fields() {
        let mut state = GridViewState::default();
        toggle_column(&mut state, "owner");
        state.column_widths.insert("name".to_string(), 200);
        toggle_sort(&mut state, "name");
        set_filter(&mut state, "owner", "alice");
        state.quick_filter = "env".to_string();
        state.page = 2;
        state.page_size = 50;

        let raw = serde_json::to_string(&state).unwrap();
        assert!(!raw.contains("selection"));
        assert!(!raw.contains("focus"));
        let restored: GridViewState = serde_json::from_str(&raw).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn view_state_defaults_apply_to_partial_json() {
        let restored: GridViewState =
            serde_json::from_str(r#"{"hidden_columns": ["owner"]}"#).unwrap();
        assert_eq!(restored.hidden_columns, vec!["owner"]);
        assert_eq!(restored.page_size, 20);
        assert_eq!(restored.page, 0);
        assert!(restored.sort.is_none());
    }
}

use contracts::shared::list_query::PageWindow;
use contracts::shared::ui_config::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use leptos::prelude::*;

use crate::shared::icons::icon;

/// First/previous/next/last buttons plus a page size select.
///
/// `window` is the clamped paging of the current (filtered) list; pages are
/// 0-indexed.
#[component]
pub fn PaginationControls(
    #[prop(into)] window: Signal<PageWindow>,
    #[prop(into)] total_count: Signal<usize>,
    #[prop(into)] page_size: Signal<usize>,
    on_page_change: Callback<usize>,
    on_page_size_change: Callback<usize>,
    #[prop(optional)] page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let options = page_size_options.unwrap_or_else(|| PAGE_SIZE_OPTIONS.to_vec());
    let page = move || window.get().page;
    let is_last = move || {
        let w = window.get();
        w.page + 1 >= w.total_pages
    };

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=move || page() == 0
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(page().saturating_sub(1))
                disabled=move || page() == 0
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    let w = window.get();
                    format!("{} / {} ({})", w.page + 1, w.total_pages, total_count.get())
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if !is_last() {
                        on_page_change.run(page() + 1);
                    }
                }
                disabled=is_last
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(window.get_untracked().total_pages.saturating_sub(1))
                disabled=is_last
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                prop:value=move || page_size.get().to_string()
                on:change=move |ev| {
                    let size = event_target_value(&ev).parse().unwrap_or(DEFAULT_PAGE_SIZE);
                    on_page_size_change.run(size);
                }
            >
                {options
                    .into_iter()
                    .map(|size| view! {
                        <option value=size.to_string() selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

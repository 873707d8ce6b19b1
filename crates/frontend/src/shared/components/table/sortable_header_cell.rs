//! Clickable column header with a sort arrow.
//!
//! ```rust,ignore
//! <SortableHeaderCell
//!     label="Hire date"
//!     sort_field="hire_date"
//!     current_sort_field=Signal::derive(move || query.with(|q| q.sort_field.clone()))
//!     sort_ascending=Signal::derive(move || query.with(|q| q.sort_ascending))
//!     on_sort=Callback::new(move |field| toggle_sort(field))
//! />
//! ```

use leptos::prelude::*;
use thaw::*;

use crate::shared::list_utils::{sort_class, sort_indicator};

#[component]
pub fn SortableHeaderCell(
    #[prop(into)] label: String,
    sort_field: &'static str,
    #[prop(into)] current_sort_field: Signal<Option<String>>,
    #[prop(into)] sort_ascending: Signal<bool>,
    on_sort: Callback<&'static str>,
    #[prop(optional, default = 100.0)] min_width: f64,
    /// `"left"` or `"right"`
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let header_class = if align == "right" {
        "table__sortable-header table__sortable-header--right"
    } else {
        "table__sortable-header"
    };

    view! {
        <TableHeaderCell resizable=false min_width=min_width>
            <div
                class=header_class
                role="button"
                on:click=move |_| on_sort.run(sort_field)
            >
                {label}
                <span class=move || current_sort_field.with(|c| sort_class(c.as_deref(), sort_field))>
                    {move || {
                        current_sort_field.with(|c| sort_indicator(c.as_deref(), sort_field, sort_ascending.get()))
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}

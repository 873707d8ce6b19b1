use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

/// Row selection checkbox. Clicks do not reach the row.
#[component]
pub fn TableCellCheckbox(
    #[prop(into)] item_id: String,
    #[prop(into)] selected: Signal<HashSet<String>>,
    /// `(item_id, checked)`
    on_change: Callback<(String, bool)>,
) -> impl IntoView {
    let id = StoredValue::new(item_id);

    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                aria-label="Select row"
                prop:checked=move || id.with_value(|id| selected.with(|s| s.contains(id)))
                on:change=move |ev| on_change.run((id.get_value(), event_target_checked(&ev)))
            />
        </TableCell>
    }
}

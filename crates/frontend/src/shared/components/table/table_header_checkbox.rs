//! Select-all checkbox for a table header.
//!
//! ```rust,ignore
//! <TableHeaderCheckbox
//!     ids=Signal::derive(move || page_ids())
//!     selected=selected
//!     on_change=Callback::new(move |all: bool| select_page(all))
//! />
//! ```

use leptos::html;
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

fn checkbox_state(ids: &[String], selected: &HashSet<String>) -> CheckboxState {
    let count = ids.iter().filter(|id| selected.contains(*id)).count();
    if count == 0 {
        CheckboxState::Unchecked
    } else if count == ids.len() {
        CheckboxState::Checked
    } else {
        CheckboxState::Indeterminate
    }
}

/// Three-state checkbox over the ids of the visible rows. `on_change` gets
/// `true` for "select all", `false` for "clear".
#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)] ids: Signal<Vec<String>>,
    #[prop(into)] selected: Signal<HashSet<String>>,
    on_change: Callback<bool>,
) -> impl IntoView {
    let state = Signal::derive(move || ids.with(|ids| selected.with(|sel| checkbox_state(ids, sel))));
    let checkbox_ref = NodeRef::<html::Input>::new();

    // `indeterminate` is a DOM property only.
    Effect::new(move |_| {
        let indeterminate = state.get() == CheckboxState::Indeterminate;
        if let Some(input) = checkbox_ref.get() {
            input.set_indeterminate(indeterminate);
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                aria-label="Select all"
                prop:checked=move || state.get() == CheckboxState::Checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_checkbox_state() {
        let page = ids(&["a", "b"]);
        let none = HashSet::new();
        let one: HashSet<String> = ids(&["a", "z"]).into_iter().collect();
        let both: HashSet<String> = ids(&["a", "b"]).into_iter().collect();
        assert_eq!(checkbox_state(&page, &none), CheckboxState::Unchecked);
        assert_eq!(checkbox_state(&page, &one), CheckboxState::Indeterminate);
        assert_eq!(checkbox_state(&page, &both), CheckboxState::Checked);
        assert_eq!(checkbox_state(&[], &both), CheckboxState::Unchecked);
    }
}

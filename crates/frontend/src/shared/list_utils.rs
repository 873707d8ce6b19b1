//! Search and sort helpers shared by list screens.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Searches shorter than this are ignored by highlighting
const MIN_HIGHLIGHT_LEN: usize = 2;

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Wrap case-insensitive occurrences of `filter` in `<mark>`.
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let filter = filter.trim();
    if filter.chars().count() < MIN_HIGHLIGHT_LEN {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let filter_lower = filter.to_lowercase();
    let text_lower = text.to_lowercase();
    // Lowercasing can change byte lengths; fall back to plain text then.
    if text_lower.len() != text.len() || !text_lower.contains(&filter_lower) {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last = 0;
    while let Some(pos) = text_lower[last..].find(&filter_lower) {
        let start = last + pos;
        let end = start + filter_lower.len();
        if start > last {
            parts.push(view! { <span>{text[last..start].to_string()}</span> }.into_any());
        }
        parts.push(view! { <mark class="search-match">{text[start..end].to_string()}</mark> }.into_any());
        last = end;
    }
    if last < text.len() {
        parts.push(view! { <span>{text[last..].to_string()}</span> }.into_any());
    }

    view! { <span>{parts}</span> }.into_any()
}

/// Sort arrow for a column header
pub fn sort_indicator(current_field: Option<&str>, field: &str, ascending: bool) -> &'static str {
    match current_field {
        Some(current) if current == field => {
            if ascending {
                " ▲"
            } else {
                " ▼"
            }
        }
        _ => " ⇅",
    }
}

pub fn sort_class(current_field: Option<&str>, field: &str) -> &'static str {
    match current_field {
        Some(current) if current == field => "sort-indicator sort-indicator--active",
        _ => "sort-indicator",
    }
}

/// Search box with debounce and a clear button
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input = move |next: String| {
        set_input_value.set(next.clone());
        // Dropping the previous timeout cancels it.
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || on_change.run(next));
        pending.set_value(Some(timeout));
    };

    let clear = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input" class:search-input--active=move || !value.get().trim().is_empty()>
            <input
                type="search"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" title="Clear" on:click=clear>
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(sort_indicator(Some("name"), "name", true), " ▲");
        assert_eq!(sort_indicator(Some("name"), "name", false), " ▼");
        assert_eq!(sort_indicator(Some("code"), "name", true), " ⇅");
        assert_eq!(sort_indicator(None, "name", true), " ⇅");
    }

    #[test]
    fn test_sort_class() {
        assert_eq!(sort_class(Some("name"), "name"), "sort-indicator sort-indicator--active");
        assert_eq!(sort_class(None, "name"), "sort-indicator");
    }
}

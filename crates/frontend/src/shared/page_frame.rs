//! PageFrame: standard root wrapper for every page.
//!
//! Sets two metadata attributes on the root element:
//!   - `id`: `"{entity}--{category}"`, e.g. `"a002_employees--list"`
//!   - `data-page-category`: one of the `PAGE_CAT_*` constants

use super::page_standard::*;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    #[prop(into)] page_id: String,
    /// One of the `PAGE_CAT_*` constants from `page_standard`.
    category: &'static str,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(&page_id) {
        log::warn!("page id '{}' does not follow {{entity}}--{{category}}", page_id);
    }

    let base_class = match category {
        PAGE_CAT_SYSTEM => "page page--system",
        _ => "page",
    };
    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}

use leptos::prelude::*;

use crate::layout::registry::{render_page, use_active_page};

/// Renders the active page. A requested page the viewer cannot see falls
/// back to the first visible one.
#[component]
pub fn Center() -> impl IntoView {
    let active_key = use_active_page();

    view! {
        <div data-zone="center" class="app-content">
            {move || match active_key.get() {
                Some(key) => render_page(key),
                None => view! {
                    <div class="page__placeholder">
                        "Your account has no pages assigned. Ask an administrator for access."
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}

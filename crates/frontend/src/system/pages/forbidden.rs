use leptos::prelude::*;

use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;

/// Shown in place of a screen the viewer may not open.
#[component]
pub fn ForbiddenPage(#[prop(into)] required: String) -> impl IntoView {
    log::info!("access denied: missing '{}'", required);

    view! {
        <PageFrame page_id="forbidden--system" category=PAGE_CAT_SYSTEM>
            <div class="forbidden">
                <div class="forbidden__icon">{icon("lock")}</div>
                <h1 class="page__title">"Access denied"</h1>
                <p>"You do not have permission to view this page."</p>
                <p class="forbidden__detail">"Required permission: " <code>{required}</code></p>
            </div>
        </PageFrame>
    }
}

use contracts::shared::navigation::visible_items;
use leptos::prelude::*;

use crate::layout::global_context::use_app_context;
use crate::layout::registry::{nav_items, use_active_page};
use crate::shared::icons::icon;
use crate::system::auth::context::use_permissions;

/// Navigation list. Pages the viewer may not view are not listed.
#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let permissions = use_permissions();
    let items = StoredValue::new(nav_items());

    let active_key = use_active_page();

    let entries = move || {
        let visible: Vec<_> = permissions.with(|p| {
            items.with_value(|items| visible_items(items, p).into_iter().cloned().collect())
        });
        if visible.is_empty() {
            return view! {
                <div class="app-sidebar__empty">"No pages available"</div>
            }
            .into_any();
        }
        visible
            .into_iter()
            .map(|item| {
                let key = item.key;
                view! {
                    <div
                        class="app-sidebar__item"
                        class:app-sidebar__item--active=move || active_key.get() == Some(key)
                        role="link"
                        on:click=move |_| ctx.open_page(key)
                    >
                        <div class="app-sidebar__item-content">
                            {icon(item.icon)}
                            <span>{item.label}</span>
                        </div>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! { <nav class="app-sidebar__content">{entries}</nav> }
}

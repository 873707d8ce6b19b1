//! Application top bar: sidebar toggle, title, current user and logout.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_app_context();
    let (auth_state, set_auth_state) = use_auth();

    let logout = move |_| {
        spawn_local(async move {
            do_logout(set_auth_state).await;
        });
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                    aria-label="Toggle navigation"
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"HR Admin"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("users")}
                    <span>
                        {move || auth_state.with(|s| {
                            s.user_info
                                .as_ref()
                                .map(|u| u.display_name().to_string())
                                .unwrap_or_default()
                        })}
                    </span>
                </div>
                <button class="top-header__icon-btn" on:click=logout title="Sign out" aria-label="Sign out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}

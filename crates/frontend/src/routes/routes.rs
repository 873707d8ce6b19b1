use leptos::prelude::*;

use crate::layout::global_context::use_app_context;
use crate::layout::Shell;
use crate::system::auth::guard::RequireAuth;

#[component]
fn MainLayout() -> impl IntoView {
    // Runs once per sign-in.
    use_app_context().init_router_integration();

    view! { <Shell /> }
}

/// Login page for anonymous viewers, the shell otherwise.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <RequireAuth>
            <MainLayout />
        </RequireAuth>
    }
}

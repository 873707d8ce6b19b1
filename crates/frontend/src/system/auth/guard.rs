use leptos::prelude::*;

use super::context::use_auth;
use crate::system::pages::login::LoginPage;

/// Renders `children` for a signed-in viewer, the login page otherwise.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let children = StoredValue::new(children);

    let status = Memo::new(move |_| auth_state.with(|s| (s.restoring, s.is_signed_in())));

    move || {
        let (restoring, signed_in) = status.get();
        if restoring {
            view! { <div class="app-loading">"Loading..."</div> }.into_any()
        } else if signed_in {
            children.with_value(|c| c()).into_any()
        } else {
            view! { <LoginPage /> }.into_any()
        }
    }
}

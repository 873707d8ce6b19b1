use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;

/// Shown instead of the table when a list has no rows. The call to action is
/// only rendered when the viewer may actually add records.
#[component]
pub fn EmptyState(
    message: String,
    /// `(label, on_click)` of the add action, if permitted
    #[prop(default = None)]
    add_action: Option<(String, Callback<()>)>,
) -> impl IntoView {
    view! {
        <div class="empty-state">
            <div class="empty-state__icon">{icon("inbox")}</div>
            <p class="empty-state__message">{message}</p>
            {add_action.map(|(label, on_add)| view! {
                <Button appearance=ButtonAppearance::Primary on_click=move |_| on_add.run(())>
                    {icon("plus")}
                    {format!(" {}", label)}
                </Button>
            })}
        </div>
    }
}

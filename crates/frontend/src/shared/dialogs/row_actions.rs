use contracts::shared::actions::ActionSpec;
use contracts::shared::dialog::DialogKind;
use leptos::prelude::*;
use thaw::*;

use super::primary_buttons::button_plans;
use super::provider::use_dialogs;
use crate::shared::icons::icon;

/// Per-row action menu. Choosing an item binds the row and opens its dialog
/// in one step. Renders nothing when no action is allowed for the viewer.
#[component]
pub fn RowActionsMenu<K, R>(row: R, actions: Vec<ActionSpec<K>>) -> impl IntoView
where
    K: DialogKind,
    R: Clone + Send + Sync + 'static,
{
    let Some(plans) = button_plans(actions) else {
        return None;
    };
    let dialogs = use_dialogs::<K, R>();
    let row = StoredValue::new(row);

    let items = plans
        .into_iter()
        .map(|plan| {
            let kind = plan.kind;
            let title = plan.label.clone();
            let aria = plan.label;
            view! {
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| {
                        dialogs.open_for_row(kind, row.get_value());
                    }
                    attr:title=title
                    attr:aria-label=aria
                >
                    {icon(plan.icon)}
                </Button>
            }
        })
        .collect_view();

    Some(view! {
        <div class="row-actions" role="menu" on:click=|ev| ev.stop_propagation()>
            {items}
        </div>
    })
}

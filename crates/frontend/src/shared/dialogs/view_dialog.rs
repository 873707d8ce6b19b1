use contracts::shared::forms::FormModel;
use leptos::prelude::*;
use thaw::*;

use crate::shared::modal_frame::ModalFrame;

/// Read-only listing of one record.
#[component]
pub fn ViewDialog<T>(
    row: T,
    #[prop(into)] closing: Signal<bool>,
    on_close: Callback<()>,
    on_exited: Callback<()>,
) -> impl IntoView
where
    T: FormModel,
{
    let title = format!("{}: {}", T::element_name(), row.title());
    let pairs = row.display_pairs();

    view! {
        <ModalFrame title=title on_close=on_close closing=closing on_exited=on_exited>
            <div class="modal-body">
                <dl class="details-list">
                    {pairs
                        .into_iter()
                        .map(|(label, value)| view! {
                            <dt class="details-list__label">{label}</dt>
                            <dd class="details-list__value">{value}</dd>
                        })
                        .collect_view()}
                </dl>
            </div>
            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Close"
                </Button>
            </div>
        </ModalFrame>
    }
}

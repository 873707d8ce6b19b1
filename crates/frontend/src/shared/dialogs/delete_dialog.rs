use contracts::domain::common::AdminEntity;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::crud_api;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notifications::use_notifications;

/// Confirmation before deleting one record.
#[component]
pub fn DeleteDialog<T>(
    row: T,
    #[prop(into)] closing: Signal<bool>,
    on_close: Callback<()>,
    on_exited: Callback<()>,
    on_deleted: Callback<()>,
) -> impl IntoView
where
    T: AdminEntity,
{
    let notifications = use_notifications();
    let (deleting, set_deleting) = signal(false);
    let busy = Signal::derive(move || deleting.get() || closing.get());

    let id = StoredValue::new(row.id().to_string());
    let name = row.title();
    let title = format!("Delete {}", T::element_name());
    let name_for_notice = StoredValue::new(name.clone());

    let confirm = move |_| {
        if busy.get_untracked() {
            return;
        }
        set_deleting.set(true);
        spawn_local(async move {
            let result = crud_api::delete(T::resource(), &id.get_value()).await;
            set_deleting.set(false);
            match result {
                Ok(()) => {
                    notifications.success(format!(
                        "{} deleted: {}",
                        T::element_name(),
                        name_for_notice.get_value()
                    ));
                    on_deleted.run(());
                }
                Err(e) => {
                    notifications.error(e);
                }
            }
        });
    };

    view! {
        <ModalFrame title=title on_close=on_close closing=closing on_exited=on_exited>
            <div class="modal-body">
                <p>
                    "Delete " <strong>{name}</strong> "? This cannot be undone."
                </p>
            </div>
            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_close.run(())
                    disabled=busy
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    class="button--danger"
                    on_click=confirm
                    disabled=busy
                >
                    {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                </Button>
            </div>
        </ModalFrame>
    }
}

use contracts::shared::export::{ExportDelivery, ExportFormat, ExportRequest};
use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::crud_api::{self, ExportOutcome};
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notifications::use_notifications;

/// Export either the selected rows or, with nothing selected, everything the
/// current filters match.
#[component]
pub fn ExportDialog(
    resource: &'static str,
    list_name: &'static str,
    #[prop(into)] closing: Signal<bool>,
    on_close: Callback<()>,
    on_exited: Callback<()>,
    selected_ids: Vec<String>,
    filters: ListQuery,
) -> impl IntoView {
    let notifications = use_notifications();
    let selected_count = selected_ids.len();
    let selected_ids = StoredValue::new(selected_ids);
    let filters = StoredValue::new(filters);

    let (format, set_format) = signal(ExportFormat::Csv);
    let (by_email, set_by_email) = signal(false);
    let (recipient, set_recipient) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (exporting, set_exporting) = signal(false);
    let busy = Signal::derive(move || exporting.get() || closing.get());

    let scope_label = if selected_count == 0 {
        "All rows matching the current filters".to_string()
    } else {
        format!("{} selected row(s)", selected_count)
    };

    let submit = move |_| {
        if busy.get_untracked() {
            return;
        }
        let delivery = if by_email.get_untracked() {
            ExportDelivery::Email {
                recipient: recipient.get_untracked().trim().to_string(),
            }
        } else {
            ExportDelivery::Download
        };
        let request = ExportRequest::new(
            Some(selected_ids.get_value()),
            filters.get_value(),
            format.get_untracked(),
            delivery,
        );
        if let Err(e) = request.validate() {
            set_error.set(Some(e));
            return;
        }

        set_error.set(None);
        set_exporting.set(true);
        spawn_local(async move {
            let result = crud_api::export(resource, &request).await;
            set_exporting.set(false);
            match result {
                Ok(ExportOutcome::Downloaded { file_name }) => {
                    notifications.success(format!("Exported {}", file_name));
                    on_close.run(());
                }
                Ok(ExportOutcome::Emailed(receipt)) => {
                    notifications.success(format!("Export will be sent to {}", receipt.recipient));
                    on_close.run(());
                }
                Err(e) => {
                    notifications.error(e.clone());
                    set_error.set(Some(e));
                }
            }
        });
    };

    view! {
        <ModalFrame
            title=format!("Export {}", list_name)
            on_close=on_close
            closing=closing
            on_exited=on_exited
        >
            <div class="modal-body">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                <p class="export__scope">{scope_label}</p>

                <div class="form__group">
                    <label for="export-format">"Format"</label>
                    <select
                        id="export-format"
                        prop:value=move || format.get().as_str()
                        on:change=move |ev| {
                            if let Some(f) = ExportFormat::parse(&event_target_value(&ev)) {
                                set_format.set(f);
                            }
                        }
                        disabled=move || busy.get()
                    >
                        <option value="csv">"CSV"</option>
                        <option value="xlsx">"Excel (.xlsx)"</option>
                    </select>
                </div>

                <div class="form__group">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || by_email.get()
                            on:change=move |ev| set_by_email.set(event_target_checked(&ev))
                            disabled=move || busy.get()
                        />
                        " Send by e-mail instead of downloading"
                    </label>
                </div>

                <Show when=move || by_email.get()>
                    <div class="form__group">
                        <label for="export-recipient">"Recipient"</label>
                        <input
                            id="export-recipient"
                            type="email"
                            prop:value=move || recipient.get()
                            on:input=move |ev| set_recipient.set(event_target_value(&ev))
                            disabled=move || busy.get()
                        />
                    </div>
                </Show>
            </div>
            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_close.run(())
                    disabled=busy
                >
                    "Cancel"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=submit disabled=busy>
                    {move || if exporting.get() { "Exporting..." } else { "Export" }}
                </Button>
            </div>
        </ModalFrame>
    }
}

use contracts::shared::import::{FileMeta, ImportConstraints, ImportReport, ImportViolation};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use web_sys::File;

use crate::shared::crud_api;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notifications::use_notifications;

fn picked_files(input: &web_sys::HtmlInputElement) -> Vec<File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

fn file_meta(file: &File) -> FileMeta {
    FileMeta::new(file.name(), file.size() as u64, file.type_())
}

/// Spreadsheet upload. Files are checked against `constraints` before
/// anything is sent; a rejected file never reaches the network.
#[component]
pub fn ImportDialog(
    /// API collection, e.g. `"employees"`
    resource: &'static str,
    list_name: &'static str,
    #[prop(into)] closing: Signal<bool>,
    on_close: Callback<()>,
    on_exited: Callback<()>,
    on_imported: Callback<()>,
    #[prop(optional)] constraints: Option<ImportConstraints>,
) -> impl IntoView {
    let notifications = use_notifications();
    let constraints = StoredValue::new(constraints.unwrap_or_else(ImportConstraints::spreadsheet));
    let accept = constraints.with_value(|c| c.accept_attr());
    let max_mb = constraints.with_value(|c| c.max_size_bytes) as f64 / (1024.0 * 1024.0);

    let input_ref = NodeRef::<html::Input>::new();
    let picked = RwSignal::new(Vec::<FileMeta>::new());
    let violations = RwSignal::new(Vec::<ImportViolation>::new());
    let report = RwSignal::new(None::<ImportReport>);
    let (uploading, set_uploading) = signal(false);
    let busy = Signal::derive(move || uploading.get() || closing.get());

    let on_pick = move |_| {
        let Some(input) = input_ref.get_untracked() else {
            return;
        };
        let metas: Vec<FileMeta> = picked_files(&input).iter().map(file_meta).collect();
        let checked = constraints.with_value(|c| c.validate(&metas));
        violations.set(checked.err().unwrap_or_default());
        picked.set(metas);
        report.set(None);
    };

    let submit = move |_| {
        if busy.get_untracked() {
            return;
        }
        let Some(input) = input_ref.get_untracked() else {
            return;
        };
        let files = picked_files(&input);
        let metas: Vec<FileMeta> = files.iter().map(file_meta).collect();
        if let Err(errs) = constraints.with_value(|c| c.validate(&metas)) {
            log::info!(
                "import of {} rejected before upload: {} violation(s)",
                resource,
                errs.len()
            );
            violations.set(errs);
            return;
        }
        let Some(file) = files.into_iter().next() else {
            violations.set(vec![ImportViolation::NoFile]);
            return;
        };

        violations.set(Vec::new());
        set_uploading.set(true);
        spawn_local(async move {
            let result = crud_api::import(resource, file).await;
            set_uploading.set(false);
            match result {
                Ok(r) => {
                    if r.is_clean() {
                        notifications.success(r.summary());
                    } else {
                        notifications.info(r.summary());
                    }
                    report.set(Some(r));
                    on_imported.run(());
                }
                Err(e) => {
                    notifications.error(e);
                }
            }
        });
    };

    let field_messages = move |field: &'static str| {
        violations.with(|all| {
            all.iter()
                .filter(|v| v.field() == field)
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
        })
    };

    view! {
        <ModalFrame
            title=format!("Import {}", list_name)
            on_close=on_close
            closing=closing
            on_exited=on_exited
        >
            <div class="modal-body">
                <div class="form__group" class:form__group--invalid=move || !violations.with(Vec::is_empty)>
                    <label for="import-file">
                        {format!("File ({}, up to {:.0} MB)", accept, max_mb)}
                    </label>
                    <input
                        id="import-file"
                        type="file"
                        accept=accept.clone()
                        node_ref=input_ref
                        on:change=on_pick
                        disabled=move || busy.get()
                    />
                    {move || {
                        ["files", "file"]
                            .into_iter()
                            .flat_map(field_messages)
                            .map(|m| view! { <div class="form__error">{m}</div> })
                            .collect_view()
                    }}
                </div>

                {move || picked.with(|p| p.first().cloned()).map(|meta| view! {
                    <div class="import__picked">
                        {format!("{} ({} bytes)", meta.name, meta.size_bytes)}
                    </div>
                })}

                {move || report.get().map(|r| view! { <ImportReportView report=r /> })}
            </div>
            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_close.run(())
                    disabled=Signal::derive(move || uploading.get())
                >
                    {move || if report.with(Option::is_some) { "Done" } else { "Cancel" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=submit
                    disabled=Signal::derive(move || busy.get() || picked.with(Vec::is_empty))
                >
                    {move || if uploading.get() { "Uploading..." } else { "Import" }}
                </Button>
            </div>
        </ModalFrame>
    }
}

#[component]
fn ImportReportView(report: ImportReport) -> impl IntoView {
    let summary = report.summary();
    let failed = report.failed;

    view! {
        <div class="import__report">
            <Badge>{summary}</Badge>
            {(!failed.is_empty()).then(|| view! {
                <ul class="import__failures">
                    {failed
                        .into_iter()
                        .map(|f| view! { <li>{format!("Row {}: {}", f.row, f.message)}</li> })
                        .collect_view()}
                </ul>
            })}
        </div>
    }
}

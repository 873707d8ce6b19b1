use std::collections::HashSet;
use std::marker::PhantomData;

use contracts::shared::actions::ActionSpec;
use contracts::shared::dialog::{mounted_dialog, CrudDialog};
use contracts::shared::forms::FormModel;
use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;

use crate::shared::dialogs::{
    use_dialogs, DeleteDialog, EntityFormDialog, ExportDialog, ImportDialog, ViewDialog,
};
use crate::system::auth::context::use_permissions;

/// Mounts the dialog of the current state, if the viewer may still open it.
///
/// The mounted dialog is keyed by kind and row id, so the same dialog stays
/// mounted while it plays its exit transition and only `closing` flips.
#[component]
pub fn DialogSwitch<T>(
    gates: Vec<ActionSpec<CrudDialog>>,
    selected: RwSignal<HashSet<String>>,
    query: RwSignal<ListQuery>,
    /// Data changed on the server; reload the list
    on_changed: Callback<()>,
    #[prop(optional)] _entity: PhantomData<T>,
) -> impl IntoView
where
    T: FormModel,
{
    let dialogs = use_dialogs::<CrudDialog, T>();
    let permissions = use_permissions();
    let gates = StoredValue::new(gates);

    let mounted_key = Memo::new(move |_| {
        let perms = permissions.get();
        dialogs.with(|state| {
            gates.with_value(|g| {
                mounted_dialog(state, &perms, g).map(|m| (m.kind, m.row.map(|r| r.id().to_string())))
            })
        })
    });
    let closing = Memo::new(move |_| {
        let perms = permissions.get();
        dialogs.with(|state| {
            gates.with_value(|g| mounted_dialog(state, &perms, g).is_some_and(|m| m.closing))
        })
    });

    let on_close = Callback::new(move |_: ()| dialogs.close());
    let on_exited = Callback::new(move |_: ()| dialogs.finish_exit());
    let close_and_reload = Callback::new(move |_: ()| {
        dialogs.close();
        on_changed.run(());
    });

    move || {
        let (kind, _) = mounted_key.get()?;
        let row = untrack(|| dialogs.current_row());
        let closing = Signal::from(closing);

        let view = match (kind, row) {
            (CrudDialog::Add, _) => view! {
                <EntityFormDialog<T>
                    row=None
                    closing=closing
                    on_close=on_close
                    on_exited=on_exited
                    on_saved=close_and_reload
                />
            }
            .into_any(),
            (CrudDialog::Edit, Some(row)) => view! {
                <EntityFormDialog<T>
                    row=Some(row)
                    closing=closing
                    on_close=on_close
                    on_exited=on_exited
                    on_saved=close_and_reload
                />
            }
            .into_any(),
            (CrudDialog::View, Some(row)) => view! {
                <ViewDialog<T> row=row closing=closing on_close=on_close on_exited=on_exited />
            }
            .into_any(),
            (CrudDialog::Delete, Some(row)) => view! {
                <DeleteDialog<T>
                    row=row
                    closing=closing
                    on_close=on_close
                    on_exited=on_exited
                    on_deleted=close_and_reload
                />
            }
            .into_any(),
            (CrudDialog::Import, _) => view! {
                <ImportDialog
                    resource=T::resource()
                    list_name=T::list_name()
                    closing=closing
                    on_close=on_close
                    on_exited=on_exited
                    on_imported=on_changed
                />
            }
            .into_any(),
            (CrudDialog::Export, _) => {
                let mut selected_ids: Vec<String> =
                    selected.with_untracked(|s| s.iter().cloned().collect());
                selected_ids.sort();
                let filters = query.get_untracked();
                view! {
                    <ExportDialog
                        resource=T::resource()
                        list_name=T::list_name()
                        closing=closing
                        on_close=on_close
                        on_exited=on_exited
                        selected_ids=selected_ids
                        filters=filters
                    />
                }
                .into_any()
            }
            // A row-scoped kind lost its row; render nothing.
            (_, None) => return None,
        };
        Some(view)
    }
}

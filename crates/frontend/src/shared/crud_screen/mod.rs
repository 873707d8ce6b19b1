//! Generic list screen of one `FormModel` entity: header with the permitted
//! primary buttons, search, selectable table with a row menu, empty state and
//! the dialog switch.

mod dialog_switch;

use std::collections::HashSet;
use std::marker::PhantomData;

use contracts::shared::actions::allows_kind;
use contracts::shared::dialog::CrudDialog;
use contracts::shared::forms::FormModel;
use contracts::shared::list_query::ListQuery;
use contracts::shared::screen::{list_slice, ColumnKind, ScreenAccess, ScreenSpec};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::crud_api;
use crate::shared::dialogs::{provide_dialogs, EmptyState, PrimaryButtons, RowActionsMenu};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_permissions;
use crate::system::pages::forbidden::ForbiddenPage;
use dialog_switch::DialogSwitch;

/// What the table area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyState {
    Loading,
    /// First load failed; the error is shown above with a retry button
    Failed,
    Empty,
    Rows,
}

fn body_state(loaded: bool, failed: bool, total_count: usize) -> BodyState {
    match (loaded, failed) {
        (false, true) => BodyState::Failed,
        (false, false) => BodyState::Loading,
        _ if total_count == 0 => BodyState::Empty,
        _ => BodyState::Rows,
    }
}

/// Screen entry point. Viewers without the view permission get the
/// forbidden page instead of the table.
#[component]
pub fn CrudScreen<T>(
    spec: ScreenSpec,
    /// Ties the screen to its entity type
    #[prop(optional)]
    _entity: PhantomData<T>,
) -> impl IntoView
where
    T: FormModel,
{
    let permissions = use_permissions();
    let spec = StoredValue::new(spec);
    let access = Memo::new(move |_| spec.with_value(|s| permissions.with(|p| s.access(p))));

    move || match access.get() {
        ScreenAccess::Granted => view! { <CrudScreenBody<T> spec=spec.get_value() /> }.into_any(),
        ScreenAccess::Forbidden { required } => {
            view! { <ForbiddenPage required=required /> }.into_any()
        }
    }
}

#[component]
fn CrudScreenBody<T>(spec: ScreenSpec, #[prop(optional)] _entity: PhantomData<T>) -> impl IntoView
where
    T: FormModel,
{
    let dialogs = provide_dialogs::<CrudDialog, T>();
    let notifications = use_notifications();
    let permissions = use_permissions();

    let page_id = spec.page_id.clone();
    let title = spec.title;
    let spec = StoredValue::new(spec);
    let columns = StoredValue::new(T::columns());

    let all_rows = RwSignal::new(Vec::<T>::new());
    let query = RwSignal::new(ListQuery::default());
    let selected = RwSignal::new(HashSet::<String>::new());
    let (loading, set_loading) = signal(false);
    let (loaded, set_loaded) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let slice = Signal::derive(move || all_rows.with(|rows| query.with(|q| list_slice(rows, q))));
    let page_ids = Signal::derive(move || {
        slice.with(|s| s.rows.iter().map(|r| r.id().to_string()).collect::<Vec<_>>())
    });

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        let q = query.get_untracked();
        spawn_local(async move {
            match crud_api::list::<T>(T::resource(), &q).await {
                Ok(rows) => {
                    // Selection only keeps rows that still exist.
                    selected.update(|sel| sel.retain(|id| rows.iter().any(|r| r.id() == id)));
                    all_rows.set(rows);
                    set_loaded.set(true);
                }
                Err(e) => {
                    notifications.error(e.clone());
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !loaded.get_untracked() {
            load_data();
        }
    });

    // ========================================================================
    // Actions
    // ========================================================================

    let primary_actions =
        Signal::derive(move || spec.with_value(|s| permissions.with(|p| s.primary_actions(p))));
    let row_actions = Memo::new(move |_| spec.with_value(|s| permissions.with(|p| s.row_actions(p))));
    let can_add = Signal::derive(move || {
        spec.with_value(|s| permissions.with(|p| allows_kind(p, &s.primary, CrudDialog::Add)))
    });

    let open_dialog = Callback::new(move |kind: CrudDialog| {
        dialogs.set_open(kind);
    });

    // ========================================================================
    // Search, sort, paging, selection
    // ========================================================================

    let search = Signal::derive(move || query.with(|q| q.search.clone()));
    let apply_search = Callback::new(move |text: String| {
        query.update(|q| {
            q.search = text;
            q.page = 0;
        });
        load_data();
    });

    let toggle_sort = Callback::new(move |field: &'static str| {
        query.update(|q| q.toggle_sort(field));
        load_data();
    });

    let go_to_page = Callback::new(move |page: usize| query.update(|q| q.page = page));
    let change_page_size = Callback::new(move |size: usize| {
        query.update(|q| {
            q.page_size = size;
            q.page = 0;
        });
    });

    let toggle_selection = Callback::new(move |(id, checked): (String, bool)| {
        selected.update(|s| {
            if checked {
                s.insert(id);
            } else {
                s.remove(&id);
            }
        });
    });
    let toggle_page = Callback::new(move |check_all: bool| {
        let ids = page_ids.get_untracked();
        selected.update(|s| {
            if check_all {
                s.extend(ids);
            } else {
                for id in &ids {
                    s.remove(id);
                }
            }
        });
    });
    let selected_signal = Signal::derive(move || selected.get());

    // ========================================================================
    // Table parts
    // ========================================================================

    let header_cells = move || {
        columns
            .get_value()
            .into_iter()
            .map(|col| {
                let align = if col.kind == ColumnKind::Number { "right" } else { "left" };
                view! {
                    <SortableHeaderCell
                        label=col.title
                        sort_field=col.field
                        current_sort_field=Signal::derive(move || query.with(|q| q.sort_field.clone()))
                        sort_ascending=Signal::derive(move || query.with(|q| q.sort_ascending))
                        on_sort=toggle_sort
                        align=align
                    />
                }
            })
            .collect_view()
    };

    let row_view = move |row: T| {
        let id = row.id().to_string();
        let needle = query.with_untracked(|q| q.search.clone());
        let cells = columns
            .get_value()
            .into_iter()
            .map(|col| {
                let text = (col.value)(&row);
                let content = match col.kind {
                    ColumnKind::Text => highlight_matches(&text, &needle),
                    ColumnKind::Number | ColumnKind::Date => view! { <span>{text}</span> }.into_any(),
                };
                let class = if col.kind == ColumnKind::Number { "table__cell--number" } else { "" };
                view! {
                    <TableCell class=class>
                        <TableCellLayout truncate=true>{content}</TableCellLayout>
                    </TableCell>
                }
            })
            .collect_view();

        view! {
            <TableRow>
                <TableCellCheckbox item_id=id selected=selected_signal on_change=toggle_selection />
                {cells}
                <TableCell class="table__cell--actions">
                    {move || view! { <RowActionsMenu<CrudDialog, T> row=row.clone() actions=row_actions.get() /> }}
                </TableCell>
            </TableRow>
        }
    };

    let empty_message = move || {
        if query.with(|q| q.search.trim().is_empty()) {
            format!("No {} yet.", title.to_lowercase())
        } else {
            format!("No {} match the search.", title.to_lowercase())
        }
    };

    let body = move || {
        let state = body_state(
            loaded.get(),
            error.with(Option::is_some),
            slice.with(|s| s.total_count),
        );
        if state == BodyState::Loading {
            return view! { <div class="page__loading">"Loading..."</div> }.into_any();
        }
        if state == BodyState::Failed {
            return view! {
                <div class="page__load-failed">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_data()>
                        "Retry"
                    </Button>
                </div>
            }
            .into_any();
        }
        if state == BodyState::Empty {
            let add_action = can_add.get().then(|| {
                let label = spec.with_value(|s| format!("Add {}", s.element));
                (label, Callback::new(move |_: ()| open_dialog.run(CrudDialog::Add)))
            });
            return view! { <EmptyState message=empty_message() add_action=add_action /> }.into_any();
        }

        view! {
            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox ids=page_ids selected=selected_signal on_change=toggle_page />
                            {header_cells()}
                            <TableHeaderCell resizable=false class="table__cell--actions"></TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || slice.get().rows
                            key=|row: &T| row.id().to_string()
                            children=row_view
                        />
                    </TableBody>
                </Table>
            </div>
        }
        .into_any()
    };

    view! {
        <PageFrame page_id=page_id category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{title}</h1>
                    <Badge>{move || slice.with(|s| s.total_count.to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <PrimaryButtons actions=primary_actions on_open=open_dialog />
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                        attr:title="Refresh"
                        attr:aria-label="Refresh"
                    >
                        {icon("refresh")}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            <SearchInput value=search on_change=apply_search />
                        </div>
                        <div class="filter-panel-header__center">
                            <PaginationControls
                                window=Signal::derive(move || slice.with(|s| s.window))
                                total_count=Signal::derive(move || slice.with(|s| s.total_count))
                                page_size=Signal::derive(move || query.with(|q| q.page_size))
                                on_page_change=go_to_page
                                on_page_size_change=change_page_size
                            />
                        </div>
                        <div class="filter-panel-header__right">
                            <Show when=move || selected.with(|s| !s.is_empty())>
                                <span class="selection-info">
                                    {move || format!("{} selected", selected.with(HashSet::len))}
                                </span>
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    size=ButtonSize::Small
                                    on_click=move |_| selected.set(HashSet::new())
                                >
                                    "Clear"
                                </Button>
                            </Show>
                        </div>
                    </div>
                </div>

                {body}
            </div>

            <DialogSwitch<T>
                gates=spec.with_value(|s| s.gates())
                selected=selected
                query=query
                on_changed=Callback::new(move |_: ()| load_data())
            />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_first_load_is_not_stuck_loading() {
        assert_eq!(body_state(false, false, 0), BodyState::Loading);
        assert_eq!(body_state(false, true, 0), BodyState::Failed);
    }

    #[test]
    fn test_loaded_rows_survive_a_failed_reload() {
        assert_eq!(body_state(true, true, 3), BodyState::Rows);
        assert_eq!(body_state(true, false, 0), BodyState::Empty);
    }
}

//! Reactive wrapper around `DialogState`, shared through context by every
//! component of one CRUD screen.

use contracts::shared::dialog::{CloseTicket, DialogKind, DialogState};
use contracts::shared::ui_config::EXIT_TRANSITION_MS;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub struct DialogContext<K: 'static, R: 'static> {
    state: RwSignal<DialogState<K, R>>,
}

impl<K, R> Clone for DialogContext<K, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, R> Copy for DialogContext<K, R> {}

impl<K, R> DialogContext<K, R>
where
    K: DialogKind,
    R: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(DialogState::new()),
        }
    }

    /// Reactive read access to the whole state
    pub fn with<T>(&self, f: impl FnOnce(&DialogState<K, R>) -> T) -> T {
        self.state.with(f)
    }

    pub fn open_kind(&self) -> Option<K> {
        self.state.with(|s| s.open_kind())
    }

    pub fn current_row(&self) -> Option<R> {
        self.state.with(|s| s.current_row().cloned())
    }

    /// Open a kind that does not need a row (or reuses the selected one).
    ///
    /// Re-opening the kind that is already open does not notify dependents.
    pub fn set_open(&self, kind: K) -> bool {
        let mut changed = false;
        self.state.maybe_update(|s| {
            changed = s.set_open(Some(kind));
            changed
        });
        if changed {
            log::debug!("dialog opened: {:?}", kind);
        } else if kind.is_row_scoped() && self.state.with_untracked(|s| s.current_row().is_none()) {
            log::debug!("dialog {:?} not opened: no row selected", kind);
        }
        changed
    }

    /// Bind `row` and open `kind` in one update.
    pub fn open_for_row(&self, kind: K, row: R) -> bool {
        let mut changed = false;
        self.state.maybe_update(|s| {
            changed = s.open_for_row(kind, row);
            changed
        });
        if changed {
            log::debug!("dialog opened for row: {:?}", kind);
        }
        changed
    }

    pub fn set_current_row(&self, row: Option<R>) -> bool {
        let mut changed = false;
        self.state.maybe_update(|s| {
            changed = s.set_current_row(row);
            changed
        });
        changed
    }

    /// Hide the dialog now and hand back the ticket of the retained row, if
    /// any. The row stays until `finish_close` gets that ticket.
    pub fn begin_close(&self) -> Option<CloseTicket> {
        let mut ticket = None;
        self.state.maybe_update(|s| {
            let was_open = s.open_kind().is_some();
            ticket = s.close();
            was_open
        });
        ticket
    }

    /// Hide the dialog now; drop its row after the exit transition.
    pub fn close(&self) {
        let ticket = self.begin_close();
        log::debug!("dialog closed");

        if let Some(ticket) = ticket {
            let ctx = *self;
            spawn_local(async move {
                TimeoutFuture::new(EXIT_TRANSITION_MS).await;
                ctx.finish_close(ticket);
            });
        }
    }

    /// Drop the retained row if `ticket` is still current.
    pub fn finish_close(&self, ticket: CloseTicket) -> bool {
        let mut cleared = false;
        self.state.maybe_update(|s| {
            cleared = s.finish_close(ticket);
            cleared
        });
        cleared
    }

    /// Finish whatever close is currently in flight (exit animation ended).
    pub fn finish_exit(&self) {
        if let Some(ticket) = self.state.with_untracked(|s| s.exit_ticket()) {
            self.finish_close(ticket);
        }
    }
}

impl<K, R> Default for DialogContext<K, R>
where
    K: DialogKind,
    R: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Create the dialog state of a screen and provide it to its subtree.
pub fn provide_dialogs<K, R>() -> DialogContext<K, R>
where
    K: DialogKind,
    R: Clone + Send + Sync + 'static,
{
    let ctx = DialogContext::new();
    provide_context(ctx);
    ctx
}

/// Dialog state of the enclosing screen.
///
/// # Panics
/// When called outside a `provide_dialogs` subtree. That is a wiring bug,
/// not a runtime condition.
pub fn use_dialogs<K, R>() -> DialogContext<K, R>
where
    K: DialogKind,
    R: Clone + Send + Sync + 'static,
{
    use_context::<DialogContext<K, R>>().unwrap_or_else(|| {
        panic!(
            "use_dialogs::<{}, {}>() called outside of a dialog provider",
            std::any::type_name::<K>(),
            std::any::type_name::<R>()
        )
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use contracts::shared::dialog::CrudDialog;

    use super::*;

    type Ctx = DialogContext<CrudDialog, String>;

    fn row(id: &str) -> String {
        id.to_string()
    }

    #[test]
    fn test_reopening_same_kind_does_not_notify() {
        Owner::new().with(|| {
            let ctx = Ctx::new();
            let runs = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&runs);
            let open = Memo::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                ctx.open_kind()
            });

            assert_eq!(open.get(), None);
            assert!(ctx.set_open(CrudDialog::Add));
            assert_eq!(open.get(), Some(CrudDialog::Add));
            assert_eq!(runs.load(Ordering::SeqCst), 2);

            assert!(!ctx.set_open(CrudDialog::Add));
            assert_eq!(open.get(), Some(CrudDialog::Add));
            assert_eq!(runs.load(Ordering::SeqCst), 2);
        });
    }

    #[test]
    fn test_refused_row_dialog_does_not_notify() {
        Owner::new().with(|| {
            let ctx = Ctx::new();
            let runs = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&runs);
            let open = Memo::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                ctx.open_kind()
            });

            assert_eq!(open.get(), None);
            assert!(!ctx.set_open(CrudDialog::Edit));
            assert!(!ctx.set_current_row(None));
            assert_eq!(open.get(), None);
            assert_eq!(runs.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn test_close_hides_now_and_keeps_row_until_exit() {
        Owner::new().with(|| {
            let ctx = Ctx::new();
            assert!(ctx.open_for_row(CrudDialog::Edit, row("e1")));

            let ticket = ctx.begin_close();
            assert!(ticket.is_some());
            assert_eq!(ctx.open_kind(), None);
            assert_eq!(ctx.current_row(), Some(row("e1")));

            ctx.finish_exit();
            assert_eq!(ctx.current_row(), None);
        });
    }

    #[test]
    fn test_stale_ticket_keeps_newer_row() {
        Owner::new().with(|| {
            let ctx = Ctx::new();
            ctx.open_for_row(CrudDialog::Edit, row("e1"));
            let Some(stale) = ctx.begin_close() else {
                panic!("row dialog close must hand out a ticket");
            };

            ctx.open_for_row(CrudDialog::View, row("e2"));
            assert!(!ctx.finish_close(stale));
            assert_eq!(ctx.open_kind(), Some(CrudDialog::View));
            assert_eq!(ctx.current_row(), Some(row("e2")));
        });
    }

    #[test]
    fn test_closing_add_hands_out_no_ticket() {
        Owner::new().with(|| {
            let ctx = Ctx::new();
            ctx.set_open(CrudDialog::Add);
            assert_eq!(ctx.begin_close(), None);
            assert_eq!(ctx.open_kind(), None);
            assert_eq!(ctx.current_row(), None);
        });
    }
}

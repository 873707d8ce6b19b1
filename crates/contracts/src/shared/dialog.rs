//! Dialog state machine for CRUD screens.
//!
//! One `DialogState` per screen answers two questions: which dialog is
//! showing, and on which row. The state is a tagged union, so "a row-scoped
//! dialog is open without a row" is not representable through the public
//! operations.
//!
//! Closing is two-phase. `close()` hides the dialog immediately but keeps the
//! row in an exiting slot, so the dialog body does not blank out while it
//! animates away. `finish_close(ticket)` drops the row afterwards. Every
//! transition bumps a generation counter; a ticket from an older generation
//! is ignored, which makes a late `finish_close` harmless after the user has
//! already opened another row.

use std::fmt::Debug;

use super::actions::ActionSpec;
use super::permissions::PermissionSet;

/// A dialog tag. Features may define their own closed set of kinds.
pub trait DialogKind: Copy + Eq + Debug + Send + Sync + 'static {
    /// Row-scoped dialogs need a current row to mount.
    fn is_row_scoped(&self) -> bool;

    fn label(&self) -> &'static str;
}

/// Standard dialog kinds of a CRUD screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrudDialog {
    Add,
    Edit,
    Delete,
    Import,
    Export,
    View,
}

impl DialogKind for CrudDialog {
    fn is_row_scoped(&self) -> bool {
        matches!(self, Self::Edit | Self::Delete | Self::View)
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Import => "import",
            Self::Export => "export",
            Self::View => "view",
        }
    }
}

/// Proof of a particular close; only the latest one may clear the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseTicket(u64);

#[derive(Debug, Clone, PartialEq)]
enum Phase<K, R> {
    Closed,
    Open { kind: K, row: Option<R> },
    Exiting { kind: K, row: R, ticket: CloseTicket },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogState<K, R> {
    phase: Phase<K, R>,
    generation: u64,
    /// Selection made outside of any dialog (e.g. a highlighted row)
    selected: Option<R>,
}

impl<K: DialogKind, R: Clone> Default for DialogState<K, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: DialogKind, R: Clone> DialogState<K, R> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Closed,
            generation: 0,
            selected: None,
        }
    }

    /// Kind of the visible dialog, `None` while closed or exiting.
    pub fn open_kind(&self) -> Option<K> {
        match &self.phase {
            Phase::Open { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_open(&self, kind: K) -> bool {
        self.open_kind() == Some(kind)
    }

    /// Kind that is animating out, if any.
    pub fn exiting(&self) -> Option<K> {
        match &self.phase {
            Phase::Exiting { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Ticket of the close currently playing its exit transition.
    pub fn exit_ticket(&self) -> Option<CloseTicket> {
        match &self.phase {
            Phase::Exiting { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    /// The subject row. While exiting this is still the closed dialog's row.
    pub fn current_row(&self) -> Option<&R> {
        match &self.phase {
            Phase::Open { row: Some(row), .. } => Some(row),
            Phase::Exiting { row, .. } => Some(row),
            _ => self.selected.as_ref(),
        }
    }

    /// Set the active kind. Returns whether anything changed.
    ///
    /// Setting the current value again is a no-op. A row-scoped kind is only
    /// opened when a row is already selected; otherwise nothing happens.
    pub fn set_open(&mut self, kind: Option<K>) -> bool {
        match kind {
            None => {
                let was_open = self.open_kind().is_some();
                self.close();
                was_open
            }
            Some(kind) if self.open_kind() == Some(kind) => false,
            Some(kind) if kind.is_row_scoped() => match self.current_row().cloned() {
                Some(row) => self.transition(Phase::Open {
                    kind,
                    row: Some(row),
                }),
                None => false,
            },
            Some(kind) => self.transition(Phase::Open { kind, row: None }),
        }
    }

    /// Bind `row` and open `kind` in one step.
    pub fn open_for_row(&mut self, kind: K, row: R) -> bool {
        self.selected = Some(row.clone());
        let row = if kind.is_row_scoped() { Some(row) } else { None };
        self.transition(Phase::Open { kind, row })
    }

    /// Set or clear the selected row. Returns whether anything changed.
    ///
    /// While a row-scoped dialog is open the dialog keeps its own row; only
    /// clearing is refused there, since it would leave the dialog without a
    /// subject.
    pub fn set_current_row(&mut self, row: Option<R>) -> bool {
        let row_dialog_open =
            matches!(&self.phase, Phase::Open { kind, .. } if kind.is_row_scoped());

        match row {
            Some(new_row) => {
                if let Phase::Open { kind, row: slot } = &mut self.phase {
                    if kind.is_row_scoped() {
                        *slot = Some(new_row.clone());
                    }
                }
                self.selected = Some(new_row);
                true
            }
            None if row_dialog_open => false,
            None => {
                let mut changed = self.selected.take().is_some();
                if matches!(self.phase, Phase::Exiting { .. }) {
                    self.generation += 1;
                    self.phase = Phase::Closed;
                    changed = true;
                }
                changed
            }
        }
    }

    /// Hide the visible dialog.
    ///
    /// Returns a ticket when a row was retained for the exit transition; the
    /// caller hands it back to `finish_close` once the transition is over.
    pub fn close(&mut self) -> Option<CloseTicket> {
        let phase = std::mem::replace(&mut self.phase, Phase::Closed);
        match phase {
            Phase::Open {
                kind,
                row: Some(row),
            } => {
                self.generation += 1;
                let ticket = CloseTicket(self.generation);
                self.phase = Phase::Exiting { kind, row, ticket };
                self.selected = None;
                Some(ticket)
            }
            Phase::Open { row: None, .. } => {
                self.generation += 1;
                self.selected = None;
                None
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Drop the retained row if `ticket` is still the latest close.
    ///
    /// A row selected after the close survives.
    pub fn finish_close(&mut self, ticket: CloseTicket) -> bool {
        match &self.phase {
            Phase::Exiting { ticket: current, .. } if *current == ticket => {
                self.phase = Phase::Closed;
                true
            }
            _ => false,
        }
    }

    fn transition(&mut self, next: Phase<K, R>) -> bool {
        self.generation += 1;
        self.phase = next;
        true
    }
}

/// The dialog the switch should mount.
#[derive(Debug, PartialEq)]
pub struct MountedDialog<'a, K, R> {
    pub kind: K,
    pub row: Option<&'a R>,
    /// Playing its exit transition; not interactive any more
    pub closing: bool,
}

/// Decide which dialog to mount, re-checking permissions at the boundary.
///
/// A kind mounts only if one of its gates is allowed by `perms`. Row-scoped
/// kinds without a row render nothing. An exiting dialog stays mounted with
/// `closing` set until its close is finished.
pub fn mounted_dialog<'a, K: DialogKind, R: Clone>(
    state: &'a DialogState<K, R>,
    perms: &PermissionSet,
    gates: &[ActionSpec<K>],
) -> Option<MountedDialog<'a, K, R>> {
    let (kind, closing) = match (state.open_kind(), state.exiting()) {
        (Some(kind), _) => (kind, false),
        (None, Some(kind)) => (kind, true),
        (None, None) => return None,
    };

    let permitted = gates
        .iter()
        .any(|g| g.kind == kind && perms.allows(&g.token));
    if !permitted {
        return None;
    }

    let row = if kind.is_row_scoped() {
        Some(state.current_row()?)
    } else {
        None
    };

    Some(MountedDialog { kind, row, closing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::actions::ActionSpec;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str);

    type State = DialogState<CrudDialog, Row>;

    fn gates() -> Vec<ActionSpec<CrudDialog>> {
        vec![
            ActionSpec::new("create departments", CrudDialog::Add, "Add", "plus"),
            ActionSpec::new("update departments", CrudDialog::Edit, "Edit", "edit"),
            ActionSpec::new("delete departments", CrudDialog::Delete, "Delete", "trash"),
            ActionSpec::new("export departments", CrudDialog::Export, "Export", "download"),
        ]
    }

    #[test]
    fn test_initial_state_is_closed() {
        let state = State::new();
        assert_eq!(state.open_kind(), None);
        assert_eq!(state.current_row(), None);
        assert_eq!(state.exiting(), None);
    }

    #[test]
    fn test_set_open_is_idempotent() {
        let mut state = State::new();
        assert!(state.set_open(Some(CrudDialog::Add)));
        assert!(!state.set_open(Some(CrudDialog::Add)));
        assert!(state.is_open(CrudDialog::Add));
        assert_eq!(state.current_row(), None);
    }

    #[test]
    fn test_only_one_kind_open() {
        let mut state = State::new();
        state.set_open(Some(CrudDialog::Import));
        state.set_open(Some(CrudDialog::Export));
        assert!(state.is_open(CrudDialog::Export));
        assert!(!state.is_open(CrudDialog::Import));
    }

    #[test]
    fn test_row_scoped_open_requires_row() {
        let mut state = State::new();
        assert!(!state.set_open(Some(CrudDialog::Edit)));
        assert_eq!(state.open_kind(), None);

        state.set_current_row(Some(Row("d1")));
        assert!(state.set_open(Some(CrudDialog::Edit)));
        assert_eq!(state.current_row(), Some(&Row("d1")));
    }

    #[test]
    fn test_open_for_row_binds_row_with_kind() {
        let mut state = State::new();
        state.open_for_row(CrudDialog::Delete, Row("d2"));
        assert!(state.is_open(CrudDialog::Delete));
        assert_eq!(state.current_row(), Some(&Row("d2")));
    }

    #[test]
    fn test_close_keeps_row_until_finished() {
        let mut state = State::new();
        state.open_for_row(CrudDialog::Edit, Row("d1"));

        let ticket = state.close().unwrap();
        assert_eq!(state.open_kind(), None);
        assert_eq!(state.exiting(), Some(CrudDialog::Edit));
        assert_eq!(state.exit_ticket(), Some(ticket));
        assert_eq!(state.current_row(), Some(&Row("d1")));

        assert!(state.finish_close(ticket));
        assert_eq!(state.current_row(), None);
        assert_eq!(state.exiting(), None);
        assert_eq!(state.exit_ticket(), None);
    }

    #[test]
    fn test_stale_ticket_does_not_clear_new_selection() {
        let mut state = State::new();
        state.open_for_row(CrudDialog::Edit, Row("d1"));
        let stale = state.close().unwrap();

        state.open_for_row(CrudDialog::View, Row("d2"));
        assert!(!state.finish_close(stale));
        assert!(state.is_open(CrudDialog::View));
        assert_eq!(state.current_row(), Some(&Row("d2")));
    }

    #[test]
    fn test_selection_during_exit_survives_finish() {
        let mut state = State::new();
        state.open_for_row(CrudDialog::Edit, Row("d1"));
        let ticket = state.close().unwrap();
        state.set_current_row(Some(Row("d5")));
        assert!(state.finish_close(ticket));
        assert_eq!(state.current_row(), Some(&Row("d5")));
    }

    #[test]
    fn test_closing_add_reports_change() {
        let mut state = State::new();
        state.set_open(Some(CrudDialog::Add));
        assert!(state.set_open(None));
        assert!(!state.set_open(None));
    }

    #[test]
    fn test_ticket_is_single_use() {
        let mut state = State::new();
        state.open_for_row(CrudDialog::Edit, Row("d1"));
        let ticket = state.close().unwrap();
        assert!(state.finish_close(ticket));
        assert!(!state.finish_close(ticket));
    }

    #[test]
    fn test_close_without_row_has_no_ticket() {
        let mut state = State::new();
        state.set_open(Some(CrudDialog::Add));
        assert_eq!(state.close(), None);
        assert_eq!(state.open_kind(), None);
        assert_eq!(state.close(), None);
    }

    #[test]
    fn test_set_open_none_closes() {
        let mut state = State::new();
        state.open_for_row(CrudDialog::Edit, Row("d1"));
        assert!(state.set_open(None));
        assert_eq!(state.open_kind(), None);
        assert!(!state.set_open(None));
    }

    #[test]
    fn test_clearing_row_refused_while_row_dialog_open() {
        let mut state = State::new();
        state.open_for_row(CrudDialog::Edit, Row("d1"));
        assert!(!state.set_current_row(None));
        assert_eq!(state.current_row(), Some(&Row("d1")));

        state.set_current_row(Some(Row("d3")));
        assert_eq!(state.current_row(), Some(&Row("d3")));
    }

    #[test]
    fn test_clearing_row_while_exiting_finishes_close() {
        let mut state = State::new();
        state.open_for_row(CrudDialog::View, Row("d1"));
        let ticket = state.close().unwrap();
        assert!(state.set_current_row(None));
        assert_eq!(state.current_row(), None);
        assert!(!state.finish_close(ticket));
    }

    #[test]
    fn test_clearing_nothing_reports_no_change() {
        let mut state = State::new();
        assert!(!state.set_current_row(None));

        state.set_current_row(Some(Row("d1")));
        assert!(state.set_current_row(None));
        assert!(!state.set_current_row(None));
    }

    #[test]
    fn test_mounted_dialog_rechecks_permissions() {
        let mut state = State::new();
        state.set_open(Some(CrudDialog::Add));

        let none = PermissionSet::empty();
        assert_eq!(mounted_dialog(&state, &none, &gates()), None);

        let perms = PermissionSet::from_tokens(["departments-create"]);
        let mounted = mounted_dialog(&state, &perms, &gates()).unwrap();
        assert_eq!(mounted.kind, CrudDialog::Add);
        assert_eq!(mounted.row, None);
        assert!(!mounted.closing);
    }

    #[test]
    fn test_mounted_dialog_for_ungated_kind_is_none() {
        let mut state = State::new();
        state.set_open(Some(CrudDialog::Import));
        let perms = PermissionSet::from_tokens(["import departments"]);
        assert_eq!(mounted_dialog(&state, &perms, &gates()), None);
    }

    #[test]
    fn test_mounted_row_dialog_sees_row() {
        let mut state = State::new();
        state.open_for_row(CrudDialog::Delete, Row("d9"));
        let perms = PermissionSet::from_tokens(["delete departments"]);
        let mounted = mounted_dialog(&state, &perms, &gates()).unwrap();
        assert_eq!(mounted.row, Some(&Row("d9")));
    }

    #[test]
    fn test_exiting_dialog_stays_mounted_until_finished() {
        let mut state = State::new();
        state.open_for_row(CrudDialog::Edit, Row("d1"));
        let ticket = state.close().unwrap();
        let perms = PermissionSet::from_tokens(["update departments"]);

        let mounted = mounted_dialog(&state, &perms, &gates()).unwrap();
        assert!(mounted.closing);
        assert_eq!(mounted.row, Some(&Row("d1")));

        state.finish_close(ticket);
        assert_eq!(mounted_dialog(&state, &perms, &gates()), None);
    }
}

//! Screen description of a CRUD feature: who may see it, which actions it
//! offers, how its table looks.

use std::cmp::Ordering;

use super::actions::{resolve_actions, ActionSpec};
use super::dialog::{CrudDialog, DialogKind};
use super::list_query::{ListQuery, PageWindow};
use super::permissions::{Permission, PermissionSet, Verb};
use crate::domain::common::AdminEntity;

// ============================================================================
// Columns
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// Sorted numerically
    Number,
    /// ISO dates, sorted as text
    Date,
}

/// One table column; `value` renders the cell
pub struct Column<T> {
    pub field: &'static str,
    pub title: &'static str,
    pub kind: ColumnKind,
    pub value: fn(&T) -> String,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T> Column<T> {
    pub fn text(field: &'static str, title: &'static str, value: fn(&T) -> String) -> Self {
        Self {
            field,
            title,
            kind: ColumnKind::Text,
            value,
        }
    }

    pub fn number(field: &'static str, title: &'static str, value: fn(&T) -> String) -> Self {
        Self {
            field,
            title,
            kind: ColumnKind::Number,
            value,
        }
    }

    pub fn date(field: &'static str, title: &'static str, value: fn(&T) -> String) -> Self {
        Self {
            field,
            title,
            kind: ColumnKind::Date,
            value,
        }
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        let (va, vb) = ((self.value)(a), (self.value)(b));
        match self.kind {
            ColumnKind::Number => {
                let na = va.parse::<f64>().unwrap_or(f64::MIN);
                let nb = vb.parse::<f64>().unwrap_or(f64::MIN);
                na.partial_cmp(&nb).unwrap_or(Ordering::Equal)
            }
            ColumnKind::Text | ColumnKind::Date => va.to_lowercase().cmp(&vb.to_lowercase()),
        }
    }
}

/// Sort by the column named `field`; unknown fields leave the order alone.
pub fn sort_rows<T>(rows: &mut [T], columns: &[Column<T>], field: &str, ascending: bool) {
    let Some(column) = columns.iter().find(|c| c.field == field) else {
        return;
    };
    rows.sort_by(|a, b| {
        let ord = column.compare(a, b);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

/// One page of a loaded list after search and sort
#[derive(Debug, Clone, PartialEq)]
pub struct ListSlice<T> {
    pub rows: Vec<T>,
    /// Rows matching the search, across all pages
    pub total_count: usize,
    pub window: PageWindow,
}

pub fn list_slice<T: AdminEntity>(all: &[T], query: &ListQuery) -> ListSlice<T> {
    let mut matching: Vec<T> = all
        .iter()
        .filter(|row| {
            let text = row.search_text();
            let haystack: Vec<&str> = text.iter().map(String::as_str).collect();
            query.matches(&haystack)
        })
        .cloned()
        .collect();

    if let Some(field) = &query.sort_field {
        sort_rows(&mut matching, &T::columns(), field, query.sort_ascending);
    }

    let total_count = matching.len();
    let window = PageWindow::compute(total_count, query.page, query.page_size);
    let rows = matching
        .drain(window.start..window.end)
        .collect();

    ListSlice {
        rows,
        total_count,
        window,
    }
}

// ============================================================================
// Screen
// ============================================================================

/// Whether the viewer may open the screen at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAccess {
    Granted,
    /// Rendered as the forbidden view, never as an error
    Forbidden { required: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSpec<K = CrudDialog> {
    /// DOM id, `{index}_{resource}--list`
    pub page_id: String,
    pub resource: &'static str,
    pub title: &'static str,
    pub element: &'static str,
    pub view_token: String,
    /// Top-level buttons (add/import/export)
    pub primary: Vec<ActionSpec<K>>,
    /// Per-row menu (view/edit/delete)
    pub row: Vec<ActionSpec<K>>,
}

impl<K: DialogKind> ScreenSpec<K> {
    pub fn access(&self, perms: &PermissionSet) -> ScreenAccess {
        if perms.allows(&self.view_token) {
            ScreenAccess::Granted
        } else {
            ScreenAccess::Forbidden {
                required: self.view_token.clone(),
            }
        }
    }

    pub fn primary_actions(&self, perms: &PermissionSet) -> Vec<ActionSpec<K>> {
        resolve_actions(perms, &self.primary)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn row_actions(&self, perms: &PermissionSet) -> Vec<ActionSpec<K>> {
        resolve_actions(perms, &self.row).into_iter().cloned().collect()
    }

    /// Every action that can open a dialog; the dialog switch checks these.
    pub fn gates(&self) -> Vec<ActionSpec<K>> {
        self.primary.iter().chain(self.row.iter()).cloned().collect()
    }
}

/// Permission verb behind each standard dialog
pub fn verb_for(kind: CrudDialog) -> Verb {
    match kind {
        CrudDialog::Add => Verb::Create,
        CrudDialog::Edit => Verb::Update,
        CrudDialog::Delete => Verb::Delete,
        CrudDialog::Import => Verb::Import,
        CrudDialog::Export => Verb::Export,
        CrudDialog::View => Verb::View,
    }
}

fn icon_for(kind: CrudDialog) -> &'static str {
    match kind {
        CrudDialog::Add => "plus",
        CrudDialog::Edit => "edit",
        CrudDialog::Delete => "trash",
        CrudDialog::Import => "upload",
        CrudDialog::Export => "download",
        CrudDialog::View => "eye",
    }
}

impl ScreenSpec<CrudDialog> {
    /// Standard screen for `T` offering `kinds`, with canonical tokens
    /// (`"create employees"`, …). Row-scoped kinds go to the row menu.
    pub fn for_entity<T: AdminEntity>(kinds: &[CrudDialog]) -> Self {
        let resource = T::resource();
        let token = |verb: Verb| Permission::new(verb, resource).token();

        let action = |kind: CrudDialog| {
            let label = match kind {
                CrudDialog::Add => format!("Add {}", T::element_name()),
                other => capitalize(other.label()),
            };
            ActionSpec::new(token(verb_for(kind)), kind, label, icon_for(kind))
        };

        let (row, primary): (Vec<CrudDialog>, Vec<CrudDialog>) =
            kinds.iter().copied().partition(|k| k.is_row_scoped());

        Self {
            page_id: format!("{}_{}--list", T::entity_index(), resource.replace('-', "_")),
            resource,
            title: T::list_name(),
            element: T::element_name(),
            view_token: token(Verb::View),
            primary: primary.into_iter().map(action).collect(),
            row: row.into_iter().map(action).collect(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_department::Department;
    use crate::domain::a002_employee::Employee;
    use crate::shared::dialog::{mounted_dialog, DialogState};

    const ALL: [CrudDialog; 6] = [
        CrudDialog::Add,
        CrudDialog::Import,
        CrudDialog::Export,
        CrudDialog::View,
        CrudDialog::Edit,
        CrudDialog::Delete,
    ];

    #[test]
    fn test_standard_tokens_and_split() {
        let spec = ScreenSpec::for_entity::<Employee>(&ALL);
        assert_eq!(spec.view_token, "view employees");
        assert_eq!(spec.page_id, "a002_employees--list");

        let primary: Vec<_> = spec.primary.iter().map(|a| a.token.as_str()).collect();
        assert_eq!(
            primary,
            vec!["create employees", "import employees", "export employees"]
        );
        let row: Vec<_> = spec.row.iter().map(|a| a.kind).collect();
        assert_eq!(row, vec![CrudDialog::View, CrudDialog::Edit, CrudDialog::Delete]);
        assert_eq!(spec.primary[0].label, "Add Employee");
        assert_eq!(spec.gates().len(), 6);
    }

    #[test]
    fn test_create_only_viewer_gets_add_only() {
        let spec = ScreenSpec::for_entity::<Employee>(&ALL);
        let perms = PermissionSet::from_tokens(["create employees"]);

        let actions = spec.primary_actions(&perms);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind, CrudDialog::Add);
        assert_eq!(actions[0].label, "Add Employee");
        assert!(spec.row_actions(&perms).is_empty());

        let mut state: DialogState<CrudDialog, Employee> = DialogState::new();
        state.set_open(Some(actions[0].kind));
        let mounted = mounted_dialog(&state, &perms, &spec.gates()).unwrap();
        assert_eq!(mounted.kind, CrudDialog::Add);
        assert!(mounted.row.is_none());
        assert!(state.current_row().is_none());
    }

    #[test]
    fn test_missing_view_permission_is_forbidden() {
        let spec = ScreenSpec::for_entity::<Department>(&ALL);
        let expected = ScreenAccess::Forbidden {
            required: "view departments".into(),
        };
        assert_eq!(spec.access(&PermissionSet::empty()), expected);
        assert_eq!(spec.access(&PermissionSet::from_session(None)), expected);

        let perms = PermissionSet::from_tokens(["departments-view"]);
        assert_eq!(spec.access(&perms), ScreenAccess::Granted);
    }

    fn department(code: &str, name: &str, headcount: u32) -> Department {
        Department {
            id: code.to_lowercase(),
            code: code.into(),
            name: name.into(),
            manager: None,
            headcount,
            is_active: true,
            updated_at: None,
        }
    }

    #[test]
    fn test_list_slice_filters_sorts_and_pages() {
        let all = vec![
            department("FIN", "Finance", 12),
            department("ACC", "Accounting", 3),
            department("OPS", "Operations", 40),
            department("FAC", "Facilities", 7),
        ];
        let mut query = ListQuery {
            search: "f".into(),
            sort_field: Some("headcount".into()),
            page_size: 1,
            ..Default::default()
        };

        let first = list_slice(&all, &query);
        assert_eq!(first.total_count, 2);
        assert_eq!(first.window.total_pages, 2);
        assert_eq!(first.rows.len(), 1);
        assert_eq!(first.rows[0].code, "FAC");

        query.page = 7;
        let last = list_slice(&all, &query);
        assert_eq!(last.window.page, 1);
        assert_eq!(last.rows[0].code, "FIN");
    }

    #[test]
    fn test_list_slice_of_nothing() {
        let slice = list_slice::<Department>(&[], &ListQuery::default());
        assert!(slice.rows.is_empty());
        assert_eq!(slice.total_count, 0);
        assert_eq!(slice.window.total_pages, 1);
    }

    #[derive(Clone)]
    struct Line {
        name: &'static str,
        amount: &'static str,
    }

    fn columns() -> Vec<Column<Line>> {
        vec![
            Column::text("name", "Name", |l: &Line| l.name.to_string()),
            Column::number("amount", "Amount", |l: &Line| l.amount.to_string()),
        ]
    }

    #[test]
    fn test_sort_rows_numeric_and_text() {
        let mut rows = vec![
            Line { name: "b", amount: "10" },
            Line { name: "A", amount: "9" },
            Line { name: "c", amount: "100" },
        ];
        sort_rows(&mut rows, &columns(), "amount", true);
        let amounts: Vec<_> = rows.iter().map(|l: &Line| l.amount).collect();
        assert_eq!(amounts, vec!["9", "10", "100"]);

        sort_rows(&mut rows, &columns(), "name", false);
        let names: Vec<_> = rows.iter().map(|l: &Line| l.name).collect();
        assert_eq!(names, vec!["c", "b", "A"]);

        sort_rows(&mut rows, &columns(), "missing", true);
        let names: Vec<_> = rows.iter().map(|l: &Line| l.name).collect();
        assert_eq!(names, vec!["c", "b", "A"]);
    }
}

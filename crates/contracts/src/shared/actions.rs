//! Permission-gated actions: which buttons and menu items a viewer gets.

use serde::{Deserialize, Serialize};

use super::dialog::DialogKind;
use super::permissions::PermissionSet;
use super::ui_config::COMPACT_BREAKPOINT_PX;

/// One offerable action: shown iff `token` is granted, opens `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSpec<K> {
    pub token: String,
    pub kind: K,
    pub label: String,
    /// Icon name understood by the frontend icon set
    pub icon: &'static str,
}

impl<K: DialogKind> ActionSpec<K> {
    pub fn new(
        token: impl Into<String>,
        kind: K,
        label: impl Into<String>,
        icon: &'static str,
    ) -> Self {
        Self {
            token: token.into(),
            kind,
            label: label.into(),
            icon,
        }
    }
}

/// Actions of `specs` allowed by `perms`, in declaration order.
///
/// A missing permission is not an error, the action is just left out.
pub fn resolve_actions<'a, K: DialogKind>(
    perms: &PermissionSet,
    specs: &'a [ActionSpec<K>],
) -> Vec<&'a ActionSpec<K>> {
    specs.iter().filter(|s| perms.allows(&s.token)).collect()
}

/// Whether `kind` is reachable through any allowed action.
pub fn allows_kind<K: DialogKind>(perms: &PermissionSet, specs: &[ActionSpec<K>], kind: K) -> bool {
    specs
        .iter()
        .any(|s| s.kind == kind && perms.allows(&s.token))
}

/// How action buttons are drawn at the current viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionLayout {
    /// Icon and label
    Full,
    /// Icon only, label goes to `aria-label`
    IconOnly,
}

impl ActionLayout {
    pub fn for_width(width_px: u32) -> Self {
        if width_px < COMPACT_BREAKPOINT_PX {
            Self::IconOnly
        } else {
            Self::Full
        }
    }

    pub fn shows_label(&self) -> bool {
        matches!(self, Self::Full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::dialog::CrudDialog;

    fn primary() -> Vec<ActionSpec<CrudDialog>> {
        vec![
            ActionSpec::new("create employees", CrudDialog::Add, "Add Employee", "plus"),
            ActionSpec::new("import employees", CrudDialog::Import, "Import", "upload"),
            ActionSpec::new("export employees", CrudDialog::Export, "Export", "download"),
        ]
    }

    #[test]
    fn test_action_shown_iff_token_granted() {
        let specs = primary();
        let grants: [&[&str]; 4] = [
            &[],
            &["create employees"],
            &["employees-export", "import employees"],
            &["create employees", "import employees", "export employees"],
        ];

        for granted in grants {
            let perms = PermissionSet::from_tokens(granted.iter());
            let resolved = resolve_actions(&perms, &specs);
            for spec in &specs {
                let shown = resolved.iter().any(|r| r.kind == spec.kind);
                assert_eq!(shown, perms.allows(&spec.token), "{}", spec.token);
            }
        }
    }

    #[test]
    fn test_resolution_keeps_declaration_order() {
        let perms = PermissionSet::from_tokens(["export employees", "create employees"]);
        let specs = primary();
        let kinds: Vec<_> = resolve_actions(&perms, &specs)
            .into_iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(kinds, vec![CrudDialog::Add, CrudDialog::Export]);
    }

    #[test]
    fn test_allows_kind() {
        let perms = PermissionSet::from_tokens(["import employees"]);
        assert!(allows_kind(&perms, &primary(), CrudDialog::Import));
        assert!(!allows_kind(&perms, &primary(), CrudDialog::Add));
        assert!(!allows_kind(&perms, &primary(), CrudDialog::Edit));
    }

    #[test]
    fn test_layout_breakpoint() {
        assert_eq!(ActionLayout::for_width(320), ActionLayout::IconOnly);
        assert_eq!(
            ActionLayout::for_width(COMPACT_BREAKPOINT_PX - 1),
            ActionLayout::IconOnly
        );
        assert_eq!(ActionLayout::for_width(COMPACT_BREAKPOINT_PX), ActionLayout::Full);
        assert!(ActionLayout::Full.shows_label());
        assert!(!ActionLayout::IconOnly.shows_label());
    }
}

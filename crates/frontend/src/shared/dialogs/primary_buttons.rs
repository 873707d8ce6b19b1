use contracts::shared::actions::ActionSpec;
use contracts::shared::dialog::DialogKind;
use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::viewport::use_action_layout;

/// One drawable action button
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ButtonPlan<K> {
    pub kind: K,
    pub label: String,
    pub icon: &'static str,
    pub emphasized: bool,
}

/// Buttons for already resolved `actions`; `None` when there is nothing to
/// draw, so callers can skip their container too. The first action is the
/// emphasized one.
pub(super) fn button_plans<K: DialogKind>(actions: Vec<ActionSpec<K>>) -> Option<Vec<ButtonPlan<K>>> {
    if actions.is_empty() {
        return None;
    }
    let plans = actions
        .into_iter()
        .enumerate()
        .map(|(idx, action)| ButtonPlan {
            kind: action.kind,
            label: action.label,
            icon: action.icon,
            emphasized: idx == 0,
        })
        .collect();
    Some(plans)
}

/// Top-level action buttons of a screen.
///
/// `actions` must already be resolved against the viewer's permissions.
/// Nothing is rendered, not even the container, when it is empty. On narrow
/// viewports the buttons collapse to icons with the label in `aria-label`.
#[component]
pub fn PrimaryButtons<K>(
    #[prop(into)] actions: Signal<Vec<ActionSpec<K>>>,
    on_open: Callback<K>,
) -> impl IntoView
where
    K: DialogKind,
{
    let layout = use_action_layout();

    move || {
        let buttons = button_plans(actions.get())?
            .into_iter()
            .map(|plan| {
                let kind = plan.kind;
                let aria = plan.label.clone();
                let title = plan.label.clone();
                let label = plan.label;
                let appearance = if plan.emphasized {
                    ButtonAppearance::Primary
                } else {
                    ButtonAppearance::Secondary
                };
                view! {
                    <Button
                        appearance=appearance
                        on_click=move |_| on_open.run(kind)
                        attr:aria-label=aria
                        attr:title=title
                    >
                        {icon(plan.icon)}
                        {move || layout.get().shows_label().then(|| format!(" {}", label))}
                    </Button>
                }
            })
            .collect_view();

        Some(view! { <div class="page__actions">{buttons}</div> })
    }
}

#[cfg(test)]
mod tests {
    use contracts::shared::actions::resolve_actions;
    use contracts::shared::dialog::CrudDialog;
    use contracts::shared::permissions::PermissionSet;

    use super::*;

    fn specs() -> Vec<ActionSpec<CrudDialog>> {
        vec![
            ActionSpec::new("create employees", CrudDialog::Add, "Add Employee", "plus"),
            ActionSpec::new("import employees", CrudDialog::Import, "Import", "upload"),
            ActionSpec::new("export employees", CrudDialog::Export, "Export", "download"),
        ]
    }

    fn resolved(perms: &PermissionSet) -> Vec<ActionSpec<CrudDialog>> {
        let specs = specs();
        resolve_actions(perms, &specs).into_iter().cloned().collect()
    }

    #[test]
    fn test_nothing_to_draw_without_permissions() {
        assert_eq!(button_plans(resolved(&PermissionSet::empty())), None);
        assert_eq!(button_plans(Vec::<ActionSpec<CrudDialog>>::new()), None);
    }

    #[test]
    fn test_create_only_viewer_gets_single_add_button() {
        let perms = PermissionSet::from_tokens(["create employees"]);
        let plans = button_plans(resolved(&perms)).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].kind, CrudDialog::Add);
        assert_eq!(plans[0].label, "Add Employee");
        assert!(plans[0].emphasized);
    }

    #[test]
    fn test_only_first_button_is_emphasized() {
        let perms = PermissionSet::from_tokens(["export employees", "import employees"]);
        let plans = button_plans(resolved(&perms)).unwrap();
        let kinds: Vec<_> = plans.iter().map(|p| (p.kind, p.emphasized)).collect();
        assert_eq!(kinds, vec![(CrudDialog::Import, true), (CrudDialog::Export, false)]);
    }
}

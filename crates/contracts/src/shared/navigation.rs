//! Sidebar entries and the choice of the active page.

use super::permissions::{Permission, PermissionSet, Verb};
use crate::domain::common::AdminEntity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Stable page key, also used in the `?active=` URL parameter
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    /// Listed only for viewers holding this token
    pub view_token: String,
}

impl NavItem {
    /// List page of `T`, keyed `{index}_{resource}`.
    pub fn for_entity<T: AdminEntity>(key: &'static str, icon: &'static str) -> Self {
        Self {
            key,
            label: T::list_name(),
            icon,
            view_token: Permission::new(Verb::View, T::resource()).token(),
        }
    }
}

/// Entries the viewer may open, in menu order.
pub fn visible_items<'a>(items: &'a [NavItem], perms: &PermissionSet) -> Vec<&'a NavItem> {
    items.iter().filter(|i| perms.allows(&i.view_token)).collect()
}

/// The page to show: `requested` if it exists and is visible, otherwise the
/// first visible page. `None` when the viewer may open nothing.
pub fn resolve_active<'a>(
    items: &'a [NavItem],
    perms: &PermissionSet,
    requested: Option<&str>,
) -> Option<&'a NavItem> {
    let visible = visible_items(items, perms);
    requested
        .and_then(|key| visible.iter().find(|i| i.key == key).copied())
        .or_else(|| visible.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_department::Department;
    use crate::domain::a002_employee::Employee;
    use crate::domain::a006_role::Role;

    fn items() -> Vec<NavItem> {
        vec![
            NavItem::for_entity::<Department>("a001_departments", "building"),
            NavItem::for_entity::<Employee>("a002_employees", "users"),
            NavItem::for_entity::<Role>("a006_roles", "shield"),
        ]
    }

    #[test]
    fn test_items_follow_view_tokens() {
        let items = items();
        assert_eq!(items[1].view_token, "view employees");
        assert_eq!(items[1].label, "Employees");

        let perms = PermissionSet::from_tokens(["employees-view", "roles-view"]);
        let keys: Vec<_> = visible_items(&items, &perms).iter().map(|i| i.key).collect();
        assert_eq!(keys, vec!["a002_employees", "a006_roles"]);
        assert!(visible_items(&items, &PermissionSet::empty()).is_empty());
    }

    #[test]
    fn test_resolve_active_falls_back_to_first_visible() {
        let items = items();
        let perms = PermissionSet::from_tokens(["view employees", "view roles"]);

        let active = resolve_active(&items, &perms, Some("a006_roles")).map(|i| i.key);
        assert_eq!(active, Some("a006_roles"));

        // Hidden or unknown keys fall back instead of leaking the page.
        let hidden = resolve_active(&items, &perms, Some("a001_departments")).map(|i| i.key);
        assert_eq!(hidden, Some("a002_employees"));
        let unknown = resolve_active(&items, &perms, Some("nope")).map(|i| i.key);
        assert_eq!(unknown, Some("a002_employees"));

        assert!(resolve_active(&items, &PermissionSet::empty(), None).is_none());
    }
}

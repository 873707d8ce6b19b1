//! Page registry: sidebar entries and the view behind each key.

use contracts::domain::a001_department::Department;
use contracts::domain::a002_employee::Employee;
use contracts::domain::a003_leave_type::LeaveType;
use contracts::domain::a004_payroll_run::PayrollRun;
use contracts::domain::a005_supplier::Supplier;
use contracts::domain::a006_role::Role;
use contracts::shared::navigation::{resolve_active, NavItem};
use leptos::prelude::*;

use crate::domain::a001_department::ui::list::DepartmentList;
use crate::domain::a002_employee::ui::list::EmployeeList;
use crate::domain::a003_leave_type::ui::list::LeaveTypeList;
use crate::domain::a004_payroll_run::ui::list::PayrollRunList;
use crate::domain::a005_supplier::ui::list::SupplierList;
use crate::domain::a006_role::ui::list::RoleList;
use crate::layout::global_context::use_app_context;
use crate::system::auth::context::use_permissions;

pub fn nav_items() -> Vec<NavItem> {
    vec![
        NavItem::for_entity::<Department>("a001_departments", "building"),
        NavItem::for_entity::<Employee>("a002_employees", "users"),
        NavItem::for_entity::<LeaveType>("a003_leave_types", "calendar"),
        NavItem::for_entity::<PayrollRun>("a004_payroll_runs", "wallet"),
        NavItem::for_entity::<Supplier>("a005_suppliers", "truck"),
        NavItem::for_entity::<Role>("a006_roles", "shield"),
    ]
}

pub fn render_page(key: &str) -> AnyView {
    match key {
        "a001_departments" => view! { <DepartmentList /> }.into_any(),
        "a002_employees" => view! { <EmployeeList /> }.into_any(),
        "a003_leave_types" => view! { <LeaveTypeList /> }.into_any(),
        "a004_payroll_runs" => view! { <PayrollRunList /> }.into_any(),
        "a005_suppliers" => view! { <SupplierList /> }.into_any(),
        "a006_roles" => view! { <RoleList /> }.into_any(),
        other => {
            log::warn!("unknown page key '{}'", other);
            view! { <div class="page__placeholder">"Page not found"</div> }.into_any()
        }
    }
}

/// Key of the page being shown, after permission filtering.
pub fn use_active_page() -> Memo<Option<&'static str>> {
    let ctx = use_app_context();
    let permissions = use_permissions();
    let items = StoredValue::new(nav_items());

    Memo::new(move |_| {
        let requested = ctx.active.get();
        permissions.with(|p| {
            items.with_value(|items| resolve_active(items, p, requested.as_deref()).map(|i| i.key))
        })
    })
}

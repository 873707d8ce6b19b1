use contracts::domain::a002_employee::Employee;
use contracts::shared::dialog::CrudDialog;
use contracts::shared::screen::ScreenSpec;
use leptos::prelude::*;

use crate::shared::crud_screen::CrudScreen;

/// Employees. Export covers the selected rows, or the whole filtered list
/// when nothing is selected.
#[component]
pub fn EmployeeList() -> impl IntoView {
    let spec = ScreenSpec::for_entity::<Employee>(&[
        CrudDialog::Add,
        CrudDialog::Import,
        CrudDialog::Export,
        CrudDialog::View,
        CrudDialog::Edit,
        CrudDialog::Delete,
    ]);

    view! { <CrudScreen<Employee> spec=spec /> }
}

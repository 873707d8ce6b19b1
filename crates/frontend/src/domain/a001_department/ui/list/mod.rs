use contracts::domain::a001_department::Department;
use contracts::shared::dialog::CrudDialog;
use contracts::shared::screen::ScreenSpec;
use leptos::prelude::*;

use crate::shared::crud_screen::CrudScreen;

/// Departments: full CRUD plus spreadsheet import and export.
#[component]
pub fn DepartmentList() -> impl IntoView {
    let spec = ScreenSpec::for_entity::<Department>(&[
        CrudDialog::Add,
        CrudDialog::Import,
        CrudDialog::Export,
        CrudDialog::View,
        CrudDialog::Edit,
        CrudDialog::Delete,
    ]);

    view! { <CrudScreen<Department> spec=spec /> }
}

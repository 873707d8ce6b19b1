use contracts::domain::a003_leave_type::LeaveType;
use contracts::shared::dialog::CrudDialog;
use contracts::shared::screen::ScreenSpec;
use leptos::prelude::*;

use crate::shared::crud_screen::CrudScreen;

#[component]
pub fn LeaveTypeList() -> impl IntoView {
    let spec = ScreenSpec::for_entity::<LeaveType>(&[
        CrudDialog::Add,
        CrudDialog::Edit,
        CrudDialog::Delete,
    ]);

    view! { <CrudScreen<LeaveType> spec=spec /> }
}

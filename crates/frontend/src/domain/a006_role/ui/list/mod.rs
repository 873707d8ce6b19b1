use contracts::domain::a006_role::Role;
use contracts::shared::dialog::CrudDialog;
use contracts::shared::screen::ScreenSpec;
use leptos::prelude::*;

use crate::shared::crud_screen::CrudScreen;

/// Roles and the permission tokens they grant.
#[component]
pub fn RoleList() -> impl IntoView {
    let spec = ScreenSpec::for_entity::<Role>(&[
        CrudDialog::Add,
        CrudDialog::View,
        CrudDialog::Edit,
        CrudDialog::Delete,
    ]);

    view! { <CrudScreen<Role> spec=spec /> }
}

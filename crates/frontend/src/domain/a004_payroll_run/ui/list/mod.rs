use contracts::domain::a004_payroll_run::PayrollRun;
use contracts::shared::dialog::CrudDialog;
use contracts::shared::screen::ScreenSpec;
use leptos::prelude::*;

use crate::shared::crud_screen::CrudScreen;

/// Payroll runs are never edited in place; a wrong run is deleted and
/// created again.
#[component]
pub fn PayrollRunList() -> impl IntoView {
    let spec = ScreenSpec::for_entity::<PayrollRun>(&[
        CrudDialog::Add,
        CrudDialog::Export,
        CrudDialog::View,
        CrudDialog::Delete,
    ]);

    view! { <CrudScreen<PayrollRun> spec=spec /> }
}

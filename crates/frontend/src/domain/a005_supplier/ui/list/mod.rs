use contracts::domain::a005_supplier::Supplier;
use contracts::shared::dialog::CrudDialog;
use contracts::shared::screen::ScreenSpec;
use leptos::prelude::*;

use crate::shared::crud_screen::CrudScreen;

#[component]
pub fn SupplierList() -> impl IntoView {
    let spec = ScreenSpec::for_entity::<Supplier>(&[
        CrudDialog::Add,
        CrudDialog::Import,
        CrudDialog::Export,
        CrudDialog::View,
        CrudDialog::Edit,
        CrudDialog::Delete,
    ]);

    view! { <CrudScreen<Supplier> spec=spec /> }
}

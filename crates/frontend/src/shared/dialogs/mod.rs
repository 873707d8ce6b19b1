//! Dialog coordination for CRUD screens: the shared open/close state, the
//! permission-filtered buttons that open dialogs, and the dialogs themselves.

pub mod delete_dialog;
pub mod empty_state;
pub mod entity_form_dialog;
pub mod export_dialog;
pub mod import_dialog;
pub mod primary_buttons;
pub mod provider;
pub mod row_actions;
pub mod view_dialog;

pub use delete_dialog::DeleteDialog;
pub use empty_state::EmptyState;
pub use entity_form_dialog::EntityFormDialog;
pub use export_dialog::ExportDialog;
pub use import_dialog::ImportDialog;
pub use primary_buttons::PrimaryButtons;
pub use provider::{provide_dialogs, use_dialogs, DialogContext};
pub use row_actions::RowActionsMenu;
pub use view_dialog::ViewDialog;

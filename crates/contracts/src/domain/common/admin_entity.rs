use serde::{de::DeserializeOwned, Serialize};

use crate::shared::screen::Column;

/// A record managed by one CRUD screen
///
/// Static metadata names the entity in the UI and in permission tokens; the
/// instance methods are what the table, dialogs and search need.
pub trait AdminEntity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    // ============================================================================
    // Instance
    // ============================================================================

    fn id(&self) -> &str;

    /// Short name used in dialog titles, e.g. "Finance" or "Jane Doe"
    fn title(&self) -> String;

    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Feature index, e.g. "a001"
    fn entity_index() -> &'static str;

    /// Plural resource used in API paths and permission tokens, e.g. "departments"
    fn resource() -> &'static str;

    /// Singular UI name, e.g. "Department"
    fn element_name() -> &'static str;

    /// Plural UI name, e.g. "Departments"
    fn list_name() -> &'static str;

    fn columns() -> Vec<Column<Self>>;

    /// Text the list search looks at; defaults to every column
    fn search_text(&self) -> Vec<String> {
        Self::columns().iter().map(|c| (c.value)(self)).collect()
    }
}

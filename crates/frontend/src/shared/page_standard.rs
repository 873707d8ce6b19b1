//! Page category constants.
//!
//! Every page declares an HTML `id` in the format `{entity}--{category}`
//! (e.g. `"a002_employees--list"`) and a `data-page-category` with one of the
//! constants below. The id can be pasted into a code search to land in the
//! matching `domain/` directory.

/// Table of records with search and paging
pub const PAGE_CAT_LIST: &str = "list";

/// Access, login and other system pages
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_SYSTEM];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && is_known_category(category),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a002_employees--list"));
        assert!(is_valid_page_id("forbidden--system"));
        assert!(!is_valid_page_id("a002_employees"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a002_employees--detail"));
    }
}

//! Filters, sorting and paging of list screens.

use serde::{Deserialize, Serialize};

use super::ui_config::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(default = "default_true")]
    pub sort_ascending: bool,
    /// Paging is applied client side and never sent
    #[serde(skip)]
    pub page: usize,
    #[serde(skip, default = "default_page_size")]
    pub page_size: usize,
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_field: None,
            sort_ascending: true,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// Clicking the same column flips direction, a new column sorts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field.as_deref() == Some(field) {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = Some(field.to_string());
            self.sort_ascending = true;
        }
    }

    pub fn matches(&self, haystack: &[&str]) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty() || haystack.iter().any(|h| h.to_lowercase().contains(&needle))
    }
}

/// Paging over an already filtered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// Clamps `page` into range; an empty list still has one (empty) page.
    pub fn compute(total_count: usize, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = if total_count == 0 {
            1
        } else {
            (total_count + page_size - 1) / page_size
        };
        let page = page.min(total_pages - 1);
        let start = (page * page_size).min(total_count);
        let end = (start + page_size).min(total_count);
        Self {
            page,
            total_pages,
            start,
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_sort() {
        let mut q = ListQuery::default();
        q.toggle_sort("name");
        assert_eq!(q.sort_field.as_deref(), Some("name"));
        assert!(q.sort_ascending);
        q.toggle_sort("name");
        assert!(!q.sort_ascending);
        q.toggle_sort("code");
        assert!(q.sort_ascending);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let q = ListQuery {
            search: "ACC".into(),
            ..Default::default()
        };
        assert!(q.matches(&["Finance", "accounting"]));
        assert!(!q.matches(&["Sales"]));
        assert!(ListQuery::default().matches(&[]));
    }

    #[test]
    fn test_page_window() {
        assert_eq!(
            PageWindow::compute(0, 3, 50),
            PageWindow { page: 0, total_pages: 1, start: 0, end: 0 }
        );
        assert_eq!(
            PageWindow::compute(120, 2, 50),
            PageWindow { page: 2, total_pages: 3, start: 100, end: 120 }
        );
        assert_eq!(PageWindow::compute(120, 9, 50).page, 2);
    }

    #[test]
    fn test_paging_is_not_serialized() {
        let q = ListQuery {
            search: "fin".into(),
            page: 4,
            page_size: 100,
            ..Default::default()
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json, serde_json::json!({ "search": "fin", "sort_ascending": true }));
    }

    #[test]
    fn test_sort_goes_to_the_server() {
        let mut q = ListQuery::default();
        q.toggle_sort("name");
        q.toggle_sort("name");
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["sort_field"], "name");
        assert_eq!(json["sort_ascending"], false);
    }

    #[test]
    fn test_query_string_defaults() {
        let q: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q, ListQuery::default());
    }
}

//! Export requests.
//!
//! An export either covers explicitly selected rows or whatever the list
//! filters match. An empty id list means the latter: "export nothing" is not
//! a request anyone makes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::list_query::ListQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn file_name(&self, resource: &str) -> String {
        format!("{}.{}", resource, self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExportDelivery {
    #[default]
    Download,
    Email { recipient: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportScope<'a> {
    Filtered(&'a ListQuery),
    Selected(&'a [String]),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    #[serde(default)]
    pub filters: ListQuery,
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub delivery: ExportDelivery,
}

impl ExportRequest {
    /// `ids: None` and `ids: Some(vec![])` build the same request.
    pub fn new(
        ids: Option<Vec<String>>,
        filters: ListQuery,
        format: ExportFormat,
        delivery: ExportDelivery,
    ) -> Self {
        Self {
            ids: ids.unwrap_or_default(),
            filters,
            format,
            delivery,
        }
    }

    pub fn scope(&self) -> ExportScope<'_> {
        if self.ids.is_empty() {
            ExportScope::Filtered(&self.filters)
        } else {
            ExportScope::Selected(&self.ids)
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let ExportDelivery::Email { recipient } = &self.delivery {
            let r = recipient.trim();
            if r.is_empty() || !r.contains('@') {
                return Err("Enter a valid e-mail address for delivery".into());
            }
        }
        Ok(())
    }
}

/// Returned when an export is mailed instead of downloaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReceipt {
    pub recipient: String,
    pub queued_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ids_mean_filtered() {
        let filters = ListQuery::default();
        let none = ExportRequest::new(None, filters.clone(), ExportFormat::Csv, ExportDelivery::Download);
        let empty = ExportRequest::new(
            Some(vec![]),
            filters.clone(),
            ExportFormat::Csv,
            ExportDelivery::Download,
        );
        assert_eq!(none, empty);
        assert_eq!(none.scope(), ExportScope::Filtered(&filters));
        assert_eq!(
            serde_json::to_string(&none).unwrap(),
            serde_json::to_string(&empty).unwrap()
        );
    }

    #[test]
    fn test_selected_ids_scope() {
        let req = ExportRequest::new(
            Some(vec!["e1".into(), "e2".into()]),
            ListQuery::default(),
            ExportFormat::Xlsx,
            ExportDelivery::Download,
        );
        assert_eq!(req.scope(), ExportScope::Selected(&["e1".to_string(), "e2".to_string()]));
    }

    #[test]
    fn test_email_delivery_needs_address() {
        let mut req = ExportRequest::new(
            None,
            ListQuery::default(),
            ExportFormat::Csv,
            ExportDelivery::Email {
                recipient: "  ".into(),
            },
        );
        assert!(req.validate().is_err());
        req.delivery = ExportDelivery::Email {
            recipient: "hr@example.com".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_delivery_wire_format() {
        let json = serde_json::to_value(ExportDelivery::Email {
            recipient: "a@b.c".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "email");
        assert_eq!(json["recipient"], "a@b.c");
        assert_eq!(ExportFormat::Xlsx.file_name("employees"), "employees.xlsx");
    }
}

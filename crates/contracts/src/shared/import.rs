//! Import uploads: client-side constraints checked before anything is sent,
//! and the report the API returns afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ui_config::MAX_IMPORT_BYTES;

/// What the browser tells us about a picked file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub size_bytes: u64,
    /// May be empty: browsers do not always know spreadsheet MIME types
    pub mime_type: String,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportViolation {
    #[error("Select a file to import")]
    NoFile,

    #[error("Only {max} file(s) can be imported at once, {given} selected")]
    TooManyFiles { max: usize, given: usize },

    #[error("{name} is {size} bytes, the limit is {max} bytes")]
    TooLarge { name: String, size: u64, max: u64 },

    #[error("{name}: file type is not allowed (expected {expected})")]
    Extension { name: String, expected: String },

    #[error("{name}: content type {mime} is not allowed")]
    MimeType { name: String, mime: String },
}

impl ImportViolation {
    /// Form field the message belongs to
    pub fn field(&self) -> &'static str {
        match self {
            Self::NoFile | Self::TooManyFiles { .. } => "files",
            Self::TooLarge { .. } | Self::Extension { .. } | Self::MimeType { .. } => "file",
        }
    }
}

/// Declarative constraint set for an import dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConstraints {
    pub max_files: usize,
    pub max_size_bytes: u64,
    /// Lowercase, without dot
    pub extensions: Vec<String>,
    pub mime_types: Vec<String>,
}

impl ImportConstraints {
    /// One CSV or XLSX file up to `MAX_IMPORT_BYTES`.
    pub fn spreadsheet() -> Self {
        Self {
            max_files: 1,
            max_size_bytes: MAX_IMPORT_BYTES,
            extensions: vec!["csv".into(), "xlsx".into()],
            mime_types: vec![
                "text/csv".into(),
                "application/vnd.ms-excel".into(),
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".into(),
            ],
        }
    }

    /// Value for the `accept` attribute of the file input
    pub fn accept_attr(&self) -> String {
        self.extensions
            .iter()
            .map(|e| format!(".{}", e))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Check every file; all violations are reported, not just the first.
    pub fn validate(&self, files: &[FileMeta]) -> Result<(), Vec<ImportViolation>> {
        let mut violations = Vec::new();

        if files.is_empty() {
            return Err(vec![ImportViolation::NoFile]);
        }
        if files.len() > self.max_files {
            violations.push(ImportViolation::TooManyFiles {
                max: self.max_files,
                given: files.len(),
            });
        }

        for file in files {
            if file.size_bytes > self.max_size_bytes {
                violations.push(ImportViolation::TooLarge {
                    name: file.name.clone(),
                    size: file.size_bytes,
                    max: self.max_size_bytes,
                });
            }

            let ext_ok = file
                .extension()
                .map(|ext| self.extensions.iter().any(|e| e == &ext))
                .unwrap_or(false);
            if !ext_ok {
                violations.push(ImportViolation::Extension {
                    name: file.name.clone(),
                    expected: self.accept_attr(),
                });
            }

            let mime = file.mime_type.trim().to_ascii_lowercase();
            if !mime.is_empty() && !self.mime_types.iter().any(|m| m == &mime) {
                violations.push(ImportViolation::MimeType {
                    name: file.name.clone(),
                    mime,
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowError {
    /// 1-based row in the uploaded sheet
    pub row: usize,
    pub message: String,
}

/// Outcome of an import as reported by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    #[serde(default)]
    pub created: usize,
    #[serde(default)]
    pub updated: usize,
    #[serde(default)]
    pub failed: Vec<ImportRowError>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Created {}, updated {}, failed {}",
            self.created,
            self.updated,
            self.failed.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

    #[test]
    fn test_valid_spreadsheet_passes() {
        let c = ImportConstraints::spreadsheet();
        assert_eq!(c.validate(&[FileMeta::new("staff.xlsx", 20_000, XLSX)]), Ok(()));
        assert_eq!(c.validate(&[FileMeta::new("STAFF.CSV", 10, "text/csv")]), Ok(()));
    }

    #[test]
    fn test_blank_mime_accepted_when_extension_matches() {
        let c = ImportConstraints::spreadsheet();
        assert_eq!(c.validate(&[FileMeta::new("staff.csv", 10, "")]), Ok(()));
    }

    #[test]
    fn test_no_file() {
        let c = ImportConstraints::spreadsheet();
        assert_eq!(c.validate(&[]), Err(vec![ImportViolation::NoFile]));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let c = ImportConstraints::spreadsheet();
        let big = FileMeta::new("staff.xlsx", MAX_IMPORT_BYTES + 1, XLSX);
        let errs = c.validate(&[big]).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], ImportViolation::TooLarge { .. }));
        assert_eq!(errs[0].field(), "file");
    }

    #[test]
    fn test_wrong_extension_and_mime() {
        let c = ImportConstraints::spreadsheet();
        let errs = c
            .validate(&[FileMeta::new("photo.png", 100, "image/png")])
            .unwrap_err();
        assert_eq!(errs.len(), 2);
        assert!(matches!(errs[0], ImportViolation::Extension { .. }));
        assert!(matches!(errs[1], ImportViolation::MimeType { .. }));
    }

    #[test]
    fn test_missing_extension_rejected() {
        let c = ImportConstraints::spreadsheet();
        assert!(c.validate(&[FileMeta::new("xlsx", 1, "")]).is_err());
        assert!(c.validate(&[FileMeta::new(".xlsx", 1, "")]).is_err());
    }

    #[test]
    fn test_too_many_files() {
        let c = ImportConstraints::spreadsheet();
        let f = FileMeta::new("a.csv", 1, "text/csv");
        let errs = c.validate(&[f.clone(), f]).unwrap_err();
        assert_eq!(
            errs,
            vec![ImportViolation::TooManyFiles { max: 1, given: 2 }]
        );
        assert_eq!(errs[0].field(), "files");
    }

    #[test]
    fn test_accept_attr() {
        assert_eq!(ImportConstraints::spreadsheet().accept_attr(), ".csv,.xlsx");
    }

    #[test]
    fn test_report_summary() {
        let report: ImportReport =
            serde_json::from_str(r#"{"created":3,"failed":[{"row":4,"message":"bad email"}]}"#)
                .unwrap();
        assert_eq!(report.updated, 0);
        assert!(!report.is_clean());
        assert_eq!(report.summary(), "Created 3, updated 0, failed 1");
    }
}

//! Data-driven entity forms.
//!
//! Every feature describes its create/edit form as a list of `FieldDef`s and
//! converts between its entity, the raw `FormValues` of the dialog and its
//! DTO. The dialog itself is generic.

pub mod validation;

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::common::AdminEntity;
pub use validation::ValidationRules;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text,
    Email,
    Number,
    /// ISO `YYYY-MM-DD`
    Date,
    /// `(value, label)` pairs
    Select(Vec<(String, String)>),
    Checkbox,
    /// Several values, comma separated in `FormValues`
    MultiText,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub input: FieldInput,
    pub rules: ValidationRules,
}

impl FieldDef {
    pub fn new(name: &'static str, label: &'static str, input: FieldInput) -> Self {
        Self {
            name,
            label,
            input,
            rules: ValidationRules::none(),
        }
    }

    pub fn rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn required(mut self) -> Self {
        self.rules.required = true;
        self
    }

    /// Human readable rendering of `raw` for read-only views
    pub fn display(&self, raw: &str) -> String {
        match &self.input {
            FieldInput::Checkbox => {
                let label = if is_checked(raw) { "Yes" } else { "No" };
                label.to_string()
            }
            FieldInput::Select(options) => options
                .iter()
                .find(|(value, _)| value == raw)
                .map(|(_, label)| label.clone())
                .unwrap_or_else(|| raw.to_string()),
            _ if raw.trim().is_empty() => "-".to_string(),
            _ => raw.to_string(),
        }
    }
}

fn is_checked(raw: &str) -> bool {
    matches!(raw, "true" | "on" | "1")
}

/// Raw string values of a form, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn text(&self, name: &str) -> String {
        self.get(name).trim().to_string()
    }

    pub fn opt_text(&self, name: &str) -> Option<String> {
        let v = self.text(name);
        if v.is_empty() {
            None
        } else {
            Some(v)
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        is_checked(self.get(name))
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).trim().parse::<f64>().ok()
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.get(name).trim(), "%Y-%m-%d").ok()
    }

    pub fn list(&self, name: &str) -> Vec<String> {
        self.get(name)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Field name → message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// First message per field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Check `values` against the declared fields.
pub fn validate_form(fields: &[FieldDef], values: &FormValues) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    for field in fields {
        let raw = values.get(field.name).trim();

        if let FieldInput::Checkbox = field.input {
            continue;
        }
        if let Err(e) = field.rules.validate_string(raw, field.label) {
            errors.add(field.name, e);
            continue;
        }
        if raw.is_empty() {
            continue;
        }

        match &field.input {
            FieldInput::Number => match raw.parse::<f64>() {
                Ok(n) => {
                    if let Err(e) = field.rules.validate_number(n, field.label) {
                        errors.add(field.name, e);
                    }
                }
                Err(_) => errors.add(field.name, format!("{} must be a number", field.label)),
            },
            FieldInput::Email => {
                let valid = raw
                    .split_once('@')
                    .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
                    .unwrap_or(false);
                if !valid {
                    errors.add(field.name, format!("{} is not a valid e-mail", field.label));
                }
            }
            FieldInput::Date => {
                if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err() {
                    errors.add(field.name, format!("{} must be a date (YYYY-MM-DD)", field.label));
                }
            }
            FieldInput::Select(options) => {
                if !options.iter().any(|(value, _)| value == raw) {
                    errors.add(field.name, format!("Choose a valid {}", field.label.to_lowercase()));
                }
            }
            FieldInput::Text | FieldInput::MultiText | FieldInput::Checkbox => {}
        }
    }

    errors.into_result()
}

/// An entity that can be created and edited through a generic form dialog
pub trait FormModel: AdminEntity {
    type Dto: Serialize + Clone + Send + Sync + 'static;

    fn fields() -> Vec<FieldDef>;

    /// Current values, used to prefill edit and view dialogs
    fn values(&self) -> FormValues;

    /// Build the DTO for create (`id == None`) or update.
    fn dto_from(values: &FormValues, id: Option<&str>) -> Result<Self::Dto, FieldErrors>;

    /// Empty form for the add dialog
    fn blank_values() -> FormValues {
        let mut values = FormValues::new();
        for field in Self::fields() {
            let initial = match &field.input {
                FieldInput::Checkbox => "false",
                _ => "",
            };
            values.set(field.name, initial);
        }
        values
    }

    /// `(label, rendered value)` pairs for the view dialog
    fn display_pairs(&self) -> Vec<(&'static str, String)> {
        let values = self.values();
        Self::fields()
            .iter()
            .map(|f| (f.label, f.display(values.get(f.name))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("name", "Name", FieldInput::Text).required(),
            FieldDef::new("email", "Email", FieldInput::Email),
            FieldDef::new("days", "Days", FieldInput::Number)
                .rules(ValidationRules::none().with_range(0.0, 365.0)),
            FieldDef::new("start", "Start date", FieldInput::Date),
            FieldDef::new(
                "status",
                "Status",
                FieldInput::Select(vec![("active".into(), "Active".into())]),
            ),
            FieldDef::new("paid", "Paid", FieldInput::Checkbox),
        ]
    }

    #[test]
    fn test_valid_form() {
        let values = FormValues::new()
            .with("name", "Annual")
            .with("email", "hr@example.com")
            .with("days", "20")
            .with("start", "2024-01-31")
            .with("status", "active")
            .with("paid", "true");
        assert_eq!(validate_form(&fields(), &values), Ok(()));
    }

    #[test]
    fn test_every_field_reports_its_error() {
        let values = FormValues::new()
            .with("email", "nope")
            .with("days", "abc")
            .with("start", "31.01.2024")
            .with("status", "retired");
        let errors = validate_form(&fields(), &values).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("days"), Some("Days must be a number"));
        assert!(errors.get("paid").is_none());
    }

    #[test]
    fn test_empty_optional_fields_pass() {
        let values = FormValues::new().with("name", "x");
        assert_eq!(validate_form(&fields(), &values), Ok(()));
    }

    #[test]
    fn test_display_rendering() {
        let f = fields();
        assert_eq!(f[4].display("active"), "Active");
        assert_eq!(f[5].display("true"), "Yes");
        assert_eq!(f[5].display(""), "No");
        assert_eq!(f[1].display(" "), "-");
    }

    #[test]
    fn test_value_accessors() {
        let v = FormValues::new()
            .with("tags", "a, b,,c ")
            .with("d", "2024-02-29")
            .with("n", " 12.5 ");
        assert_eq!(v.list("tags"), vec!["a", "b", "c"]);
        assert!(v.date("d").is_some());
        assert_eq!(v.number("n"), Some(12.5));
        assert_eq!(v.opt_text("missing"), None);
        assert!(!v.flag("missing"));
    }
}

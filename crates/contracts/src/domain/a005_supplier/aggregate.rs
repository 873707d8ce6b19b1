use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::AdminEntity;
use crate::shared::forms::{FieldDef, FieldErrors, FieldInput, FormModel, FormValues, ValidationRules};
use crate::shared::screen::Column;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// VAT / tax registration number
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl AdminEntity for Supplier {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn entity_index() -> &'static str {
        "a005"
    }

    fn resource() -> &'static str {
        "suppliers"
    }

    fn element_name() -> &'static str {
        "Supplier"
    }

    fn list_name() -> &'static str {
        "Suppliers"
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("name", "Name", |s: &Supplier| s.name.clone()),
            Column::text("contact_name", "Contact", |s: &Supplier| {
                s.contact_name.clone().unwrap_or_default()
            }),
            Column::text("email", "Email", |s: &Supplier| s.email.clone().unwrap_or_default()),
            Column::text("phone", "Phone", |s: &Supplier| s.phone.clone().unwrap_or_default()),
            Column::text("tax_number", "Tax No.", |s: &Supplier| {
                s.tax_number.clone().unwrap_or_default()
            }),
            Column::text("is_active", "Status", |s: &Supplier| {
                let status = if s.is_active { "Active" } else { "Inactive" };
                status.to_string()
            }),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SupplierDto {
    pub id: Option<String>,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tax_number: Option<String>,
    pub is_active: bool,
}

fn normalize_phone(raw: &str) -> Result<String, String> {
    let digits: String = raw.chars().filter(|c| !matches!(c, ' ' | '-' | '(' | ')')).collect();
    let body = digits.strip_prefix('+').unwrap_or(&digits);
    if body.len() < 6 || !body.chars().all(|c| c.is_ascii_digit()) {
        return Err("Phone must contain at least 6 digits".into());
    }
    Ok(digits)
}

impl FormModel for Supplier {
    type Dto = SupplierDto;

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("name", "Name", FieldInput::Text)
                .rules(ValidationRules::required().with_max_length(160)),
            FieldDef::new("contact_name", "Contact", FieldInput::Text),
            FieldDef::new("email", "Email", FieldInput::Email),
            FieldDef::new("phone", "Phone", FieldInput::Text),
            FieldDef::new("tax_number", "Tax No.", FieldInput::Text)
                .rules(ValidationRules::none().with_max_length(32)),
            FieldDef::new("is_active", "Active", FieldInput::Checkbox),
        ]
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with("name", &self.name)
            .with("contact_name", self.contact_name.clone().unwrap_or_default())
            .with("email", self.email.clone().unwrap_or_default())
            .with("phone", self.phone.clone().unwrap_or_default())
            .with("tax_number", self.tax_number.clone().unwrap_or_default())
            .with("is_active", self.is_active.to_string())
    }

    fn blank_values() -> FormValues {
        let mut values = FormValues::new();
        for field in Self::fields() {
            values.set(field.name, "");
        }
        values.set("is_active", "true");
        values
    }

    fn dto_from(values: &FormValues, id: Option<&str>) -> Result<Self::Dto, FieldErrors> {
        let phone = values
            .opt_text("phone")
            .map(|p| normalize_phone(&p))
            .transpose()
            .map_err(|e| FieldErrors::single("phone", e))?;

        Ok(SupplierDto {
            id: id.map(str::to_string),
            name: values.text("name"),
            contact_name: values.opt_text("contact_name"),
            email: values.opt_text("email").map(|e| e.to_lowercase()),
            phone,
            tax_number: values.opt_text("tax_number").map(|t| t.to_uppercase()),
            is_active: values.flag("is_active"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_normalized() {
        assert_eq!(normalize_phone("+1 (555) 123-4567").unwrap(), "+15551234567");
        assert!(normalize_phone("12-34").is_err());
        assert!(normalize_phone("call me").is_err());
    }

    #[test]
    fn test_new_supplier_active_by_default() {
        let values = Supplier::blank_values().with("name", "Acme");
        let dto = Supplier::dto_from(&values, None).unwrap();
        assert!(dto.is_active);
        assert_eq!(dto.phone, None);
        assert_eq!(dto.email, None);
    }

    #[test]
    fn test_bad_phone_keyed_on_field() {
        let values = FormValues::new().with("name", "Acme").with("phone", "abc");
        let errors = Supplier::dto_from(&values, Some("s1")).unwrap_err();
        assert!(errors.get("phone").is_some());
    }
}

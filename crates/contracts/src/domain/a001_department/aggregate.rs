use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::AdminEntity;
use crate::shared::forms::{FieldDef, FieldErrors, FieldInput, FormModel, FormValues, ValidationRules};
use crate::shared::screen::Column;

// ============================================================================
// Entity
// ============================================================================

/// Organisational unit employees belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub code: String,
    pub name: String,
    pub manager: Option<String>,
    /// Maintained by the API
    #[serde(default)]
    pub headcount: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

fn status_label(active: bool) -> &'static str {
    if active {
        "Active"
    } else {
        "Inactive"
    }
}

impl AdminEntity for Department {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }

    fn entity_index() -> &'static str {
        "a001"
    }

    fn resource() -> &'static str {
        "departments"
    }

    fn element_name() -> &'static str {
        "Department"
    }

    fn list_name() -> &'static str {
        "Departments"
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("code", "Code", |d: &Department| d.code.clone()),
            Column::text("name", "Name", |d: &Department| d.name.clone()),
            Column::text("manager", "Manager", |d: &Department| d.manager.clone().unwrap_or_default()),
            Column::number("headcount", "Headcount", |d: &Department| d.headcount.to_string()),
            Column::text("is_active", "Status", |d: &Department| status_label(d.is_active).to_string()),
        ]
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DepartmentDto {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    pub manager: Option<String>,
    pub is_active: bool,
}

impl DepartmentDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("Code cannot be empty".into());
        }
        if !self
            .code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err("Code may contain only letters, digits, '-' and '_'".into());
        }
        if self.name.trim().is_empty() {
            return Err("Name cannot be empty".into());
        }
        Ok(())
    }
}

impl FormModel for Department {
    type Dto = DepartmentDto;

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("code", "Code", FieldInput::Text)
                .rules(ValidationRules::required().with_max_length(16)),
            FieldDef::new("name", "Name", FieldInput::Text)
                .rules(ValidationRules::required().with_max_length(120)),
            FieldDef::new("manager", "Manager", FieldInput::Text),
            FieldDef::new("is_active", "Active", FieldInput::Checkbox),
        ]
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with("code", &self.code)
            .with("name", &self.name)
            .with("manager", self.manager.clone().unwrap_or_default())
            .with("is_active", self.is_active.to_string())
    }

    fn dto_from(values: &FormValues, id: Option<&str>) -> Result<Self::Dto, FieldErrors> {
        let dto = DepartmentDto {
            id: id.map(str::to_string),
            code: values.text("code").to_uppercase(),
            name: values.text("name"),
            manager: values.opt_text("manager"),
            is_active: values.flag("is_active"),
        };
        dto.validate().map_err(|e| FieldErrors::single("code", e))?;
        Ok(dto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Department {
        Department {
            id: "d1".into(),
            code: "FIN".into(),
            name: "Finance".into(),
            manager: None,
            headcount: 12,
            is_active: true,
            updated_at: None,
        }
    }

    #[test]
    fn test_deserialize_with_api_defaults() {
        let d: Department =
            serde_json::from_str(r#"{"id":"d1","code":"FIN","name":"Finance","manager":null}"#)
                .unwrap();
        assert!(d.is_active);
        assert_eq!(d.headcount, 0);
    }

    #[test]
    fn test_values_round_into_dto() {
        let d = sample();
        let dto = Department::dto_from(&d.values(), Some("d1")).unwrap();
        assert_eq!(dto.id.as_deref(), Some("d1"));
        assert_eq!(dto.code, "FIN");
        assert_eq!(dto.manager, None);
        assert!(dto.is_active);
    }

    #[test]
    fn test_code_is_normalized_and_checked() {
        let values = FormValues::new().with("code", " ops ").with("name", "Operations");
        let dto = Department::dto_from(&values, None).unwrap();
        assert_eq!(dto.code, "OPS");
        assert!(!dto.is_active);

        let bad = FormValues::new().with("code", "a b").with("name", "x");
        let errors = Department::dto_from(&bad, None).unwrap_err();
        assert!(errors.get("code").is_some());
    }

    #[test]
    fn test_display_pairs() {
        let pairs = sample().display_pairs();
        assert_eq!(pairs[0], ("Code", "FIN".to_string()));
        assert_eq!(pairs[2], ("Manager", "-".to_string()));
        assert_eq!(pairs[3], ("Active", "Yes".to_string()));
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::AdminEntity;
use crate::shared::forms::{FieldDef, FieldErrors, FieldInput, FormModel, FormValues, ValidationRules};
use crate::shared::screen::Column;

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    #[default]
    Active,
    OnLeave,
    Terminated,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 3] = [Self::Active, Self::OnLeave, Self::Terminated];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "on_leave",
            Self::Terminated => "terminated",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::OnLeave => "On leave",
            Self::Terminated => "Terminated",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    fn options() -> Vec<(String, String)> {
        Self::ALL
            .iter()
            .map(|s| (s.code().to_string(), s.display_name().to_string()))
            .collect()
    }
}

// ============================================================================
// Entity
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub employee_no: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub department_id: Option<String>,
    /// Resolved by the API for display
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    pub hire_date: NaiveDate,
    #[serde(default)]
    pub status: EmploymentStatus,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl AdminEntity for Employee {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        self.full_name()
    }

    fn entity_index() -> &'static str {
        "a002"
    }

    fn resource() -> &'static str {
        "employees"
    }

    fn element_name() -> &'static str {
        "Employee"
    }

    fn list_name() -> &'static str {
        "Employees"
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("employee_no", "No.", |e: &Employee| e.employee_no.clone()),
            Column::text("name", "Name", |e: &Employee| e.full_name()),
            Column::text("email", "Email", |e: &Employee| e.email.clone()),
            Column::text("department", "Department", |e: &Employee| {
                e.department_name.clone().unwrap_or_default()
            }),
            Column::text("position", "Position", |e: &Employee| {
                e.position.clone().unwrap_or_default()
            }),
            Column::date("hire_date", "Hired", |e: &Employee| e.hire_date.to_string()),
            Column::text("status", "Status", |e: &Employee| {
                e.status.display_name().to_string()
            }),
        ]
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub id: Option<String>,
    pub employee_no: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: Option<String>,
    pub position: Option<String>,
    pub hire_date: NaiveDate,
    pub status: EmploymentStatus,
}

impl FormModel for Employee {
    type Dto = EmployeeDto;

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("employee_no", "Employee No.", FieldInput::Text)
                .rules(ValidationRules::required().with_max_length(20)),
            FieldDef::new("first_name", "First name", FieldInput::Text)
                .rules(ValidationRules::required().with_max_length(80)),
            FieldDef::new("last_name", "Last name", FieldInput::Text)
                .rules(ValidationRules::required().with_max_length(80)),
            FieldDef::new("email", "Email", FieldInput::Email).required(),
            FieldDef::new("department_id", "Department ID", FieldInput::Text),
            FieldDef::new("position", "Position", FieldInput::Text)
                .rules(ValidationRules::none().with_max_length(120)),
            FieldDef::new("hire_date", "Hire date", FieldInput::Date).required(),
            FieldDef::new("status", "Status", FieldInput::Select(EmploymentStatus::options()))
                .required(),
        ]
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with("employee_no", &self.employee_no)
            .with("first_name", &self.first_name)
            .with("last_name", &self.last_name)
            .with("email", &self.email)
            .with("department_id", self.department_id.clone().unwrap_or_default())
            .with("position", self.position.clone().unwrap_or_default())
            .with("hire_date", self.hire_date.to_string())
            .with("status", self.status.code())
    }

    fn blank_values() -> FormValues {
        let mut values = FormValues::new();
        for field in Self::fields() {
            values.set(field.name, "");
        }
        values.set("status", EmploymentStatus::Active.code());
        values
    }

    fn dto_from(values: &FormValues, id: Option<&str>) -> Result<Self::Dto, FieldErrors> {
        let mut errors = FieldErrors::new();

        let hire_date = values.date("hire_date");
        if hire_date.is_none() {
            errors.add("hire_date", "Hire date must be a date (YYYY-MM-DD)");
        }
        let status = EmploymentStatus::from_code(&values.text("status"));
        if status.is_none() {
            errors.add("status", "Choose a valid status");
        }

        match (hire_date, status) {
            (Some(hire_date), Some(status)) if errors.is_empty() => Ok(EmployeeDto {
                id: id.map(str::to_string),
                employee_no: values.text("employee_no"),
                first_name: values.text("first_name"),
                last_name: values.text("last_name"),
                email: values.text("email").to_lowercase(),
                department_id: values.opt_text("department_id"),
                position: values.opt_text("position"),
                hire_date,
                status,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::forms::validate_form;

    fn sample() -> Employee {
        Employee {
            id: "e1".into(),
            employee_no: "E-001".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            department_id: Some("d1".into()),
            department_name: Some("Finance".into()),
            position: None,
            hire_date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
            status: EmploymentStatus::OnLeave,
            updated_at: None,
        }
    }

    #[test]
    fn test_status_codes() {
        for s in EmploymentStatus::ALL {
            assert_eq!(EmploymentStatus::from_code(s.code()), Some(s));
        }
        let json = serde_json::to_string(&EmploymentStatus::OnLeave).unwrap();
        assert_eq!(json, "\"on_leave\"");
    }

    #[test]
    fn test_edit_values_validate_and_convert() {
        let e = sample();
        let values = e.values();
        assert_eq!(validate_form(&Employee::fields(), &values), Ok(()));

        let dto = Employee::dto_from(&values, Some("e1")).unwrap();
        assert_eq!(dto.status, EmploymentStatus::OnLeave);
        assert_eq!(dto.hire_date, e.hire_date);
        assert_eq!(dto.position, None);
    }

    #[test]
    fn test_blank_form_defaults_to_active() {
        let values = Employee::blank_values();
        assert_eq!(values.get("status"), "active");
        let errors = validate_form(&Employee::fields(), &values).unwrap_err();
        assert!(errors.get("first_name").is_some());
        assert!(errors.get("status").is_none());
    }

    #[test]
    fn test_bad_date_reported_on_field() {
        let values = sample().values().with("hire_date", "01/03/2021");
        let errors = Employee::dto_from(&values, None).unwrap_err();
        assert!(errors.get("hire_date").is_some());
    }

    #[test]
    fn test_title_and_search_text() {
        let e = sample();
        assert_eq!(e.title(), "Jane Doe");
        assert!(e.search_text().iter().any(|t| t == "Finance"));
    }
}

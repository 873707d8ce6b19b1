use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::AdminEntity;
use crate::shared::forms::{FieldDef, FieldErrors, FieldInput, FormModel, FormValues, ValidationRules};
use crate::shared::screen::Column;

pub const MAX_DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveType {
    pub id: String,
    pub name: String,
    pub days_per_year: f64,
    #[serde(default)]
    pub paid: bool,
    /// Unused days move to the next year
    #[serde(default)]
    pub carry_over: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

impl AdminEntity for LeaveType {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn entity_index() -> &'static str {
        "a003"
    }

    fn resource() -> &'static str {
        "leave-types"
    }

    fn element_name() -> &'static str {
        "Leave Type"
    }

    fn list_name() -> &'static str {
        "Leave Types"
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("name", "Name", |l: &LeaveType| l.name.clone()),
            Column::number("days_per_year", "Days / year", |l: &LeaveType| {
                l.days_per_year.to_string()
            }),
            Column::text("paid", "Paid", |l: &LeaveType| yes_no(l.paid).to_string()),
            Column::text("carry_over", "Carry over", |l: &LeaveType| {
                yes_no(l.carry_over).to_string()
            }),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveTypeDto {
    pub id: Option<String>,
    pub name: String,
    pub days_per_year: f64,
    pub paid: bool,
    pub carry_over: bool,
}

impl FormModel for LeaveType {
    type Dto = LeaveTypeDto;

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("name", "Name", FieldInput::Text)
                .rules(ValidationRules::required().with_max_length(60)),
            FieldDef::new("days_per_year", "Days per year", FieldInput::Number)
                .rules(ValidationRules::required().with_range(0.0, MAX_DAYS_PER_YEAR)),
            FieldDef::new("paid", "Paid", FieldInput::Checkbox),
            FieldDef::new("carry_over", "Carry over", FieldInput::Checkbox),
        ]
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with("name", &self.name)
            .with("days_per_year", self.days_per_year.to_string())
            .with("paid", self.paid.to_string())
            .with("carry_over", self.carry_over.to_string())
    }

    fn dto_from(values: &FormValues, id: Option<&str>) -> Result<Self::Dto, FieldErrors> {
        let days = values
            .number("days_per_year")
            .filter(|d| (0.0..=MAX_DAYS_PER_YEAR).contains(d))
            .ok_or_else(|| {
                FieldErrors::single("days_per_year", "Days per year must be between 0 and 365")
            })?;

        Ok(LeaveTypeDto {
            id: id.map(str::to_string),
            name: values.text("name"),
            days_per_year: days,
            paid: values.flag("paid"),
            carry_over: values.flag("carry_over"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::forms::validate_form;

    #[test]
    fn test_days_range() {
        let ok = FormValues::new().with("name", "Annual").with("days_per_year", "25");
        assert_eq!(validate_form(&LeaveType::fields(), &ok), Ok(()));
        assert_eq!(LeaveType::dto_from(&ok, None).unwrap().days_per_year, 25.0);

        let too_many = ok.clone().with("days_per_year", "400");
        assert!(validate_form(&LeaveType::fields(), &too_many).is_err());
        assert!(LeaveType::dto_from(&too_many, None).is_err());
    }

    #[test]
    fn test_resource_uses_dash() {
        assert_eq!(LeaveType::resource(), "leave-types");
        let l = LeaveType {
            id: "l1".into(),
            name: "Sick".into(),
            days_per_year: 10.0,
            paid: true,
            carry_over: false,
            updated_at: None,
        };
        let pairs = l.display_pairs();
        assert_eq!(pairs[2], ("Paid", "Yes".to_string()));
        assert_eq!(pairs[3], ("Carry over", "No".to_string()));
    }
}

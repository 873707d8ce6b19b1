use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::AdminEntity;
use crate::shared::forms::{FieldDef, FieldErrors, FieldInput, FormModel, FormValues};
use crate::shared::screen::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    #[default]
    Draft,
    Approved,
    Paid,
}

impl PayrollStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Approved => "Approved",
            Self::Paid => "Paid",
        }
    }
}

/// One payroll calculation over a pay period
///
/// Runs are created as drafts; totals and status are owned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRun {
    pub id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub pay_date: NaiveDate,
    #[serde(default)]
    pub status: PayrollStatus,
    #[serde(default)]
    pub employee_count: u32,
    #[serde(default)]
    pub total_gross: f64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PayrollRun {
    pub fn period_label(&self) -> String {
        format!("{} - {}", self.period_start, self.period_end)
    }
}

impl AdminEntity for PayrollRun {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        format!("Payroll {}", self.period_label())
    }

    fn entity_index() -> &'static str {
        "a004"
    }

    fn resource() -> &'static str {
        "payroll-runs"
    }

    fn element_name() -> &'static str {
        "Payroll Run"
    }

    fn list_name() -> &'static str {
        "Payroll Runs"
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::date("period_start", "Period start", |p: &PayrollRun| {
                p.period_start.to_string()
            }),
            Column::date("period_end", "Period end", |p: &PayrollRun| p.period_end.to_string()),
            Column::date("pay_date", "Pay date", |p: &PayrollRun| p.pay_date.to_string()),
            Column::text("status", "Status", |p: &PayrollRun| {
                p.status.display_name().to_string()
            }),
            Column::number("employee_count", "Employees", |p: &PayrollRun| {
                p.employee_count.to_string()
            }),
            Column::number("total_gross", "Gross", |p: &PayrollRun| {
                format!("{:.2}", p.total_gross)
            }),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRunDto {
    pub id: Option<String>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub pay_date: NaiveDate,
}

impl PayrollRunDto {
    /// Date ordering checks; failures are keyed by the offending field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.period_end < self.period_start {
            errors.add("period_end", "Period end must not be before period start");
        }
        if self.pay_date < self.period_start {
            errors.add("pay_date", "Pay date must not be before period start");
        }
        errors.into_result()
    }
}

impl FormModel for PayrollRun {
    type Dto = PayrollRunDto;

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("period_start", "Period start", FieldInput::Date).required(),
            FieldDef::new("period_end", "Period end", FieldInput::Date).required(),
            FieldDef::new("pay_date", "Pay date", FieldInput::Date).required(),
        ]
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with("period_start", self.period_start.to_string())
            .with("period_end", self.period_end.to_string())
            .with("pay_date", self.pay_date.to_string())
    }

    fn display_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Period start", self.period_start.to_string()),
            ("Period end", self.period_end.to_string()),
            ("Pay date", self.pay_date.to_string()),
            ("Status", self.status.display_name().to_string()),
            ("Employees", self.employee_count.to_string()),
            ("Gross", format!("{:.2}", self.total_gross)),
        ]
    }

    fn dto_from(values: &FormValues, id: Option<&str>) -> Result<Self::Dto, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut date = |name: &str, label: &str| {
            let parsed = values.date(name);
            if parsed.is_none() {
                errors.add(name, format!("{} must be a date (YYYY-MM-DD)", label));
            }
            parsed
        };
        let start = date("period_start", "Period start");
        let end = date("period_end", "Period end");
        let pay = date("pay_date", "Pay date");

        let (Some(period_start), Some(period_end), Some(pay_date)) = (start, end, pay) else {
            return Err(errors);
        };
        let dto = PayrollRunDto {
            id: id.map(str::to_string),
            period_start,
            period_end,
            pay_date,
        };
        dto.validate()?;
        Ok(dto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(start: &str, end: &str, pay: &str) -> FormValues {
        FormValues::new()
            .with("period_start", start)
            .with("period_end", end)
            .with("pay_date", pay)
    }

    #[test]
    fn test_valid_period() {
        let dto = PayrollRun::dto_from(&values("2024-05-01", "2024-05-31", "2024-06-05"), None)
            .unwrap();
        assert_eq!(dto.period_end.to_string(), "2024-05-31");
    }

    #[test]
    fn test_end_before_start_rejected() {
        let errors =
            PayrollRun::dto_from(&values("2024-05-31", "2024-05-01", "2024-04-01"), None)
                .unwrap_err();
        assert!(errors.get("period_end").is_some());
        assert!(errors.get("pay_date").is_some());
    }

    #[test]
    fn test_unparseable_dates_collected() {
        let errors = PayrollRun::dto_from(&values("", "x", "2024-01-01"), None).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_read_only_totals_in_view() {
        let run: PayrollRun = serde_json::from_str(
            r#"{"id":"p1","period_start":"2024-05-01","period_end":"2024-05-31",
                "pay_date":"2024-06-05","status":"approved","employee_count":42,
                "total_gross":123456.5}"#,
        )
        .unwrap();
        let pairs = run.display_pairs();
        assert_eq!(pairs[3], ("Status", "Approved".to_string()));
        assert_eq!(pairs[5], ("Gross", "123456.50".to_string()));
        assert_eq!(run.title(), "Payroll 2024-05-01 - 2024-05-31");
    }
}

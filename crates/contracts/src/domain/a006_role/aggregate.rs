use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::AdminEntity;
use crate::shared::forms::{FieldDef, FieldErrors, FieldInput, FormModel, FormValues, ValidationRules};
use crate::shared::permissions::Permission;
use crate::shared::screen::Column;

/// Named bundle of permission tokens assigned to users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AdminEntity for Role {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn entity_index() -> &'static str {
        "a006"
    }

    fn resource() -> &'static str {
        "roles"
    }

    fn element_name() -> &'static str {
        "Role"
    }

    fn list_name() -> &'static str {
        "Roles"
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("name", "Name", |r: &Role| r.name.clone()),
            Column::text("description", "Description", |r: &Role| {
                r.description.clone().unwrap_or_default()
            }),
            Column::number("permissions", "Permissions", |r: &Role| {
                r.permissions.len().to_string()
            }),
        ]
    }

    fn search_text(&self) -> Vec<String> {
        let mut text = vec![self.name.clone(), self.description.clone().unwrap_or_default()];
        text.extend(self.permissions.iter().cloned());
        text
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RoleDto {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    /// Canonical `"<verb> <resource>"` tokens, deduplicated
    pub permissions: Vec<String>,
}

/// Canonicalize tokens typed into the role form; unknown spellings are errors.
pub fn parse_permission_list(raw: &[String]) -> Result<Vec<String>, String> {
    let mut tokens: Vec<String> = Vec::with_capacity(raw.len());
    let mut unknown = Vec::new();

    for item in raw {
        match Permission::parse(item) {
            Some(p) => {
                let token = p.token();
                if !tokens.contains(&token) {
                    tokens.push(token);
                }
            }
            None => unknown.push(item.as_str()),
        }
    }

    if unknown.is_empty() {
        Ok(tokens)
    } else {
        Err(format!("Unknown permission(s): {}", unknown.join(", ")))
    }
}

impl FormModel for Role {
    type Dto = RoleDto;

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("name", "Name", FieldInput::Text)
                .rules(ValidationRules::required().with_min_length(2).with_max_length(60)),
            FieldDef::new("description", "Description", FieldInput::Text)
                .rules(ValidationRules::none().with_max_length(255)),
            FieldDef::new("permissions", "Permissions", FieldInput::MultiText),
        ]
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with("name", &self.name)
            .with("description", self.description.clone().unwrap_or_default())
            .with("permissions", self.permissions.join(", "))
    }

    fn dto_from(values: &FormValues, id: Option<&str>) -> Result<Self::Dto, FieldErrors> {
        let permissions = parse_permission_list(&values.list("permissions"))
            .map_err(|e| FieldErrors::single("permissions", e))?;

        Ok(RoleDto {
            id: id.map(str::to_string),
            name: values.text("name"),
            description: values.opt_text("description"),
            permissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_canonicalized_and_deduplicated() {
        let values = FormValues::new().with("name", "HR").with(
            "permissions",
            "view employees, employees-view, leave-types-update, CREATE Employees",
        );
        let dto = Role::dto_from(&values, None).unwrap();
        assert_eq!(
            dto.permissions,
            vec!["view employees", "update leave-types", "create employees"]
        );
    }

    #[test]
    fn test_unknown_token_rejected() {
        let values = FormValues::new()
            .with("name", "HR")
            .with("permissions", "view employees, fly planes");
        let errors = Role::dto_from(&values, None).unwrap_err();
        assert_eq!(errors.get("permissions"), Some("Unknown permission(s): fly planes"));
    }

    #[test]
    fn test_search_includes_tokens() {
        let role = Role {
            id: "r1".into(),
            name: "Payroll clerk".into(),
            description: None,
            permissions: vec!["view payroll-runs".into()],
            updated_at: None,
        };
        assert!(role.search_text().iter().any(|t| t == "view payroll-runs"));
        assert_eq!(role.values().get("permissions"), "view payroll-runs");
    }
}

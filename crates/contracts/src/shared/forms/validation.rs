//! Validation rules for form fields

/// Validation rules for a field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    pub const fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub const fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub const fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Validate a string value against the rules.
    ///
    /// Length limits apply only to non-empty values; emptiness is the
    /// business of `required`.
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            if self.required {
                return Err(format!("{} is required", field_label));
            }
            return Ok(());
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!("{} must be at least {} characters", field_label, min));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!("{} must not exceed {} characters", field_label, max));
            }
        }

        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{} must be at least {}", field_label, min));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{} must not exceed {}", field_label, max));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        let rules = ValidationRules::required();
        assert!(rules.validate_string("  ", "Name").is_err());
        assert!(rules.validate_string("HR", "Name").is_ok());
        assert!(ValidationRules::none().validate_string("", "Name").is_ok());
    }

    #[test]
    fn test_lengths_count_chars() {
        let rules = ValidationRules::none().with_min_length(2).with_max_length(3);
        assert!(rules.validate_string("a", "Code").is_err());
        assert!(rules.validate_string("äöü", "Code").is_ok());
        assert!(rules.validate_string("abcd", "Code").is_err());
    }

    #[test]
    fn test_number_range() {
        let rules = ValidationRules::none().with_range(0.0, 365.0);
        assert!(rules.validate_number(-1.0, "Days").is_err());
        assert!(rules.validate_number(30.0, "Days").is_ok());
        assert_eq!(
            rules.validate_number(400.0, "Days"),
            Err("Days must not exceed 365".to_string())
        );
    }
}

//! Request validation with descriptive, field-scoped errors.
//!
//! Customer identity fields are free text and only checked for presence;
//! numeric inputs must be positive. Catalog membership is checked separately
//! at lookup time.

use std::fmt;

/// One failed check with an optional fix-it suggestion.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{label} must not be empty"))
            .with_suggestion(format!("Provide the customer's {}", label.to_lowercase()))
    }

    pub fn non_positive(field: &str, label: &str, value: f64) -> Self {
        Self::new(field, format!("{label} must be positive, got {value}"))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {suggestion}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Accumulates every failed check so the caller sees all problems at once.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_message(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn into_result(self) -> Result<(), String> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.to_message())
        }
    }
}

pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

pub fn validate_positive(value: f64, field: &str, label: &str, errors: &mut ValidationErrors) {
    if !(value > 0.0) {
        errors.add(ValidationError::non_positive(field, label, value));
    }
}

/// Optional override amounts must be positive when supplied.
pub fn validate_positive_override(
    value: Option<i64>,
    field: &str,
    label: &str,
    errors: &mut ValidationErrors,
) {
    if let Some(amount) = value {
        if amount <= 0 {
            errors.add(ValidationError::non_positive(field, label, amount as f64));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_whitespace() {
        let mut errors = ValidationErrors::new();
        validate_required("   ", "customer.name", "Customer name", &mut errors);
        assert!(!errors.is_empty());
        assert!(errors.to_message().contains("customer.name"));
    }

    #[test]
    fn positive_rejects_zero_and_nan() {
        let mut errors = ValidationErrors::new();
        validate_positive(0.0, "monthly_bill", "Monthly bill", &mut errors);
        validate_positive(f64::NAN, "roof_area_sqft", "Roof area", &mut errors);
        assert_eq!(errors.errors.len(), 2);
    }

    #[test]
    fn override_is_optional_but_must_be_positive() {
        let mut errors = ValidationErrors::new();
        validate_positive_override(None, "total_cost_override", "Total cost", &mut errors);
        assert!(errors.is_empty());
        validate_positive_override(Some(-5), "total_cost_override", "Total cost", &mut errors);
        assert!(!errors.is_empty());
    }

    #[test]
    fn messages_join_all_failures() {
        let mut errors = ValidationErrors::new();
        validate_required("", "customer.name", "Customer name", &mut errors);
        validate_positive(-1.0, "monthly_bill", "Monthly bill", &mut errors);
        let message = errors.into_result().unwrap_err();
        assert!(message.contains("customer.name"));
        assert!(message.contains("monthly_bill"));
    }
}

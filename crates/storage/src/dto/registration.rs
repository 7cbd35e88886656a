use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::trim_in_place;
use crate::models::{Event, Registration};

/// Form fields posted to `/event/{id}/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "name is required (max 100 characters)"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 50,
        message = "class_name is required (max 50 characters)"
    ))]
    pub class_name: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "year is required"),
        custom(function = "validate_year")
    )]
    pub year: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "roll_no is required (max 50 characters)"))]
    pub roll_no: String,
}

/// Form fields posted to `/event/{id}/unregister`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UnregisterForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "roll_no is required"))]
    pub roll_no: String,
}

/// A validated registration with its event snapshot, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub event_id: i64,
    pub event_name: String,
    pub council: String,
    pub name: String,
    pub class_name: String,
    pub year: i32,
    pub roll_no: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub registration: Registration,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationListResponse {
    pub success: bool,
    pub registrations: Vec<Registration>,
    pub total_registrations: usize,
}

fn validate_year(year: &str) -> Result<(), validator::ValidationError> {
    // Blank input is reported by the length rule.
    if year.is_empty() {
        return Ok(());
    }

    match year.parse::<i32>() {
        Ok(value) if value > 0 => Ok(()),
        _ => {
            let mut error = validator::ValidationError::new("invalid_year");
            error.message = Some("year must be a positive whole number".into());
            Err(error)
        }
    }
}

impl RegisterForm {
    pub fn normalized(mut self) -> Self {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.class_name);
        trim_in_place(&mut self.year);
        trim_in_place(&mut self.roll_no);
        self
    }

    /// Build the row to insert, snapshotting the event's name and council.
    /// Run after `validate()`.
    pub fn into_new_registration(self, event: &Event) -> Result<NewRegistration, &'static str> {
        let year = self
            .year
            .parse::<i32>()
            .ok()
            .filter(|year| *year > 0)
            .ok_or("year must be a positive whole number")?;

        Ok(NewRegistration {
            event_id: event.id,
            event_name: event.name.clone(),
            council: event.council.clone(),
            name: self.name,
            class_name: self.class_name,
            year,
            roll_no: self.roll_no,
        })
    }
}

impl UnregisterForm {
    pub fn normalized(mut self) -> Self {
        trim_in_place(&mut self.roll_no);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(year: &str) -> RegisterForm {
        RegisterForm {
            name: " Alice ".to_string(),
            class_name: "SE".to_string(),
            year: year.to_string(),
            roll_no: "R1 ".to_string(),
        }
    }

    #[test]
    fn normalizing_trims_every_field() {
        let form = form(" 3 ").normalized();

        assert_eq!(form.name, "Alice");
        assert_eq!(form.year, "3");
        assert_eq!(form.roll_no, "R1");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn non_numeric_year_is_a_validation_error() {
        let errors = form("abc").normalized().validate().unwrap_err();
        let year_errors = &errors.field_errors()["year"];

        assert_eq!(year_errors.len(), 1);
        assert_eq!(year_errors[0].code, "invalid_year");
    }

    #[test]
    fn zero_or_negative_year_is_rejected() {
        assert!(form("0").validate().is_err());
        assert!(form("-2").validate().is_err());
    }

    #[test]
    fn blank_year_reports_only_the_missing_value() {
        let errors = form("   ").normalized().validate().unwrap_err();
        let year_errors = &errors.field_errors()["year"];

        assert_eq!(year_errors.len(), 1);
        assert_eq!(year_errors[0].code, "length");
    }

    #[test]
    fn unregister_requires_roll_no() {
        let form = UnregisterForm {
            roll_no: "  ".to_string(),
        }
        .normalized();

        assert!(form.validate().is_err());
    }
}

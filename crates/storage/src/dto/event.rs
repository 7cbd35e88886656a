use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::trim_in_place;
use crate::models::Event;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Request payload for creating a new event.
///
/// Missing fields deserialize as empty strings so that they are reported by
/// validation rather than rejected by the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "name is required (max 100 characters)"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 100,
        message = "council is required (max 100 characters)"
    ))]
    pub council: String,

    #[serde(default)]
    #[validate(custom(function = "validate_iso_date"))]
    pub start_date: String,

    #[serde(default)]
    #[validate(custom(function = "validate_iso_date"))]
    pub end_date: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "venue is required (max 100 characters)"))]
    pub venue: String,
}

/// A validated event ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub name: String,
    pub council: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub venue: String,
}

/// Event as exposed over the API, with its registration window state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub id: i64,
    pub name: String,
    pub council: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub venue: String,
    pub created_at: NaiveDateTime,
    pub registration_open: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventListResponse {
    pub success: bool,
    pub events: Vec<EventResponse>,
    pub total_events: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventEnvelope {
    pub success: bool,
    pub event: EventResponse,
}

fn validate_iso_date(value: &str) -> Result<(), validator::ValidationError> {
    if parse_iso_date(value).is_some() {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("invalid_date");
        error.message = Some("must be a date in YYYY-MM-DD format".into());
        Err(error)
    }
}

/// Strict `YYYY-MM-DD`: zero padded, so string order matches date order.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

impl CreateEventRequest {
    /// Strip surrounding whitespace from every field.
    pub fn normalized(mut self) -> Self {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.council);
        trim_in_place(&mut self.start_date);
        trim_in_place(&mut self.end_date);
        trim_in_place(&mut self.venue);
        self
    }

    /// Cross-field checks and date parsing; run after `validate()`.
    pub fn into_new_event(self) -> Result<NewEvent, &'static str> {
        let start_date =
            parse_iso_date(&self.start_date).ok_or("start_date must be a date in YYYY-MM-DD format")?;
        let end_date =
            parse_iso_date(&self.end_date).ok_or("end_date must be a date in YYYY-MM-DD format")?;

        if end_date < start_date {
            return Err("End date must be on or after start date");
        }

        Ok(NewEvent {
            name: self.name,
            council: self.council,
            start_date,
            end_date,
            venue: self.venue,
        })
    }
}

impl EventResponse {
    pub fn from_event(event: Event, today: NaiveDate) -> Self {
        let registration_open = event.is_registration_open(today);
        Self {
            id: event.id,
            name: event.name,
            council: event.council,
            start_date: event.start_date,
            end_date: event.end_date,
            venue: event.venue,
            created_at: event.created_at,
            registration_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateEventRequest {
        CreateEventRequest {
            name: "Tech Symposium".to_string(),
            council: "IEEE Student Council".to_string(),
            start_date: "2025-11-15".to_string(),
            end_date: "2025-11-16".to_string(),
            venue: "College Auditorium".to_string(),
        }
    }

    #[test]
    fn complete_request_is_valid() {
        let req = request();
        assert!(req.validate().is_ok());

        let new_event = req.into_new_event().unwrap();
        assert_eq!(new_event.start_date, NaiveDate::from_ymd_opt(2025, 11, 15).unwrap());
    }

    #[test]
    fn blank_fields_fail_after_normalizing() {
        let req = CreateEventRequest {
            venue: "   ".to_string(),
            ..request()
        }
        .normalized();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("venue"));
    }

    #[test]
    fn each_missing_field_is_reported() {
        let errors = CreateEventRequest::default().validate().unwrap_err();
        let fields = errors.field_errors();

        for field in ["name", "council", "start_date", "end_date", "venue"] {
            assert!(fields.contains_key(field), "{field} should be reported");
        }
    }

    #[test]
    fn rejects_unpadded_or_malformed_dates() {
        assert!(parse_iso_date("2025-1-05").is_none());
        assert!(parse_iso_date("15/11/2025").is_none());
        assert!(parse_iso_date("2025-02-30").is_none());
        assert!(parse_iso_date("2025-02-28").is_some());
    }

    #[test]
    fn rejects_end_before_start() {
        let req = CreateEventRequest {
            start_date: "2025-11-16".to_string(),
            end_date: "2025-11-15".to_string(),
            ..request()
        };

        assert_eq!(
            req.into_new_event().unwrap_err(),
            "End date must be on or after start date"
        );
    }
}

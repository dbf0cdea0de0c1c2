use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use crate::{CoreError, CoreResult};

/// Shown to the guest when a required field is absent or empty.
pub const INCOMPLETE_FIELDS_MESSAGE: &str = "Пожалуйста, заполните все поля";
/// Shown to the guest when the guest count is not a whole positive number.
pub const INVALID_GUESTS_MESSAGE: &str = "Некорректное количество гостей";

/// A table reservation as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub guests: u32,
    pub date: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated booking that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub name: String,
    pub phone: String,
    pub guests: u32,
    pub date: String,
    pub time: String,
}

/// Guest count as it arrives on the wire: JSON clients send a number,
/// HTML forms send text.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GuestCount {
    Number(f64),
    Text(String),
}

impl GuestCount {
    /// `Ok(None)` means the value counts as missing (zero or empty).
    pub fn resolve(&self) -> CoreResult<Option<u32>> {
        match self {
            GuestCount::Number(n) if *n == 0.0 => Ok(None),
            GuestCount::Number(n) => {
                if n.fract() != 0.0 || *n < 0.0 || *n > f64::from(u32::MAX) {
                    return Err(invalid_guests());
                }
                Ok(Some(*n as u32))
            }
            GuestCount::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                match s.parse::<u32>() {
                    Ok(0) => Ok(None),
                    Ok(n) => Ok(Some(n)),
                    Err(_) => Err(invalid_guests()),
                }
            }
        }
    }
}

/// Raw booking form as posted by the landing page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookingSubmission {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub guests: Option<GuestCount>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl BookingSubmission {
    /// Checks that all five fields are present and non-empty. A zero guest
    /// count is treated the same as a missing one. Date and time are free text.
    pub fn validate(self) -> CoreResult<NewBooking> {
        let guests = self
            .guests
            .as_ref()
            .map(GuestCount::resolve)
            .transpose()
            .map(Option::flatten);

        match (
            required(self.name),
            required(self.phone),
            guests,
            required(self.date),
            required(self.time),
        ) {
            (Some(name), Some(phone), Ok(Some(guests)), Some(date), Some(time)) => Ok(NewBooking {
                name,
                phone,
                guests,
                date,
                time,
            }),
            // Incomplete forms are reported before a malformed guest count.
            (Some(_), Some(_), Err(e), Some(_), Some(_)) => Err(e),
            _ => Err(CoreError::ValidationError(INCOMPLETE_FIELDS_MESSAGE.to_string())),
        }
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn invalid_guests() -> CoreError {
    CoreError::ValidationError(INVALID_GUESTS_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> BookingSubmission {
        BookingSubmission {
            name: Some("Ann".to_string()),
            phone: Some("12345".to_string()),
            guests: Some(GuestCount::Number(2.0)),
            date: Some("2024-05-01".to_string()),
            time: Some("19:00".to_string()),
        }
    }

    fn assert_incomplete(result: CoreResult<NewBooking>) {
        match result {
            Err(CoreError::ValidationError(msg)) => assert_eq!(msg, INCOMPLETE_FIELDS_MESSAGE),
            other => panic!("expected incomplete-fields error, got {:?}", other),
        }
    }

    #[test]
    fn test_complete_submission_validates() {
        let booking = complete().validate().unwrap();
        assert_eq!(booking.name, "Ann");
        assert_eq!(booking.phone, "12345");
        assert_eq!(booking.guests, 2);
        assert_eq!(booking.date, "2024-05-01");
        assert_eq!(booking.time, "19:00");
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        let mut s = complete();
        s.name = None;
        assert_incomplete(s.validate());

        let mut s = complete();
        s.phone = Some(String::new());
        assert_incomplete(s.validate());

        let mut s = complete();
        s.guests = None;
        assert_incomplete(s.validate());

        let mut s = complete();
        s.date = None;
        assert_incomplete(s.validate());

        let mut s = complete();
        s.time = Some(String::new());
        assert_incomplete(s.validate());
    }

    #[test]
    fn test_zero_guests_counts_as_missing() {
        let mut s = complete();
        s.guests = Some(GuestCount::Number(0.0));
        assert_incomplete(s.validate());

        let mut s = complete();
        s.guests = Some(GuestCount::Text("0".to_string()));
        assert_incomplete(s.validate());
    }

    #[test]
    fn test_guests_from_form_text() {
        let mut s = complete();
        s.guests = Some(GuestCount::Text(" 4 ".to_string()));
        assert_eq!(s.validate().unwrap().guests, 4);
    }

    #[test]
    fn test_malformed_guests_rejected() {
        for bad in [GuestCount::Number(2.5), GuestCount::Number(-3.0), GuestCount::Text("many".to_string())] {
            let mut s = complete();
            s.guests = Some(bad);
            match s.validate() {
                Err(CoreError::ValidationError(msg)) => assert_eq!(msg, INVALID_GUESTS_MESSAGE),
                other => panic!("expected invalid guests error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_large_guest_counts_up_to_u32_max() {
        let mut s = complete();
        s.guests = Some(GuestCount::Number(3_000_000_000.0));
        assert_eq!(s.validate().unwrap().guests, 3_000_000_000);

        let mut s = complete();
        s.guests = Some(GuestCount::Number(f64::from(u32::MAX)));
        assert_eq!(s.validate().unwrap().guests, u32::MAX);

        let mut s = complete();
        s.guests = Some(GuestCount::Number(f64::from(u32::MAX) + 1.0));
        match s.validate() {
            Err(CoreError::ValidationError(msg)) => assert_eq!(msg, INVALID_GUESTS_MESSAGE),
            other => panic!("expected invalid guests error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_reported_before_bad_guests() {
        let mut s = complete();
        s.name = None;
        s.guests = Some(GuestCount::Text("many".to_string()));
        assert_incomplete(s.validate());
    }

    #[test]
    fn test_date_and_time_are_not_format_checked() {
        let mut s = complete();
        s.date = Some("next friday".to_string());
        s.time = Some("evening".to_string());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_submission_deserializes_number_or_string_guests() {
        let json: BookingSubmission = serde_json::from_str(
            r#"{"name":"Ann","phone":"1","guests":3,"date":"d","time":"t"}"#,
        ).unwrap();
        assert_eq!(json.guests, Some(GuestCount::Number(3.0)));

        let text: BookingSubmission = serde_json::from_str(
            r#"{"name":"Ann","phone":"1","guests":"3","date":"d","time":"t"}"#,
        ).unwrap();
        assert_eq!(text.guests, Some(GuestCount::Text("3".to_string())));

        let partial: BookingSubmission = serde_json::from_str(r#"{"name":"Ann"}"#).unwrap();
        assert!(partial.guests.is_none());
        assert!(partial.phone.is_none());
    }
}

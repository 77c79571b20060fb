/// Appointment domain type
use crate::types::Record;
use crate::validation::{rules, Checker, Schema, Validated};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

string_enum! {
    #[derive(Default)]
    pub enum AppointmentStatus {
        #[default]
        Pending => "Pending",
        Confirmed => "Confirmed",
        Cancelled => "Cancelled",
    }
}

/// A dated meeting with a start and end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub title: String,
    pub start_date: NaiveDate,
    /// `HH:MM`
    pub start_time: String,
    pub end_date: NaiveDate,
    /// `HH:MM`
    pub end_time: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
    pub status: AppointmentStatus,
}

/// Attendees arrive either as a list or as one comma-separated string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attendees {
    List(Vec<String>),
    Text(String),
}

impl Attendees {
    fn into_names(self) -> Vec<String> {
        let raw = match self {
            Attendees::List(names) => names,
            Attendees::Text(text) => text.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Appointment as submitted by a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentInput {
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub attendees: Option<Attendees>,
    pub reminder: Option<String>,
    pub status: Option<String>,
}

impl Schema for Appointment {
    type Input = AppointmentInput;

    fn parse(input: AppointmentInput) -> Validated<Self> {
        let mut checker = Checker::new();

        let title = checker.field("title", rules::required(input.title));
        let start_date = checker.field(
            "startDate",
            rules::required(input.start_date).and_then(rules::date),
        );
        let start_time = checker.field(
            "startTime",
            rules::required(input.start_time).and_then(rules::time_of_day),
        );
        let end_date = checker.field(
            "endDate",
            rules::required(input.end_date).and_then(rules::date),
        );
        let end_time = checker.field(
            "endTime",
            rules::required(input.end_time).and_then(rules::time_of_day),
        );
        let location = checker.field("location", rules::required(input.location));
        let status = checker.field(
            "status",
            match rules::optional(input.status) {
                Some(raw) => rules::one_of::<AppointmentStatus>(raw),
                None => Ok(AppointmentStatus::default()),
            },
        );

        if let (Some(sd), Some(st), Some(ed), Some(et)) =
            (&start_date, &start_time, &end_date, &end_time)
        {
            let starts = sd.and_time(clock(st));
            let ends = ed.and_time(clock(et));
            checker.ensure("endDate", ends >= starts, "End must not be before start");
        }

        let description = rules::optional(input.description);
        let attendees = input.attendees.map(Attendees::into_names).unwrap_or_default();
        let reminder = rules::optional(input.reminder);

        checker.build(|| {
            Some(Appointment {
                title: title?,
                start_date: start_date?,
                start_time: start_time?,
                end_date: end_date?,
                end_time: end_time?,
                location: location?,
                description,
                attendees,
                reminder,
                status: status?,
            })
        })
    }
}

/// Times reaching here were already normalised by `rules::time_of_day`
fn clock(hh_mm: &str) -> NaiveTime {
    NaiveTime::parse_from_str(hh_mm, "%H:%M").unwrap_or(NaiveTime::MIN)
}

impl Record for Appointment {
    const COLLECTION: &'static str = "appointments";
    const KIND: &'static str = "Appointment";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> AppointmentInput {
        AppointmentInput {
            title: Some("Dentist".into()),
            start_date: Some("2025-04-10".into()),
            start_time: Some("09:00".into()),
            end_date: Some("2025-04-10".into()),
            end_time: Some("09:45".into()),
            location: Some("Main St".into()),
            description: None,
            attendees: Some(Attendees::Text("Ana, Bo , ".into())),
            reminder: Some("1h".into()),
            status: None,
        }
    }

    #[test]
    fn test_parse_splits_attendee_text() {
        let appointment = Appointment::parse(valid_input()).unwrap();
        assert_eq!(appointment.attendees, vec!["Ana", "Bo"]);
        assert_eq!(appointment.status, AppointmentStatus::Pending);
    }

    #[test]
    fn test_parse_rejects_end_before_start() {
        let input = AppointmentInput {
            end_time: Some("08:00".into()),
            ..valid_input()
        };
        assert!(Appointment::parse(input).unwrap_err().has_field("endDate"));
    }

    #[test]
    fn test_status_is_case_sensitive() {
        let input = AppointmentInput {
            status: Some("confirmed".into()),
            ..valid_input()
        };
        assert!(Appointment::parse(input).unwrap_err().has_field("status"));
    }

    #[test]
    fn test_attendee_list_accepted_from_json() {
        let input: AppointmentInput = serde_json::from_value(serde_json::json!({
            "title": "Standup",
            "startDate": "2025-04-10",
            "startTime": "10:00",
            "endDate": "2025-04-10",
            "endTime": "10:15",
            "location": "Room 4",
            "attendees": ["Kim", "Lee"],
            "status": "Confirmed"
        }))
        .unwrap();
        let appointment = Appointment::parse(input).unwrap();
        assert_eq!(appointment.attendees.len(), 2);
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
    }
}

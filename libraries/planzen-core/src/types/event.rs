/// Event domain type
use crate::types::Record;
use crate::validation::{rules, Checker, Schema, Validated};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    pub enum EventType {
        Conference => "conference",
        Workshop => "workshop",
        Meetup => "meetup",
        Party => "party",
    }
}

/// A scheduled gathering with limited capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub reminder: bool,
    pub organizer: String,
    pub capacity: u32,
    /// Never exceeds `capacity`
    pub registered_attendees: u32,
}

/// Event as submitted by a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventInput {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub reminder: Option<bool>,
    pub organizer: Option<String>,
    pub capacity: Option<i64>,
    pub registered_attendees: Option<i64>,
}

fn count(value: Option<i64>) -> Result<u32, String> {
    let value = value.ok_or_else(|| "Required".to_string())?;
    u32::try_from(value).map_err(|_| format!("Must be a non-negative number, got {}", value))
}

impl Schema for Event {
    type Input = EventInput;

    fn parse(input: EventInput) -> Validated<Self> {
        let mut checker = Checker::new();

        let name = checker.field("name", rules::required(input.name));
        let start_time = checker.field(
            "startTime",
            rules::required(input.start_time).and_then(rules::timestamp),
        );
        let end_time = checker.field(
            "endTime",
            rules::required(input.end_time).and_then(rules::timestamp),
        );
        let location = checker.field("location", rules::required(input.location));
        let event_type = checker.field(
            "type",
            rules::required(input.event_type).and_then(rules::one_of::<EventType>),
        );
        let organizer = checker.field("organizer", rules::required(input.organizer));
        let capacity = checker.field("capacity", count(input.capacity));
        let registered_attendees =
            checker.field("registeredAttendees", count(input.registered_attendees));

        if let (Some(start), Some(end)) = (&start_time, &end_time) {
            checker.ensure("endTime", end >= start, "End must not be before start");
        }
        if let (Some(capacity), Some(registered)) = (&capacity, &registered_attendees) {
            checker.ensure(
                "registeredAttendees",
                registered <= capacity,
                format!("Cannot exceed capacity of {}", capacity),
            );
        }

        let description = rules::optional(input.description);
        let reminder = input.reminder.unwrap_or(false);

        checker.build(|| {
            Some(Event {
                name: name?,
                start_time: start_time?,
                end_time: end_time?,
                location: location?,
                description,
                event_type: event_type?,
                reminder,
                organizer: organizer?,
                capacity: capacity?,
                registered_attendees: registered_attendees?,
            })
        })
    }
}

impl Record for Event {
    const COLLECTION: &'static str = "events";
    const KIND: &'static str = "Event";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> EventInput {
        EventInput {
            name: Some("RustConf".into()),
            start_time: Some("2025-09-01T09:00:00Z".into()),
            end_time: Some("2025-09-03T17:00:00Z".into()),
            location: Some("Portland".into()),
            description: None,
            event_type: Some("conference".into()),
            reminder: None,
            organizer: Some("Rust Foundation".into()),
            capacity: Some(500),
            registered_attendees: Some(500),
        }
    }

    #[test]
    fn test_parse_full_capacity_is_allowed() {
        let event = Event::parse(valid_input()).unwrap();
        assert_eq!(event.registered_attendees, event.capacity);
        assert!(!event.reminder);
    }

    #[test]
    fn test_parse_rejects_overbooking() {
        let input = EventInput {
            registered_attendees: Some(501),
            ..valid_input()
        };
        let errors = Event::parse(input).unwrap_err();
        assert!(errors.has_field("registeredAttendees"));
    }

    #[test]
    fn test_parse_rejects_negative_capacity() {
        let input = EventInput {
            capacity: Some(-1),
            ..valid_input()
        };
        assert!(Event::parse(input).unwrap_err().has_field("capacity"));
    }

    #[test]
    fn test_type_field_name_on_the_wire() {
        let event = Event::parse(valid_input()).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "conference");
        assert_eq!(json["registeredAttendees"], 500);
    }
}

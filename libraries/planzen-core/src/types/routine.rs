/// Routine domain type
use crate::types::Record;
use crate::validation::{rules, Checker, Schema, Validated};
use serde::{Deserialize, Serialize};

/// Highest weekday index (0 = Sunday ... 6 = Saturday)
pub const MAX_WEEKDAY: i64 = 6;

string_enum! {
    /// How often a routine repeats
    pub enum Frequency {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
    }
}

string_enum! {
    #[derive(Default)]
    pub enum RoutineStatus {
        #[default]
        Active => "active",
        Inactive => "inactive",
    }
}

/// A recurring block of time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub name: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub frequency: Frequency,
    /// Sorted, deduplicated weekday indices in `0..=6`
    pub days_of_week: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub reminder: bool,
    pub status: RoutineStatus,
}

/// Routine as submitted by a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutineInput {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub frequency: Option<String>,
    pub days_of_week: Option<Vec<i64>>,
    pub description: Option<String>,
    pub reminder: Option<bool>,
    pub status: Option<String>,
}

fn weekdays(days: Option<Vec<i64>>) -> Result<Vec<u8>, String> {
    let mut parsed = Vec::new();
    for day in days.unwrap_or_default() {
        let index = u8::try_from(day)
            .ok()
            .filter(|d| i64::from(*d) <= MAX_WEEKDAY)
            .ok_or_else(|| format!("Day {} is outside 0..={}", day, MAX_WEEKDAY))?;
        parsed.push(index);
    }
    parsed.sort_unstable();
    parsed.dedup();
    Ok(parsed)
}

impl Schema for Routine {
    type Input = RoutineInput;

    fn parse(input: RoutineInput) -> Validated<Self> {
        let mut checker = Checker::new();

        let name = checker.field("name", rules::required(input.name));
        let start_time = checker.field(
            "startTime",
            rules::required(input.start_time).and_then(rules::time_of_day),
        );
        let end_time = checker.field(
            "endTime",
            rules::required(input.end_time).and_then(rules::time_of_day),
        );
        let frequency = checker.field(
            "frequency",
            rules::required(input.frequency).and_then(rules::one_of::<Frequency>),
        );
        let days_of_week = checker.field("daysOfWeek", weekdays(input.days_of_week));
        let reminder = checker.field(
            "reminder",
            input.reminder.ok_or_else(|| "Required".to_string()),
        );
        let status = checker.field(
            "status",
            match rules::optional(input.status) {
                Some(raw) => rules::one_of::<RoutineStatus>(raw),
                None => Ok(RoutineStatus::default()),
            },
        );
        let description = rules::optional(input.description);

        checker.build(|| {
            Some(Routine {
                name: name?,
                start_time: start_time?,
                end_time: end_time?,
                frequency: frequency?,
                days_of_week: days_of_week?,
                description,
                reminder: reminder?,
                status: status?,
            })
        })
    }
}

impl Record for Routine {
    const COLLECTION: &'static str = "routines";
    const KIND: &'static str = "Routine";
}

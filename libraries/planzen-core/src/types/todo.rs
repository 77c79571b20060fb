/// Todo domain type
use crate::types::Record;
use crate::validation::{rules, Checker, Schema, Validated};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    /// How urgent a todo is
    pub enum Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

string_enum! {
    /// Progress of a todo
    pub enum TodoStatus {
        Pending => "pending",
        InProgress => "in progress",
        Completed => "completed",
    }
}

/// A single task with a due date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    pub category: String,
    pub status: TodoStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
}

/// Todo as submitted by a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TodoInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub reminder: Option<String>,
}

impl Schema for Todo {
    type Input = TodoInput;

    fn parse(input: TodoInput) -> Validated<Self> {
        let mut checker = Checker::new();

        let name = checker.field("name", rules::required(input.name));
        let due_date = checker.field(
            "dueDate",
            rules::required(input.due_date).and_then(rules::timestamp),
        );
        let priority = checker.field(
            "priority",
            rules::required(input.priority).and_then(rules::one_of::<Priority>),
        );
        let category = checker.field("category", rules::required(input.category));
        let status = checker.field(
            "status",
            rules::required(input.status).and_then(rules::one_of::<TodoStatus>),
        );
        let description = rules::optional(input.description);
        let reminder = rules::optional(input.reminder);

        checker.build(|| {
            Some(Todo {
                name: name?,
                description,
                due_date: due_date?,
                priority: priority?,
                category: category?,
                status: status?,
                reminder,
            })
        })
    }
}

impl Record for Todo {
    const COLLECTION: &'static str = "todos";
    const KIND: &'static str = "Todo";
}

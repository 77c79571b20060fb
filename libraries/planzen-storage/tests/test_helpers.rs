//! Test helpers and fixtures for storage integration tests
//!
//! Databases are real SQLite files in a temp dir so migrations, constraints
//! and the pool's multiple connections all behave as in production.

#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use planzen_core::types::{Email, NewUser, Priority, Role, Todo, TodoStatus};
use planzen_storage::Database;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub db: Database,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let db = Database::connect(&db_url)
            .await
            .expect("Failed to open database");

        Self {
            db,
            _temp_dir: temp_dir,
        }
    }
}

/// Test fixture: a registrable user
pub fn new_user(email: &str) -> NewUser {
    NewUser {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: Email::parse(email).expect("valid email"),
        password_hash: "$2b$04$not-a-real-hash".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
        role: Role::User,
    }
}

/// Test fixture: a todo due on the given day of March 2025
pub fn todo(name: &str, day: u32) -> Todo {
    Todo {
        name: name.to_string(),
        description: None,
        due_date: Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap(),
        priority: Priority::Medium,
        category: "work".to_string(),
        status: TodoStatus::Pending,
        reminder: None,
    }
}

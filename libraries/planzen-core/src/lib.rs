//! PlanZen Core
//!
//! Platform-agnostic domain records, validation and storage contracts for PlanZen.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Todo`, `Routine`, `Appointment`, `Event` and the
//!   `Document` envelope every stored record travels in
//! - **Validation**: the [`Schema`] trait plus a [`Checker`] that collects field
//!   errors, so raw request bodies are parsed into typed records in one step
//! - **Storage**: the [`Storage`] trait implemented by `planzen-storage`
//! - **Error Handling**: unified `PlanZenError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use planzen_core::auth::{Credentials, CredentialsInput};
//! use planzen_core::Schema;
//!
//! let credentials = Credentials::parse(CredentialsInput {
//!     email: Some("  Ada@Example.com ".into()),
//!     password: Some("Secret123!".into()),
//! })
//! .unwrap();
//!
//! assert_eq!(credentials.email.as_str(), "ada@example.com");
//! ```

#![forbid(unsafe_code)]

pub mod auth;
pub mod error;
pub mod storage;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{PlanZenError, Result};
pub use storage::Storage;
pub use validation::{Checker, FieldError, Schema, Validated, ValidationErrors};

pub use types::{
    // Envelope
    Document, DocumentId, Record, Timestamped,
    // Users
    Email, FederatedIdentity, NewUser, Role, TokenGrant, User, UserId, UserProfile,
    // Records
    Appointment, AppointmentInput, AppointmentStatus, Event, EventInput, EventType, Frequency,
    Priority, Routine, RoutineInput, RoutineStatus, Todo, TodoInput, TodoStatus,
};

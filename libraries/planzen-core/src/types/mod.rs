//! Domain types for PlanZen

/// Declares a closed set of string-valued variants with `as_str`, `Display`,
/// `FromStr` and serde support, all agreeing on the same spelling.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $text)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(
                        "Must be one of {}, got '{}'",
                        [$($text),+].join(", "),
                        other
                    )),
                }
            }
        }
    };
}

mod appointment;
mod document;
mod event;
mod ids;
mod routine;
mod todo;
mod user;

pub use appointment::{Appointment, AppointmentInput, AppointmentStatus, Attendees};
pub use document::{Document, Record, Timestamped};
pub use event::{Event, EventInput, EventType};
pub use ids::{DocumentId, UserId};
pub use routine::{Frequency, Routine, RoutineInput, RoutineStatus};
pub use todo::{Priority, Todo, TodoInput, TodoStatus};
pub use user::{Email, FederatedIdentity, NewUser, Role, TokenGrant, User, UserProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults() {
        assert_eq!(Role::default(), Role::User);
        assert_eq!(RoutineStatus::default(), RoutineStatus::Active);
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Pending);
    }

    #[test]
    fn test_string_enum_round_trips_spelling() {
        for status in AppointmentStatus::ALL {
            assert_eq!(status.as_str().parse::<AppointmentStatus>(), Ok(*status));
        }
        assert!("pending".parse::<AppointmentStatus>().is_err());
    }
}

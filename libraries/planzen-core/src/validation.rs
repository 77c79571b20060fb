//! Parse-don't-validate building blocks.
//!
//! A [`Schema`] turns a loosely-typed input shape (usually a request body where
//! every field is optional) into a typed record. Parsing never panics and never
//! stops at the first problem: a [`Checker`] records every failing field and the
//! caller gets back either the finished record or the full list of
//! [`FieldError`]s.
//!
//! ```rust
//! use planzen_core::validation::{rules, Checker, Validated};
//!
//! fn parse_name(raw: Option<String>) -> Validated<String> {
//!     let mut checker = Checker::new();
//!     let name = checker.field("name", rules::required(raw).and_then(rules::min_chars(2)));
//!     checker.build(|| name)
//! }
//!
//! assert!(parse_name(Some("Al".into())).is_ok());
//! assert!(parse_name(Some(" ".into())).is_err());
//! ```

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Outcome of parsing: the typed value or every field problem found
pub type Validated<T> = std::result::Result<T, ValidationErrors>;

/// A single field that failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field problems found while parsing one input
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// An error list holding exactly one field problem
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field: field.into(),
            message: message.into(),
        }])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether any error was recorded against `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A parser from a raw input shape into `Self`
pub trait Schema: Sized {
    /// Loosely-typed shape accepted off the wire
    type Input: DeserializeOwned + Send;

    /// Parse `input`, returning every field problem on failure
    fn parse(input: Self::Input) -> Validated<Self>;
}

/// Collects field outcomes while a schema is being parsed
#[derive(Debug, Default)]
pub struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of parsing one field, keeping the value on success
    pub fn field<T>(&mut self, name: &str, outcome: Result<T, String>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(message) => {
                self.push(name, message);
                None
            }
        }
    }

    /// Record `message` against `name` unless `holds` is true
    pub fn ensure(&mut self, name: &str, holds: bool, message: impl Into<String>) {
        if !holds {
            self.push(name, message);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Finish parsing.
    ///
    /// `make` is only called when no field failed; it assembles the record from
    /// the `Option`s returned by [`Checker::field`], typically with `?`.
    pub fn build<T>(self, make: impl FnOnce() -> Option<T>) -> Validated<T> {
        if !self.errors.is_empty() {
            return Err(ValidationErrors(self.errors));
        }
        make().ok_or_else(|| ValidationErrors::single("input", "Incomplete input"))
    }

    fn push(&mut self, name: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: name.to_string(),
            message: message.into(),
        });
    }
}

/// Field rules.
///
/// Each rule is a plain function (or returns one) so rules chain with
/// `Result::and_then`.
pub mod rules {
    use crate::types::Email;
    use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
    use std::str::FromStr;

    /// Trimmed, non-empty string
    pub fn required(value: Option<String>) -> Result<String, String> {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err("Required".to_string()),
        }
    }

    /// Like [`required`] but without trimming (passwords)
    pub fn required_raw(value: Option<String>) -> Result<String, String> {
        match value {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err("Required".to_string()),
        }
    }

    /// Trimmed string, with blanks collapsed to `None`
    pub fn optional(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// At least `min` characters
    pub fn min_chars(min: usize) -> impl Fn(String) -> Result<String, String> {
        move |value| {
            if value.chars().count() >= min {
                Ok(value)
            } else {
                Err(format!("Must be at least {} characters", min))
            }
        }
    }

    pub fn email(value: String) -> Result<Email, String> {
        Email::parse(&value)
    }

    /// One of the textual forms accepted by `T::from_str`
    pub fn one_of<T>(value: String) -> Result<T, String>
    where
        T: FromStr<Err = String>,
    {
        T::from_str(&value)
    }

    /// RFC 3339 timestamp, or a bare `YYYY-MM-DD` date taken as midnight UTC
    pub fn timestamp(value: String) -> Result<DateTime<Utc>, String> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&value) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .ok_or_else(|| format!("Invalid date/time '{}'", value))
    }

    /// `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp
    pub fn date(value: String) -> Result<NaiveDate, String> {
        if let Ok(date) = NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(&value)
            .map(|dt| dt.date_naive())
            .map_err(|_| format!("Invalid date '{}'", value))
    }

    /// 24-hour `HH:MM`, normalised to two-digit fields
    pub fn time_of_day(value: String) -> Result<String, String> {
        NaiveTime::parse_from_str(&value, "%H:%M")
            .map(|t| t.format("%H:%M").to_string())
            .map_err(|_| format!("Invalid time '{}', expected HH:MM", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checker_collects_every_failure() {
        let mut checker = Checker::new();
        let a = checker.field("a", rules::required(None));
        let b = checker.field("b", rules::required(Some("ok".into())));
        let c = checker.field("c", rules::required(Some("x".into())).and_then(rules::min_chars(3)));

        let result = checker.build(|| Some((a?, b?, c?)));
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("a"));
        assert!(errors.has_field("c"));
        assert!(!errors.has_field("b"));
    }

    #[test]
    fn test_checker_ensure() {
        let mut checker = Checker::new();
        checker.ensure("confirm", false, "Passwords don't match");
        assert!(checker.has_errors());
        let errors = checker.build(|| Some(())).unwrap_err();
        assert_eq!(errors.to_string(), "confirm: Passwords don't match");
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(rules::required(Some("  hi ".into())).unwrap(), "hi");
        assert!(rules::required(Some("   ".into())).is_err());
        assert_eq!(rules::required_raw(Some(" pw ".into())).unwrap(), " pw ");
    }

    #[test]
    fn test_optional_blank_is_none() {
        assert_eq!(rules::optional(Some("  ".into())), None);
        assert_eq!(rules::optional(Some(" note ".into())), Some("note".to_string()));
    }

    #[test]
    fn test_timestamp_accepts_date_and_rfc3339() {
        let a = rules::timestamp("2024-05-01".into()).unwrap();
        let b = rules::timestamp("2024-05-01T00:00:00Z".into()).unwrap();
        assert_eq!(a, b);
        assert!(rules::timestamp("tomorrow".into()).is_err());
    }

    #[test]
    fn test_time_of_day_normalises() {
        assert_eq!(rules::time_of_day("7:05".into()).unwrap(), "07:05");
        assert!(rules::time_of_day("25:00".into()).is_err());
    }
}

//! Column encodings shared by the vertical slices

use crate::error::{Result, StorageError};
use chrono::{DateTime, SecondsFormat, Utc};

/// Fixed-width RFC 3339 with nanoseconds, so text order matches time order
pub(crate) fn encode_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn decode_time(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::corrupt(format!("timestamp '{}': {}", raw, e)))
}

pub(crate) fn decode_optional_time(raw: Option<String>) -> Result<Option<DateTime<Utc>>> {
    raw.as_deref().map(decode_time).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_round_trip_is_lossless() {
        let now = Utc::now();
        assert_eq!(decode_time(&encode_time(now)).unwrap(), now);
    }

    #[test]
    fn test_encoded_times_sort_chronologically() {
        let earlier = DateTime::parse_from_rfc3339("2025-01-01T09:59:59.9Z")
            .unwrap()
            .with_timezone(&Utc);
        let later = DateTime::parse_from_rfc3339("2025-01-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(encode_time(earlier) < encode_time(later));
    }
}

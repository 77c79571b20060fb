/// Stored-document envelope shared by every per-user collection
use crate::types::{DocumentId, UserId};
use crate::validation::Schema;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A record kind that lives in its own collection
///
/// The record itself is the parsed output of its [`Schema`], so anything that
/// reaches storage has already been validated.
pub trait Record: Schema + Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, also used as the API path segment (`todos`)
    const COLLECTION: &'static str;

    /// Human-readable kind used in messages (`Todo`)
    const KIND: &'static str;
}

/// Records that carry an `updatedAt` timestamp
///
/// `before_save` is the explicit pre-write step: storage calls it on every
/// insert and update instead of relying on hooks hidden in the model.
pub trait Timestamped: Sized {
    #[must_use]
    fn before_save(self, now: DateTime<Utc>) -> Self;
}

/// A record as stored: server-assigned identity, owner and timestamps
/// around the flattened record fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<T> {
    pub id: DocumentId,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: T,
}

impl<T> Document<T> {
    /// Wrap a freshly parsed record for its first write
    pub fn new(owner_id: UserId, record: T, now: DateTime<Utc>) -> Self {
        Self {
            id: DocumentId::generate(),
            owner_id,
            created_at: now,
            updated_at: now,
            record,
        }
    }

    /// Replace the record fields, keeping identity and creation time
    #[must_use]
    pub fn with_record(self, record: T) -> Self {
        Self { record, ..self }
    }
}

impl<T> Timestamped for Document<T> {
    fn before_save(self, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: now,
            ..self
        }
    }
}

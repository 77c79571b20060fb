//! Client-side cache of one record collection
//!
//! State changes only through [`reduce`], which takes the current snapshot
//! and an action and returns the next snapshot. Nothing here does I/O; the
//! async side lives in [`crate::slice`].

use planzen_core::{Document, DocumentId};

/// Where the last async operation on a slice stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliceStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Snapshot of a slice
#[derive(Debug, Clone, PartialEq)]
pub struct SliceState<T> {
    pub items: Vec<Document<T>>,
    pub status: SliceStatus,
    pub error: Option<String>,
}

impl<T> Default for SliceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: SliceStatus::Idle,
            error: None,
        }
    }
}

impl<T> SliceState<T> {
    pub fn get(&self, id: &DocumentId) -> Option<&Document<T>> {
        self.items.iter().find(|doc| &doc.id == id)
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.status == SliceStatus::Loading
    }
}

/// Everything that can happen to a slice
#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction<T> {
    /// A request was sent
    Pending,
    /// The whole collection was loaded
    Fetched(Vec<Document<T>>),
    Created(Document<T>),
    Updated(Document<T>),
    Deleted(DocumentId),
    /// The request failed with this message
    Rejected(String),
}

/// Compute the next snapshot
///
/// - `Fetched` replaces the collection
/// - `Created` appends, or replaces in place when the id is already cached
/// - `Updated` replaces in place; an unknown id leaves the items alone
/// - `Deleted` removes by id
/// - `Rejected` keeps the items and records the error
///
/// Every fulfilled action clears the previous error.
pub fn reduce<T: Clone>(state: &SliceState<T>, action: SliceAction<T>) -> SliceState<T> {
    match action {
        SliceAction::Pending => SliceState {
            status: SliceStatus::Loading,
            ..state.clone()
        },
        SliceAction::Fetched(items) => succeeded(items),
        SliceAction::Created(doc) => {
            let mut items = state.items.clone();
            match items.iter_mut().find(|existing| existing.id == doc.id) {
                Some(existing) => *existing = doc,
                None => items.push(doc),
            }
            succeeded(items)
        }
        SliceAction::Updated(doc) => {
            let items = state
                .items
                .iter()
                .map(|existing| {
                    if existing.id == doc.id {
                        doc.clone()
                    } else {
                        existing.clone()
                    }
                })
                .collect();
            succeeded(items)
        }
        SliceAction::Deleted(id) => {
            let items = state
                .items
                .iter()
                .filter(|existing| existing.id != id)
                .cloned()
                .collect();
            succeeded(items)
        }
        SliceAction::Rejected(message) => SliceState {
            items: state.items.clone(),
            status: SliceStatus::Failed,
            error: Some(message),
        },
    }
}

fn succeeded<T>(items: Vec<Document<T>>) -> SliceState<T> {
    SliceState {
        items,
        status: SliceStatus::Succeeded,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use planzen_core::UserId;

    fn doc(id: &str, value: u32) -> Document<u32> {
        Document {
            id: DocumentId::new(id),
            ..Document::new(UserId::new("owner"), value, Utc::now())
        }
    }

    #[test]
    fn test_pending_keeps_items_and_sets_loading() {
        let state = reduce(&SliceState::default(), SliceAction::Fetched(vec![doc("a", 1)]));
        let next = reduce(&state, SliceAction::Pending);

        assert_eq!(next.status, SliceStatus::Loading);
        assert_eq!(next.items, state.items);
        assert!(next.is_loading());
    }

    #[test]
    fn test_fetched_replaces_collection() {
        let state = reduce(&SliceState::default(), SliceAction::Fetched(vec![doc("a", 1)]));
        let next = reduce(&state, SliceAction::Fetched(vec![doc("b", 2), doc("c", 3)]));

        assert!(!next.contains(&DocumentId::new("a")));
        assert_eq!(next.items.len(), 2);
        assert_eq!(next.status, SliceStatus::Succeeded);
    }

    #[test]
    fn test_created_with_cached_id_replaces_in_place() {
        let state = reduce(
            &SliceState::default(),
            SliceAction::Fetched(vec![doc("a", 1), doc("b", 2)]),
        );
        let next = reduce(&state, SliceAction::Created(doc("a", 10)));

        assert_eq!(next.items.len(), 2);
        assert_eq!(next.items[0].record, 10);
    }

    #[test]
    fn test_rejected_keeps_items_then_success_clears_error() {
        let state = reduce(&SliceState::default(), SliceAction::Fetched(vec![doc("a", 1)]));
        let failed = reduce(&state, SliceAction::Rejected("boom".into()));

        assert_eq!(failed.status, SliceStatus::Failed);
        assert_eq!(failed.error.as_deref(), Some("boom"));
        assert_eq!(failed.items, state.items);

        let recovered = reduce(&failed, SliceAction::Deleted(DocumentId::new("a")));
        assert_eq!(recovered.error, None);
        assert!(recovered.items.is_empty());
    }

    #[test]
    fn test_reduce_leaves_previous_snapshot_untouched() {
        let state = reduce(&SliceState::default(), SliceAction::Fetched(vec![doc("a", 1)]));
        let before = state.clone();
        let _ = reduce(&state, SliceAction::Updated(doc("a", 99)));

        assert_eq!(state, before);
    }
}

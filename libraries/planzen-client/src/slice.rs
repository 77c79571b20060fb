//! Async slice store
//!
//! Each operation dispatches `Pending`, calls the server, then dispatches
//! the fulfilled action or `Rejected`. Readers take cheap `Arc` snapshots.

use crate::client::PlanZenClient;
use crate::error::Result;
use crate::store::{reduce, SliceAction, SliceState};
use planzen_core::{Appointment, Document, DocumentId, Event, Record, Routine, Todo};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// One cached collection
pub struct Slice<T> {
    state: RwLock<Arc<SliceState<T>>>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            state: RwLock::new(Arc::new(SliceState::default())),
        }
    }
}

impl<T: Record> Slice<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub async fn snapshot(&self) -> Arc<SliceState<T>> {
        self.state.read().await.clone()
    }

    /// Apply an action and return the resulting snapshot
    pub async fn dispatch(&self, action: SliceAction<T>) -> Arc<SliceState<T>> {
        let mut state = self.state.write().await;
        let next = Arc::new(reduce(&state, action));
        *state = Arc::clone(&next);
        next
    }

    /// Forget every cached item
    pub async fn reset(&self) {
        *self.state.write().await = Arc::new(SliceState::default());
    }

    /// Load the whole collection from the server
    pub async fn fetch(&self, client: &PlanZenClient) -> Result<Vec<Document<T>>> {
        self.dispatch(SliceAction::Pending).await;
        let outcome = client.collection::<T>().list().await;
        self.settle(outcome, |items| SliceAction::Fetched(items.clone()))
            .await
    }

    pub async fn create(&self, client: &PlanZenClient, record: &T) -> Result<Document<T>> {
        self.dispatch(SliceAction::Pending).await;
        let outcome = client.collection::<T>().create(record).await;
        self.settle(outcome, |doc| SliceAction::Created(doc.clone()))
            .await
    }

    pub async fn update(
        &self,
        client: &PlanZenClient,
        id: &DocumentId,
        record: &T,
    ) -> Result<Document<T>> {
        self.dispatch(SliceAction::Pending).await;
        let outcome = client.collection::<T>().update(id, record).await;
        self.settle(outcome, |doc| SliceAction::Updated(doc.clone()))
            .await
    }

    pub async fn delete(&self, client: &PlanZenClient, id: &DocumentId) -> Result<DocumentId> {
        self.dispatch(SliceAction::Pending).await;
        let outcome = client.collection::<T>().delete(id).await;
        self.settle(outcome, |deleted| SliceAction::Deleted(deleted.clone()))
            .await
    }

    async fn settle<R>(
        &self,
        outcome: Result<R>,
        fulfilled: impl FnOnce(&R) -> SliceAction<T>,
    ) -> Result<R> {
        match outcome {
            Ok(value) => {
                self.dispatch(fulfilled(&value)).await;
                Ok(value)
            }
            Err(err) => {
                warn!(collection = T::COLLECTION, error = %err, "Slice operation rejected");
                self.dispatch(SliceAction::Rejected(err.to_string())).await;
                Err(err)
            }
        }
    }
}

/// Every slice the app keeps
#[derive(Default)]
pub struct AppStore {
    pub todos: Slice<Todo>,
    pub routines: Slice<Routine>,
    pub appointments: Slice<Appointment>,
    pub events: Slice<Event>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all cached data, e.g. after logout
    pub async fn reset(&self) {
        self.todos.reset().await;
        self.routines.reset().await;
        self.appointments.reset().await;
        self.events.reset().await;
    }
}

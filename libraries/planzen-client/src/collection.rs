//! CRUD endpoints for one record collection.

use crate::client::read_json;
use crate::error::{ClientError, Result};
use crate::types::DeleteResponse;
use planzen_core::{Document, DocumentId, Record};
use reqwest::Client;
use std::marker::PhantomData;
use tracing::debug;

/// Client for `/api/<collection>` of record kind `T`.
pub struct CollectionClient<'a, T> {
    http: &'a Client,
    base_url: &'a str,
    _record: PhantomData<T>,
}

impl<'a, T: Record> CollectionClient<'a, T> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self {
            http,
            base_url,
            _record: PhantomData,
        }
    }

    fn url(&self) -> String {
        format!("{}/api/{}", self.base_url, T::COLLECTION)
    }

    fn item_url(&self, id: &DocumentId) -> String {
        format!("{}/{}", self.url(), id)
    }

    /// Every record of this kind owned by the session user.
    pub async fn list(&self) -> Result<Vec<Document<T>>> {
        let url = self.url();
        debug!(url = %url, "Fetching collection");

        let response = self.http.get(&url).send().await.map_err(ClientError::from_send)?;
        let documents: Vec<Document<T>> = read_json(response, T::COLLECTION).await?;

        debug!(collection = T::COLLECTION, count = documents.len(), "Fetched collection");
        Ok(documents)
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Document<T>> {
        let response = self
            .http
            .get(self.item_url(id))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        read_json(response, T::KIND).await
    }

    pub async fn create(&self, record: &T) -> Result<Document<T>> {
        let response = self
            .http
            .post(self.url())
            .json(record)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        read_json(response, T::KIND).await
    }

    pub async fn update(&self, id: &DocumentId, record: &T) -> Result<Document<T>> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(record)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        read_json(response, T::KIND).await
    }

    /// Delete and return the id the server confirmed.
    pub async fn delete(&self, id: &DocumentId) -> Result<DocumentId> {
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let deleted: DeleteResponse = read_json(response, T::KIND).await?;
        Ok(DocumentId::new(deleted.id))
    }
}

/// CRUD routes shared by every record collection
use crate::{
    error::{Result, ServerError},
    extract::ValidatedJson,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use planzen_core::{Document, DocumentId, Record, Storage};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub success: bool,
    pub id: DocumentId,
}

fn not_found<T: Record>() -> ServerError {
    ServerError::NotFound(format!("{} not found", T::KIND))
}

/// `/<collection>` and `/<collection>/:id` for record kind `T`
pub fn routes<T: Record>() -> Router<AppState> {
    Router::new()
        .route(
            &format!("/{}", T::COLLECTION),
            get(list::<T>).post(create::<T>),
        )
        .route(
            &format!("/{}/:id", T::COLLECTION),
            get(get_one::<T>).put(update::<T>).delete(delete::<T>),
        )
}

/// GET /api/<collection>
pub async fn list<T: Record>(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Document<T>>>> {
    let documents = app_state.db.list_documents::<T>(auth.user_id()).await?;
    Ok(Json(documents))
}

/// POST /api/<collection>
pub async fn create<T: Record>(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ValidatedJson(record): ValidatedJson<T>,
) -> Result<(StatusCode, Json<Document<T>>)> {
    let document = app_state.db.insert_document(auth.user_id(), record).await?;
    tracing::debug!(kind = T::KIND, id = %document.id, "Created");
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/<collection>/:id
pub async fn get_one<T: Record>(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<Document<T>>> {
    app_state
        .db
        .get_document::<T>(auth.user_id(), &DocumentId::new(id))
        .await?
        .map(Json)
        .ok_or_else(not_found::<T>)
}

/// PUT /api/<collection>/:id
pub async fn update<T: Record>(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(record): ValidatedJson<T>,
) -> Result<Json<Document<T>>> {
    app_state
        .db
        .update_document(auth.user_id(), &DocumentId::new(id), record)
        .await?
        .map(Json)
        .ok_or_else(not_found::<T>)
}

/// DELETE /api/<collection>/:id
pub async fn delete<T: Record>(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = DocumentId::new(id);
    if !app_state.db.delete_document::<T>(auth.user_id(), &id).await? {
        return Err(not_found::<T>());
    }

    Ok(Json(DeleteResponse {
        message: format!("{} deleted successfully", T::KIND),
        success: true,
        id,
    }))
}

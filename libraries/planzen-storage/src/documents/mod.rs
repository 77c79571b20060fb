//! Per-owner JSON document collections
//!
//! Every [`Record`] kind shares the `documents` table, partitioned by
//! `collection`. The body column holds only the record fields; identity,
//! owner and timestamps stay in their own columns.

use crate::columns::{decode_time, encode_time};
use crate::error::Result;
use planzen_core::types::{Document, DocumentId, Record, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// All documents of kind `T` owned by `owner`, in creation order
pub async fn list<T: Record>(pool: &SqlitePool, owner: &UserId) -> Result<Vec<Document<T>>> {
    let rows = sqlx::query(
        r#"
        SELECT id, owner_id, body, created_at, updated_at
        FROM documents
        WHERE collection = ? AND owner_id = ?
        ORDER BY created_at, rowid
        "#,
    )
    .bind(T::COLLECTION)
    .bind(owner.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row::<T>).collect()
}

/// Get one owned document by ID
pub async fn get_by_id<T: Record>(
    pool: &SqlitePool,
    owner: &UserId,
    id: &DocumentId,
) -> Result<Option<Document<T>>> {
    let row = sqlx::query(
        r#"
        SELECT id, owner_id, body, created_at, updated_at
        FROM documents
        WHERE collection = ? AND owner_id = ? AND id = ?
        "#,
    )
    .bind(T::COLLECTION)
    .bind(owner.as_str())
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row::<T>).transpose()
}

/// Insert a new document
pub async fn insert<T: Record>(pool: &SqlitePool, document: &Document<T>) -> Result<()> {
    let body = serde_json::to_string(&document.record)?;

    sqlx::query(
        r#"
        INSERT INTO documents (id, collection, owner_id, body, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(document.id.as_str())
    .bind(T::COLLECTION)
    .bind(document.owner_id.as_str())
    .bind(body)
    .bind(encode_time(document.created_at))
    .bind(encode_time(document.updated_at))
    .execute(pool)
    .await?;

    Ok(())
}

/// Overwrite body and `updated_at` of an owned document
///
/// Returns `false` when the document does not exist for this owner.
pub async fn update<T: Record>(pool: &SqlitePool, document: &Document<T>) -> Result<bool> {
    let body = serde_json::to_string(&document.record)?;

    let result = sqlx::query(
        r#"
        UPDATE documents SET body = ?, updated_at = ?
        WHERE collection = ? AND owner_id = ? AND id = ?
        "#,
    )
    .bind(body)
    .bind(encode_time(document.updated_at))
    .bind(T::COLLECTION)
    .bind(document.owner_id.as_str())
    .bind(document.id.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete an owned document
pub async fn delete<T: Record>(pool: &SqlitePool, owner: &UserId, id: &DocumentId) -> Result<bool> {
    let result =
        sqlx::query("DELETE FROM documents WHERE collection = ? AND owner_id = ? AND id = ?")
            .bind(T::COLLECTION)
            .bind(owner.as_str())
            .bind(id.as_str())
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}

fn from_row<T: Record>(row: &SqliteRow) -> Result<Document<T>> {
    let body: String = row.try_get("body")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Document {
        id: DocumentId::new(row.try_get::<String, _>("id")?),
        owner_id: UserId::new(row.try_get::<String, _>("owner_id")?),
        created_at: decode_time(&created_at)?,
        updated_at: decode_time(&updated_at)?,
        record: serde_json::from_str(&body)?,
    })
}

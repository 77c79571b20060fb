/// Database implementation of the core `Storage` trait
use crate::{documents, error::Result, users};
use async_trait::async_trait;
use chrono::Utc;
use planzen_core::types::{
    Document, DocumentId, Email, NewUser, Record, Timestamped, User, UserId,
};
use planzen_core::Storage;
use sqlx::SqlitePool;

/// SQLite-backed document store
///
/// Cheap to share: wrap it in an `Arc` and hand it to every request handler.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect, creating the database file if needed, and apply migrations
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Create database from an existing, already migrated pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Storage for Database {
    // Users

    async fn create_user(&self, user: NewUser) -> planzen_core::Result<User> {
        let user = User::new(user, Utc::now());
        users::create(&self.pool, &user).await?;
        tracing::debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> planzen_core::Result<Option<User>> {
        Ok(users::get_by_id(&self.pool, id.as_str()).await?)
    }

    async fn find_user_by_email(&self, email: &Email) -> planzen_core::Result<Option<User>> {
        Ok(users::find_by_email(&self.pool, email.as_str()).await?)
    }

    async fn find_user_by_forgot_password_token(
        &self,
        token: &str,
    ) -> planzen_core::Result<Option<User>> {
        Ok(users::find_by_forgot_password_token(&self.pool, token).await?)
    }

    async fn save_user(&self, user: User) -> planzen_core::Result<User> {
        let user = user.before_save(Utc::now());
        if !users::update(&self.pool, &user).await? {
            return Err(planzen_core::PlanZenError::not_found("User", user.id.as_str()));
        }
        Ok(user)
    }

    async fn get_all_users(&self) -> planzen_core::Result<Vec<User>> {
        Ok(users::get_all(&self.pool).await?)
    }

    // Documents

    async fn list_documents<T: Record>(
        &self,
        owner: &UserId,
    ) -> planzen_core::Result<Vec<Document<T>>> {
        Ok(documents::list(&self.pool, owner).await?)
    }

    async fn get_document<T: Record>(
        &self,
        owner: &UserId,
        id: &DocumentId,
    ) -> planzen_core::Result<Option<Document<T>>> {
        Ok(documents::get_by_id(&self.pool, owner, id).await?)
    }

    async fn insert_document<T: Record>(
        &self,
        owner: &UserId,
        record: T,
    ) -> planzen_core::Result<Document<T>> {
        let now = Utc::now();
        let document = Document::new(owner.clone(), record, now).before_save(now);
        documents::insert(&self.pool, &document).await?;
        tracing::debug!(collection = T::COLLECTION, id = %document.id, "Document inserted");
        Ok(document)
    }

    async fn update_document<T: Record>(
        &self,
        owner: &UserId,
        id: &DocumentId,
        record: T,
    ) -> planzen_core::Result<Option<Document<T>>> {
        let Some(existing) = documents::get_by_id::<T>(&self.pool, owner, id).await? else {
            return Ok(None);
        };

        let document = existing.with_record(record).before_save(Utc::now());
        if !documents::update(&self.pool, &document).await? {
            return Ok(None);
        }
        Ok(Some(document))
    }

    async fn delete_document<T: Record>(
        &self,
        owner: &UserId,
        id: &DocumentId,
    ) -> planzen_core::Result<bool> {
        Ok(documents::delete::<T>(&self.pool, owner, id).await?)
    }
}

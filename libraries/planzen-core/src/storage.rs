//! Storage trait for the PlanZen document store

use crate::error::Result;
use crate::types::{Document, DocumentId, Email, NewUser, Record, User, UserId};
use async_trait::async_trait;

/// Persistence operations used by the server
///
/// Users live in their own table (unique email); every [`Record`] kind lives
/// in a per-owner collection of JSON documents. Implementations call
/// `Timestamped::before_save` before every write.
#[async_trait]
pub trait Storage: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Create a user; fails with `PlanZenError::Duplicate` if the email is taken
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Find user by (normalised) email
    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>>;

    /// Find the user holding a forgot-password token
    async fn find_user_by_forgot_password_token(&self, token: &str) -> Result<Option<User>>;

    /// Persist changes to an existing user
    async fn save_user(&self, user: User) -> Result<User>;

    /// Get all users (admin/CLI use)
    async fn get_all_users(&self) -> Result<Vec<User>>;

    // ========================================================================
    // Documents
    // ========================================================================

    /// All documents of kind `T` owned by `owner`, oldest first
    async fn list_documents<T: Record>(&self, owner: &UserId) -> Result<Vec<Document<T>>>;

    /// One document, if it exists and belongs to `owner`
    async fn get_document<T: Record>(
        &self,
        owner: &UserId,
        id: &DocumentId,
    ) -> Result<Option<Document<T>>>;

    /// Store a new document and return it with its assigned id
    async fn insert_document<T: Record>(&self, owner: &UserId, record: T) -> Result<Document<T>>;

    /// Replace the record of an owned document; `None` if there is no such document
    async fn update_document<T: Record>(
        &self,
        owner: &UserId,
        id: &DocumentId,
        record: T,
    ) -> Result<Option<Document<T>>>;

    /// Delete an owned document; `false` if there was nothing to delete
    async fn delete_document<T: Record>(&self, owner: &UserId, id: &DocumentId) -> Result<bool>;
}

//! User accounts and credential tokens

use crate::columns::{decode_optional_time, decode_time, encode_time};
use crate::error::{Result, StorageError};
use chrono::NaiveDate;
use planzen_core::types::{Email, FederatedIdentity, Role, TokenGrant, User, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, date_of_birth, \
     role, created_at, updated_at, google_identity, facebook_identity, \
     forgot_password_token, forgot_password_expires_at, verify_token, verify_expires_at, \
     reset_password_token, reset_password_expires_at";

/// Insert a new user row
///
/// Fails with `StorageError::Duplicate` when the email is already registered.
pub async fn create(pool: &SqlitePool, user: &User) -> Result<()> {
    let (forgot_token, forgot_expires) = encode_grant(user.forgot_password.as_ref());
    let (verify_token, verify_expires) = encode_grant(user.verify.as_ref());
    let (reset_token, reset_expires) = encode_grant(user.reset_password.as_ref());

    sqlx::query(&format!(
        "INSERT INTO users ({USER_COLUMNS})
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(user.id.as_str())
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.email.as_str())
    .bind(&user.password_hash)
    .bind(user.date_of_birth.format("%Y-%m-%d").to_string())
    .bind(user.role.as_str())
    .bind(encode_time(user.created_at))
    .bind(encode_time(user.updated_at))
    .bind(encode_identity(user.google.as_ref())?)
    .bind(encode_identity(user.facebook.as_ref())?)
    .bind(forgot_token)
    .bind(forgot_expires)
    .bind(verify_token)
    .bind(verify_expires)
    .bind(reset_token)
    .bind(reset_expires)
    .execute(pool)
    .await
    .map_err(|e| StorageError::from_insert(e, &format!("user with email {}", user.email)))?;

    Ok(())
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Find user by normalised email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Find the user currently holding a forgot-password token
///
/// Expiry is not checked here; callers decide what "expired" means.
pub async fn find_by_forgot_password_token(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE forgot_password_token = ?"
    ))
    .bind(token)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Overwrite every mutable column of an existing user
///
/// Returns `false` when no row has the user's id.
pub async fn update(pool: &SqlitePool, user: &User) -> Result<bool> {
    let (forgot_token, forgot_expires) = encode_grant(user.forgot_password.as_ref());
    let (verify_token, verify_expires) = encode_grant(user.verify.as_ref());
    let (reset_token, reset_expires) = encode_grant(user.reset_password.as_ref());

    let result = sqlx::query(
        r#"
        UPDATE users SET
            first_name = ?, last_name = ?, email = ?, password_hash = ?,
            date_of_birth = ?, role = ?, updated_at = ?,
            google_identity = ?, facebook_identity = ?,
            forgot_password_token = ?, forgot_password_expires_at = ?,
            verify_token = ?, verify_expires_at = ?,
            reset_password_token = ?, reset_password_expires_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.email.as_str())
    .bind(&user.password_hash)
    .bind(user.date_of_birth.format("%Y-%m-%d").to_string())
    .bind(user.role.as_str())
    .bind(encode_time(user.updated_at))
    .bind(encode_identity(user.google.as_ref())?)
    .bind(encode_identity(user.facebook.as_ref())?)
    .bind(forgot_token)
    .bind(forgot_expires)
    .bind(verify_token)
    .bind(verify_expires)
    .bind(reset_token)
    .bind(reset_expires)
    .bind(user.id.as_str())
    .execute(pool)
    .await
    .map_err(|e| StorageError::from_insert(e, &format!("user with email {}", user.email)))?;

    Ok(result.rows_affected() > 0)
}

/// Get all users, ordered by email
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY email"))
        .fetch_all(pool)
        .await?;

    rows.iter().map(from_row).collect()
}

fn from_row(row: &SqliteRow) -> Result<User> {
    let email: String = row.try_get("email")?;
    let date_of_birth: String = row.try_get("date_of_birth")?;
    let role: String = row.try_get("role")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(User {
        id: UserId::new(row.try_get::<String, _>("id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: Email::parse(&email).map_err(StorageError::corrupt)?,
        password_hash: row.try_get("password_hash")?,
        date_of_birth: NaiveDate::parse_from_str(&date_of_birth, "%Y-%m-%d")
            .map_err(|e| StorageError::corrupt(format!("date_of_birth: {}", e)))?,
        role: role.parse::<Role>().map_err(StorageError::corrupt)?,
        created_at: decode_time(&created_at)?,
        updated_at: decode_time(&updated_at)?,
        google: decode_identity(row.try_get("google_identity")?)?,
        facebook: decode_identity(row.try_get("facebook_identity")?)?,
        forgot_password: decode_grant(
            row.try_get("forgot_password_token")?,
            row.try_get("forgot_password_expires_at")?,
        )?,
        verify: decode_grant(row.try_get("verify_token")?, row.try_get("verify_expires_at")?)?,
        reset_password: decode_grant(
            row.try_get("reset_password_token")?,
            row.try_get("reset_password_expires_at")?,
        )?,
    })
}

fn encode_identity(identity: Option<&FederatedIdentity>) -> Result<Option<String>> {
    Ok(identity.map(serde_json::to_string).transpose()?)
}

fn decode_identity(raw: Option<String>) -> Result<Option<FederatedIdentity>> {
    Ok(raw.as_deref().map(serde_json::from_str).transpose()?)
}

fn encode_grant(grant: Option<&TokenGrant>) -> (Option<String>, Option<String>) {
    match grant {
        Some(g) => (Some(g.token.clone()), Some(encode_time(g.expires_at))),
        None => (None, None),
    }
}

fn decode_grant(token: Option<String>, expires_at: Option<String>) -> Result<Option<TokenGrant>> {
    Ok(match (token, decode_optional_time(expires_at)?) {
        (Some(token), Some(expires_at)) => Some(TokenGrant { token, expires_at }),
        _ => None,
    })
}

/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    extract::ValidatedJson,
    middleware::AuthenticatedUser,
    services::{auth::RECOVERY_TTL_SECS, AuthService},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use chrono::{Duration, Utc};
use planzen_core::auth::{Credentials, PasswordRecovery, PasswordReset, Registration};
use planzen_core::{NewUser, PlanZenError, Role, Storage, TokenGrant, User, UserProfile};
use planzen_storage::Database;
use serde::Serialize;

const DUPLICATE_EMAIL: &str = "User with this email already exists";

/// `{message, success}` acknowledgement
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: &'static str,
    pub success: bool,
}

impl ApiMessage {
    fn ok(message: &'static str) -> Json<Self> {
        Json(Self {
            message,
            success: true,
        })
    }
}

/// Create an account with a hashed password
///
/// Shared by the register endpoint and the `add-user` command.
pub async fn create_account(
    db: &Database,
    auth_service: &AuthService,
    registration: Registration,
    role: Role,
) -> Result<User> {
    if db.find_user_by_email(&registration.email).await?.is_some() {
        return Err(ServerError::BadRequest(DUPLICATE_EMAIL.to_string()));
    }

    let password_hash = auth_service.hash_password(&registration.password)?;

    let new_user = NewUser {
        first_name: registration.first_name,
        last_name: registration.last_name,
        email: registration.email,
        password_hash,
        date_of_birth: registration.date_of_birth,
        role,
    };

    match db.create_user(new_user).await {
        Ok(user) => Ok(user),
        // Lost a race with a concurrent registration
        Err(PlanZenError::Duplicate(_)) => Err(ServerError::BadRequest(DUPLICATE_EMAIL.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    ValidatedJson(registration): ValidatedJson<Registration>,
) -> Result<(StatusCode, Json<ApiMessage>)> {
    let email = registration.email.clone();

    let user = create_account(&app_state.db, &app_state.auth_service, registration, Role::User)
        .await
        .map_err(|e| match e {
            ServerError::BadRequest(_) => e,
            other => ServerError::Registration(other.to_string()),
        })?;

    tracing::info!(user_id = %user.id, email = %email, "User registered");
    Ok((StatusCode::CREATED, ApiMessage::ok("User registered successfully")))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> Result<(CookieJar, Json<ApiMessage>)> {
    let user = app_state
        .db
        .find_user_by_email(&credentials.email)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&credentials.password, &user.password_hash)?
    {
        tracing::warn!(email = %credentials.email, "Login failed: invalid credentials");
        return Err(ServerError::Auth("Invalid credentials".to_string()));
    }

    let token = app_state.auth_service.create_token(&user)?;
    let jar = jar.add(app_state.auth_service.session_cookie(token));

    tracing::info!(user_id = %user.id, "Login successful");
    Ok((jar, ApiMessage::ok("Login successful")))
}

/// POST /api/auth/logout
pub async fn logout(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiMessage>) {
    let jar = jar.add(app_state.auth_service.clear_cookie());
    (jar, ApiMessage::ok("Logged out successfully"))
}

/// GET /api/auth/me
pub async fn me(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<UserProfile>> {
    let user = app_state
        .db
        .get_user(auth.user_id())
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    Ok(Json(user.profile()))
}

/// POST /api/auth/recover-password
///
/// Answers the same whether or not the address has an account.
pub async fn recover_password(
    State(app_state): State<AppState>,
    ValidatedJson(recovery): ValidatedJson<PasswordRecovery>,
) -> Result<Json<ApiMessage>> {
    if let Some(mut user) = app_state.db.find_user_by_email(&recovery.email).await? {
        let token = app_state.auth_service.recovery_token();
        user.forgot_password = Some(TokenGrant {
            token: token.clone(),
            expires_at: Utc::now() + Duration::seconds(RECOVERY_TTL_SECS),
        });
        app_state.db.save_user(user).await?;

        // Delivery is not wired up yet; the token only reaches the log
        tracing::debug!(email = %recovery.email, token = %token, "Password recovery token issued");
    } else {
        tracing::debug!(email = %recovery.email, "Password recovery for unknown email");
    }

    Ok(ApiMessage::ok(
        "If an account exists for this email, a recovery link has been sent",
    ))
}

/// POST /api/auth/confirm-password
pub async fn confirm_password(
    State(app_state): State<AppState>,
    ValidatedJson(reset): ValidatedJson<PasswordReset>,
) -> Result<Json<ApiMessage>> {
    let invalid = || ServerError::BadRequest("Invalid or expired token".to_string());

    let mut user = app_state
        .db
        .find_user_by_forgot_password_token(&reset.token)
        .await?
        .ok_or_else(invalid)?;

    let still_valid = user
        .forgot_password
        .as_ref()
        .is_some_and(|grant| grant.is_valid_at(Utc::now()));
    if !still_valid {
        return Err(invalid());
    }

    user.password_hash = app_state.auth_service.hash_password(&reset.password)?;
    user.forgot_password = None;
    let user = app_state.db.save_user(user).await?;

    tracing::info!(user_id = %user.id, "Password reset");
    Ok(ApiMessage::ok("Password updated successfully"))
}

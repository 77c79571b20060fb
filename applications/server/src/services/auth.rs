/// Authentication service - session tokens, cookies and password hashing
use crate::error::{Result, ServerError};
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use planzen_core::{Email, User, UserId};
use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "token";

/// Session lifetime, for both the JWT and the cookie
pub const SESSION_TTL_SECS: i64 = 86_400;

/// How long a password recovery token stays usable
pub const RECOVERY_TTL_SECS: i64 = 3_600;

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    bcrypt_cost: u32,
    secure_cookies: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl AuthService {
    pub fn new(secret: String, bcrypt_cost: u32, secure_cookies: bool) -> Self {
        Self {
            secret,
            bcrypt_cost,
            secure_cookies,
        }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.bcrypt_cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Sign a session token for a user
    pub fn create_token(&self, user: &User) -> Result<String> {
        self.create_token_at(&user.id, &user.email, Utc::now())
    }

    pub fn create_token_at(
        &self,
        user_id: &UserId,
        email: &Email,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let claims = Claims {
            id: user_id.as_str().to_string(),
            email: email.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(SESSION_TTL_SECS)).timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// `token=<jwt>; HttpOnly; SameSite=Strict; Path=/; Max-Age=86400`
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .same_site(SameSite::Strict)
            .path("/")
            .max_age(time::Duration::seconds(SESSION_TTL_SECS))
            .secure(self.secure_cookies)
            .build()
    }

    /// Expired, empty session cookie
    pub fn clear_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .http_only(true)
            .same_site(SameSite::Strict)
            .path("/")
            .max_age(time::Duration::ZERO)
            .secure(self.secure_cookies)
            .build()
    }

    /// Random single-use token for password recovery
    pub fn recovery_token(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

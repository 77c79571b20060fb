//! Authentication methods for the PlanZen server.

use crate::client::{error_message, read_json};
use crate::error::{ClientError, Result};
use crate::forms::{LoginForm, RegisterForm, RegisterRequest};
use crate::types::ApiMessage;
use planzen_core::auth::PasswordReset;
use planzen_core::{Email, UserProfile};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info, warn};

/// Authentication client for the PlanZen server.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/auth/{}", self.base_url, endpoint)
    }

    /// Create an account.
    pub async fn register(&self, form: &RegisterForm) -> Result<ApiMessage> {
        let url = self.url("register");
        debug!(url = %url, email = %form.email, "Registering");

        let response = self
            .http
            .post(&url)
            .json(&RegisterRequest::from(form))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let message: ApiMessage = read_json(response, "register").await?;
        info!(email = %form.email, "Registration successful");
        Ok(message)
    }

    /// Login. On success the session cookie is kept in the client's store.
    pub async fn login(&self, form: &LoginForm) -> Result<ApiMessage> {
        let url = self.url("login");
        debug!(url = %url, email = %form.email, "Attempting login");

        let response = self
            .http
            .post(&url)
            .json(&json!({ "email": form.email.as_str(), "password": form.password }))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().as_u16() == 401 {
            let message = error_message(response).await;
            warn!(email = %form.email, "Login failed: invalid credentials");
            return Err(ClientError::AuthFailed(message));
        }

        let message: ApiMessage = read_json(response, "login").await?;
        info!(email = %form.email, "Login successful");
        Ok(message)
    }

    /// Drop the session cookie.
    pub async fn logout(&self) -> Result<ApiMessage> {
        let response = self
            .http
            .post(self.url("logout"))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        read_json(response, "logout").await
    }

    /// Profile of the logged-in user.
    pub async fn me(&self) -> Result<UserProfile> {
        let response = self
            .http
            .get(self.url("me"))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        read_json(response, "profile").await
    }

    /// Ask for a password recovery token. The server answers the same
    /// whether or not the address is registered.
    pub async fn recover_password(&self, email: &Email) -> Result<ApiMessage> {
        let response = self
            .http
            .post(self.url("recover-password"))
            .json(&json!({ "email": email.as_str() }))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        read_json(response, "recover password").await
    }

    /// Set a new password using a recovery token.
    pub async fn confirm_password(&self, reset: &PasswordReset) -> Result<ApiMessage> {
        let response = self
            .http
            .post(self.url("confirm-password"))
            .json(&json!({
                "token": reset.token,
                "password": reset.password,
                "confirmPassword": reset.password,
            }))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        read_json(response, "confirm password").await
    }
}

//! Main PlanZen client.

use crate::auth::AuthClient;
use crate::collection::CollectionClient;
use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, ErrorBody, HealthResponse};
use planzen_core::{Appointment, Event, Record, Routine, Todo};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Client for a PlanZen server.
///
/// The session cookie set by login lives in the client's cookie store and is
/// sent with every later request, so one `PlanZenClient` is one session.
///
/// # Example
///
/// ```ignore
/// use planzen_client::{ClientConfig, LoginForm, LoginFormInput, PlanZenClient};
/// use planzen_core::Schema;
///
/// let client = PlanZenClient::new(ClientConfig::new("http://localhost:3000"))?;
/// let form = LoginForm::parse(LoginFormInput::new("ada@example.com", "analytical"))?;
/// client.auth().login(&form).await?;
///
/// let todos = client.todos().list().await?;
/// println!("{} todos", todos.len());
/// ```
pub struct PlanZenClient {
    http: Client,
    base_url: String,
}

impl PlanZenClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let parsed = url::Url::parse(&config.url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let base_url = config.url.trim_end_matches('/').to_string();

        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("PlanZen/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Check that the server is up. Does not require a session.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/api/health", self.base_url);
        debug!(url = %url, "Checking server health");

        let response = self.http.get(&url).send().await.map_err(ClientError::from_send)?;
        let health: HealthResponse = read_json(response, "health").await?;

        info!(version = %health.version, "Connected to server");
        Ok(health)
    }

    /// Authentication endpoints.
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url)
    }

    /// CRUD endpoints for any record collection.
    pub fn collection<T: Record>(&self) -> CollectionClient<'_, T> {
        CollectionClient::new(&self.http, &self.base_url)
    }

    pub fn todos(&self) -> CollectionClient<'_, Todo> {
        self.collection()
    }

    pub fn routines(&self) -> CollectionClient<'_, Routine> {
        self.collection()
    }

    pub fn appointments(&self) -> CollectionClient<'_, Appointment> {
        self.collection()
    }

    pub fn events(&self) -> CollectionClient<'_, Event> {
        self.collection()
    }
}

/// Decode a success body, or turn an error status into a `ClientError`
pub(crate) async fn read_json<R: DeserializeOwned>(response: Response, what: &str) -> Result<R> {
    let status = response.status();

    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse {} response: {}", what, e)));
    }

    let message = error_message(response).await;
    Err(match status.as_u16() {
        401 => ClientError::AuthRequired,
        404 => ClientError::NotFound(message),
        code => ClientError::ServerError {
            status: code,
            message,
        },
    })
}

/// The `message` field of an error body, or the raw text if it has none
pub(crate) async fn error_message(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text)
}

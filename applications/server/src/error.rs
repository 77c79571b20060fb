/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use planzen_core::{PlanZenError, ValidationErrors};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Registration failed for a reason the caller should not see
    #[error("Registration failed: {0}")]
    Registration(String),

    #[error(transparent)]
    Core(#[from] PlanZenError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<planzen_storage::StorageError> for ServerError {
    fn from(err: planzen_storage::StorageError) -> Self {
        ServerError::Core(err.into())
    }
}

const INTERNAL: &str = "Internal server error";

fn internal() -> (StatusCode, String, Option<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL.to_string(),
        Some(json!(INTERNAL)),
    )
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let mut errors = None;

        let (status, message, error) = match self {
            ServerError::Validation(fields) => {
                errors = Some(fields);
                (StatusCode::BAD_REQUEST, "Invalid input".to_string(), None)
            }
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ServerError::Registration(ref msg) => {
                tracing::error!("Registration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred during registration".to_string(),
                    Some(json!(INTERNAL)),
                )
            }
            ServerError::Core(PlanZenError::Duplicate(msg)) => (StatusCode::BAD_REQUEST, msg, None),
            ServerError::Core(PlanZenError::NotFound { entity, .. }) => {
                (StatusCode::NOT_FOUND, format!("{} not found", entity), None)
            }
            ServerError::Core(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                internal()
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                internal()
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                internal()
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string(), None)
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                internal()
            }
        };

        let mut body = json!({
            "message": message,
            "success": false,
        });
        if let Some(errors) = errors {
            body["errors"] = json!(errors);
        }
        if let Some(error) = error {
            body["error"] = error;
        }

        (status, Json(body)).into_response()
    }
}

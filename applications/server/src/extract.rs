/// Request body extraction that parses into a validated type
use crate::error::ServerError;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use planzen_core::Schema;

/// JSON body parsed through `S`'s schema
///
/// A body that is not JSON of the input shape, or that fails the schema,
/// is rejected with 400 before the handler runs.
#[derive(Debug)]
pub struct ValidatedJson<S>(pub S);

#[axum::async_trait]
impl<S, St> FromRequest<St> for ValidatedJson<S>
where
    S: Schema + Send,
    S::Input: Send,
    St: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(request: Request, state: &St) -> Result<Self, Self::Rejection> {
        let Json(input) = Json::<S::Input>::from_request(request, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected request body: {}", rejection);
                ServerError::BadRequest("Invalid input".to_string())
            })?;

        Ok(Self(S::parse(input)?))
    }
}

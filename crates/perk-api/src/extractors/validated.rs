//! JSON body extractor that runs `validator` rules before the handler

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// Deserializes the request body as JSON, then applies the DTO's
/// `Validate` rules so handlers only ever see well-formed input.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(reject_json)?;

        body.validate()?;

        Ok(ValidatedJson(body))
    }
}

fn reject_json(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(e) => ApiError::invalid_body(e.to_string()),
        JsonRejection::JsonSyntaxError(e) => ApiError::invalid_body(e.to_string()),
        JsonRejection::MissingJsonContentType(e) => ApiError::invalid_body(e.to_string()),
        JsonRejection::BytesRejection(e) => ApiError::invalid_body(e.to_string()),
        _ => ApiError::invalid_body("Invalid JSON body"),
    }
}

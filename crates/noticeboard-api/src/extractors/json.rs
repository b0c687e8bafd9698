//! JSON body extractor that runs `validator` checks.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use noticeboard_core::error::AppError;

use crate::error::ApiError;

/// Deserializes a JSON body and validates it.
///
/// Malformed bodies and failed validation both become
/// [`ErrorKind::Validation`](noticeboard_core::error::ErrorKind::Validation).
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                ApiError(AppError::validation(rejection.body_text()))
            })?;

        value
            .validate()
            .map_err(|e| ApiError(AppError::validation(format!("Validation failed: {e}"))))?;

        Ok(Self(value))
    }
}

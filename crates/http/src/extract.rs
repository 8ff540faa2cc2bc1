//! Request extractors that reject with [`AppError`].

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde_json::json;

use crate::error::AppError;

/// `axum::Json` whose rejections render as the standard error envelope.
///
/// Bodies that parse but do not fit the target type are 422 validation
/// errors; anything else (broken JSON, wrong content type) is a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let reason = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => AppError::validation(
                vec![json!({ "field": "body", "error": reason })],
                "request body does not match the expected shape",
            ),
            _ => AppError::bad_request(reason),
        }
    }
}

//! Non-error outcomes of a handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Successful or empty handler outcome, rendered as JSON when it has a body.
///
/// `NoContent` and `NotModified` never carry a body; HTTP forbids one on 204
/// and 304.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    /// 200 with a body
    Ok(T),
    /// 201 with a body
    Created(T),
    /// 409 with a body, for endpoints whose contract answers conflicts with data
    Conflict(T),
    /// 204
    NoContent,
    /// 304
    NotModified,
}

impl<T> Reply<T> {
    pub fn status(&self) -> StatusCode {
        match self {
            Reply::Ok(_) => StatusCode::OK,
            Reply::Created(_) => StatusCode::CREATED,
            Reply::Conflict(_) => StatusCode::CONFLICT,
            Reply::NoContent => StatusCode::NO_CONTENT,
            Reply::NotModified => StatusCode::NOT_MODIFIED,
        }
    }

    /// `Ok` with the value when present, `NoContent` otherwise.
    pub fn found(value: Option<T>) -> Self {
        value.map_or(Reply::NoContent, Reply::Ok)
    }
}

impl<I> Reply<Vec<I>> {
    /// `Ok` when the list has entries, `NoContent` otherwise.
    pub fn non_empty(items: Vec<I>) -> Self {
        if items.is_empty() {
            Reply::NoContent
        } else {
            Reply::Ok(items)
        }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Reply::Ok(body) | Reply::Created(body) | Reply::Conflict(body) => {
                (status, Json(body)).into_response()
            }
            Reply::NoContent | Reply::NotModified => status.into_response(),
        }
    }
}

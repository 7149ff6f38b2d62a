use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::database::StoreError;

/// A store result that knows whether it has anything to send back
pub trait Payload: Serialize {
    fn has_content(&self) -> bool;
}

/// Single-row lookups: no row is 204
impl<T: Serialize> Payload for Option<T> {
    fn has_content(&self) -> bool {
        self.is_some()
    }
}

/// Unpaginated collections and update results: no rows is 204
impl<T: Serialize> Payload for Vec<T> {
    fn has_content(&self) -> bool {
        !self.is_empty()
    }
}

/// A page of a paginated list. An empty page is still an answer: 200 with `[]`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Listing<T>(pub Vec<T>);

impl<T: Serialize> Payload for Listing<T> {
    fn has_content(&self) -> bool {
        true
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Count(pub i64);

impl Payload for Count {
    fn has_content(&self) -> bool {
        true
    }
}

/// A freshly inserted row
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Created<T>(pub T);

impl<T: Serialize> Payload for Created<T> {
    fn has_content(&self) -> bool {
        true
    }
}

/// Rows removed by a delete; zero is 204
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Affected(pub u64);

impl Payload for Affected {
    fn has_content(&self) -> bool {
        self.0 > 0
    }
}

/// Shape a store result into the uniform response:
/// content → 200 JSON, nothing → 204, fault → 500 with the message as text.
pub fn respond<P: Payload>(operation: &str, result: Result<P, StoreError>) -> Response {
    match result {
        Ok(payload) if payload.has_content() => (StatusCode::OK, Json(payload)).into_response(),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let message = err.to_string();
            tracing::error!("{} failed: {}", operation, message);
            (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
        }
    }
}

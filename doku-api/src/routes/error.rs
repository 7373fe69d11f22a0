use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use doku_core::TagError;

use crate::store::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownContext(_) => Self::not_found(err.to_string()),
            StoreError::ContextExists(_) => Self::conflict(err.to_string()),
            StoreError::InvalidContextId(_) => Self::bad_request(err.to_string()),
            StoreError::Io(ref e) => {
                tracing::error!("Store I/O error: {:?}", e);
                Self::internal(err.to_string())
            }
            StoreError::Serialize(ref e) => {
                tracing::error!("Document encoding error: {:?}", e);
                Self::internal(err.to_string())
            }
        }
    }
}

impl From<TagError> for ApiError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::UnknownTag(_) => Self::not_found(err.to_string()),
            TagError::DuplicateTag(_) => Self::conflict(err.to_string()),
        }
    }
}

pub(crate) mod contexts;
pub(crate) mod documents;
pub(crate) mod error;
pub(crate) mod overview;
pub(crate) mod tags;

pub(crate) use error::ApiError;

use serde::Serialize;

#[derive(Serialize)]
pub(crate) struct StatusResponse {
    status: &'static str,
    message: String,
}

impl StatusResponse {
    pub(crate) fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

use std::time::Duration;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use preconfapi_primitives::BuildBlockRequestError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreconfApiError {
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    #[error(transparent)]
    InvalidRequest(#[from] BuildBlockRequestError),

    #[error("failed to build propose block transaction: {0}")]
    Builder(eyre::Report),

    #[error("propose block transaction not built within {0:?}")]
    BuilderTimeout(Duration),
}

pub type PreconfApiResult<T> = Result<T, PreconfApiError>;

impl From<JsonRejection> for PreconfApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequestBody(rejection.body_text())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorMessage {
    pub code: u16,
    pub message: String,
}

impl From<&PreconfApiError> for StatusCode {
    fn from(value: &PreconfApiError) -> Self {
        match value {
            PreconfApiError::InvalidRequestBody(_) | PreconfApiError::InvalidRequest(_) => {
                Self::UNPROCESSABLE_ENTITY
            }
            PreconfApiError::Builder(_) | PreconfApiError::BuilderTimeout(_) => {
                Self::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for PreconfApiError {
    fn into_response(self) -> Response {
        let code = StatusCode::from(&self);
        let message = self.to_string();
        (code, Json(ErrorMessage { code: code.as_u16(), message })).into_response()
    }
}

//! Error taxonomy for the HTTP surface.
//!
//! Every failure maps to an explicit status code and a `{"error": ...}`
//! JSON body; nothing crosses the handler boundary uncaught. Upstream
//! failures are not distinguished by sub-type: a transport error and a
//! JSON-parse failure both surface as 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Body was not valid JSON, or was valid JSON but not an object.
    #[error("Requisição JSON inválida. Esperava um objeto JSON.")]
    InvalidBody,

    /// One or more of materia/tema/quantidade/dificuldade missing or empty.
    #[error("Requisição JSON inválida. Está faltando informações.")]
    MissingFields,

    /// Any failure talking to the model or parsing its output.
    #[error("{0}")]
    Upstream(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody | ApiError::MissingFields => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400_and_upstream_to_500() {
        assert_eq!(ApiError::InvalidBody.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingFields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Upstream("timeout".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_message_is_passed_through() {
        let e = ApiError::Upstream("Gemini HTTP 429: quota".into());
        assert_eq!(e.to_string(), "Gemini HTTP 429: quota");
    }
}

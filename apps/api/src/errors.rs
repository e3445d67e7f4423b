use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::normalizer::MalformedResponse;
use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Upstream and internal variants log their detail here and surface only a
/// generic message plus an error-kind tag to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("File is empty")]
    EmptyFile,

    #[error("File too large: {size_bytes} bytes")]
    FileTooLarge { size_bytes: usize, limit_bytes: usize },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Malformed agent response: {0}")]
    MalformedAgentResponse(String),

    #[error("Concurrency limit of {limit} reached")]
    CapacityExhausted { limit: usize },

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Analysis timeout after {timeout_seconds}s")]
    AnalysisTimeout { timeout_seconds: u64 },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MalformedResponse> for AppError {
    fn from(e: MalformedResponse) -> Self {
        AppError::MalformedAgentResponse(e.to_string())
    }
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, retry_after) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::InvalidFileFormat(msg) => (
                StatusCode::BAD_REQUEST,
                "INVALID_FILE_FORMAT",
                msg.clone(),
                None,
            ),
            AppError::EmptyFile => (
                StatusCode::BAD_REQUEST,
                "EMPTY_FILE",
                "File is empty".to_string(),
                None,
            ),
            AppError::FileTooLarge {
                size_bytes,
                limit_bytes,
            } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "FILE_TOO_LARGE",
                format!(
                    "File size ({:.2}MB) exceeds {}MB limit",
                    *size_bytes as f64 / 1024.0 / 1024.0,
                    limit_bytes / 1024 / 1024
                ),
                None,
            ),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
            }
            AppError::MalformedAgentResponse(msg) => {
                tracing::warn!("Malformed agent response: {msg}");
                (
                    StatusCode::BAD_REQUEST,
                    "MALFORMED_AGENT_RESPONSE",
                    msg.clone(),
                    None,
                )
            }
            AppError::CapacityExhausted { limit } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CONCURRENCY_LIMIT_REACHED",
                format!("Server is currently handling maximum concurrent requests ({limit})"),
                Some(5),
            ),
            AppError::UpstreamUnavailable(detail) => {
                tracing::error!("Upstream failure: {detail}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Service temporarily unavailable. Please try again later.".to_string(),
                    Some(60),
                )
            }
            AppError::AnalysisTimeout { timeout_seconds } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "ANALYSIS_TIMEOUT",
                format!("Analysis timeout after {timeout_seconds}s. Please try again later."),
                Some(120),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        let mut response = (status, body).into_response();
        if let Some(seconds) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(seconds as u64));
        }
        response
    }
}

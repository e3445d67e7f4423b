//! POST /v1/analyze-cv — upload a PDF CV, receive the full analysis.
//!
//! The handler runs strictly sequentially within one request: auth →
//! admission → multipart validation → extraction → agent call (under retry
//! and a wall-clock deadline) → response pipeline.

use std::time::Instant;

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use bytes::Bytes;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::agent::retry::{run_with_retry, with_deadline, RetryError};
use crate::analysis::{self, prompts};
use crate::auth;
use crate::config::Config;
use crate::errors::AppError;
use crate::extraction::{self, confidence, language};
use crate::models::response::CvAnalysis;
use crate::state::AppState;

const ALLOWED_CONTENT_TYPE: &str = "application/pdf";

/// Parsed multipart form for an analysis request.
struct Upload {
    file: Bytes,
    content_type: Option<String>,
    role_target: Option<String>,
    language: String,
}

pub async fn analyze_cv_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<CvAnalysis>, AppError> {
    let request_id = Uuid::new_v4();
    let started = Instant::now();

    // Auth before touching the payload
    auth::validate_api_key(&headers, &state.config)?;

    // Admission: reject immediately when full, never queue
    let _permit = state.admission.clone().try_acquire_owned().map_err(|_| {
        warn!(
            %request_id,
            limit = state.config.concurrent_requests_limit,
            "concurrency limit reached"
        );
        AppError::CapacityExhausted {
            limit: state.config.concurrent_requests_limit,
        }
    })?;

    let upload = read_upload(multipart).await?;
    validate_upload(&upload, &state.config)?;

    info!(
        %request_id,
        file_size_bytes = upload.file.len(),
        role_target = ?upload.role_target,
        language = %upload.language,
        "cv analysis request received"
    );

    let content = extraction::extract(&upload.file).map_err(|e| {
        warn!(%request_id, error = %e, "pdf extraction failed");
        AppError::from(e)
    })?;
    let parsing_confidence = confidence::estimate(&content.text, content.page_count);
    let cv_language = language::detect(&content.text);
    debug!(
        %request_id,
        parsing_confidence,
        cv_language,
        page_count = content.page_count,
        tables = content.tables.len(),
        urls = content.urls.len(),
        pdf_metadata = ?content.metadata,
        "cv text extracted"
    );

    let prompt = prompts::build(&content.text, upload.role_target.as_deref(), &upload.language);
    let policy = state.config.retry_policy();
    let deadline = state.config.analysis_timeout();
    let agent = state.agent.clone();

    let orchestrated = run_with_retry(&policy, || {
        let agent = agent.clone();
        let prompt = prompt.clone();
        async move { agent.analyze(&prompt).await }
    });

    let raw_text = match with_deadline(deadline, orchestrated).await {
        Ok(Ok(text)) => text,
        Ok(Err(RetryError::Exhausted { attempts, last })) => {
            error!(%request_id, attempts, error = %last, "agent retries exhausted");
            return Err(AppError::UpstreamUnavailable(last.to_string()));
        }
        Ok(Err(RetryError::Fatal(err))) => {
            error!(%request_id, error = %err, "non-retryable agent failure");
            return Err(AppError::UpstreamUnavailable(err.to_string()));
        }
        Err(_) => {
            error!(
                %request_id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                timeout_seconds = deadline.as_secs(),
                "analysis deadline exceeded"
            );
            return Err(AppError::AnalysisTimeout {
                timeout_seconds: deadline.as_secs(),
            });
        }
    };

    let mut result = analysis::parse_agent_response(&raw_text, parsing_confidence, cv_language)
        .map_err(|e| {
            warn!(%request_id, error = %e, "malformed agent response");
            AppError::from(e)
        })?;

    result.analysis_metadata.processing_duration_ms = started.elapsed().as_millis() as u64;

    info!(
        %request_id,
        processing_duration_ms = result.analysis_metadata.processing_duration_ms,
        total_score = result.candidate_summary.total_score,
        detected_role = %result.candidate_summary.detected_role,
        "cv analysis complete"
    );

    Ok(Json(result))
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut file: Option<Bytes> = None;
    let mut content_type: Option<String> = None;
    let mut role_target: Option<String> = None;
    let mut language = "es".to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                content_type = field.content_type().map(str::to_string);
                file = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("failed to read file: {e}")))?,
                );
            }
            Some("role_target") => {
                role_target = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("failed to read role_target: {e}"))
                })?);
            }
            Some("language") => {
                language = field.text().await.map_err(|e| {
                    AppError::Validation(format!("failed to read language: {e}"))
                })?;
            }
            _ => {} // unknown fields are ignored
        }
    }

    Ok(Upload {
        file: file
            .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?,
        content_type,
        role_target,
        language,
    })
}

fn validate_upload(upload: &Upload, config: &Config) -> Result<(), AppError> {
    match upload.content_type.as_deref() {
        Some(ALLOWED_CONTENT_TYPE) => {}
        other => {
            return Err(AppError::InvalidFileFormat(format!(
                "File must be a PDF (received: {})",
                other.unwrap_or("none")
            )));
        }
    }

    if upload.file.len() > config.max_file_size_bytes() {
        return Err(AppError::FileTooLarge {
            size_bytes: upload.file.len(),
            limit_bytes: config.max_file_size_bytes(),
        });
    }

    if upload.file.is_empty() {
        return Err(AppError::EmptyFile);
    }

    if let Some(role) = upload.role_target.as_deref() {
        validate_role_target(role)?;
    }

    if upload.language != "es" && upload.language != "en" {
        return Err(AppError::Validation(format!(
            "language must be 'es' or 'en' (received: {})",
            upload.language
        )));
    }

    Ok(())
}

/// role_target: 3–100 chars, alphanumeric plus space, hyphen, underscore.
fn validate_role_target(role: &str) -> Result<(), AppError> {
    let len = role.chars().count();
    if !(3..=100).contains(&len) {
        return Err(AppError::Validation(
            "role_target must be between 3 and 100 characters".to_string(),
        ));
    }
    if !role
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_')
    {
        return Err(AppError::Validation(
            "role_target must contain only alphanumeric characters, spaces, hyphens, and underscores"
                .to_string(),
        ));
    }
    Ok(())
}

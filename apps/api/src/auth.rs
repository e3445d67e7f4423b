//! X-API-Key authentication.

use axum::http::HeaderMap;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::AppError;

/// Validates the X-API-Key header against the configured key set.
/// Exact, case-sensitive string match.
pub fn validate_api_key(headers: &HeaderMap, config: &Config) -> Result<(), AppError> {
    let key = match headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        Some(k) => k,
        None => {
            warn!("missing api key in request");
            return Err(AppError::Unauthorized(
                "Missing API key. Provide X-API-Key header.".to_string(),
            ));
        }
    };

    if key.trim().is_empty() || !config.api_keys.iter().any(|valid| valid == key) {
        warn!(key_preview = key_preview(key), "invalid api key attempt");
        return Err(AppError::Unauthorized("Invalid API key".to_string()));
    }

    debug!(api_key_id = key_preview(key), "api key validated");
    Ok(())
}

/// Safe identifier for logging: first 8 characters only, never the full key.
fn key_preview(key: &str) -> &str {
    key.get(..8).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_key(key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(key).unwrap());
        headers
    }

    #[test]
    fn test_valid_key_passes() {
        let config = Config::for_tests();
        let headers = headers_with_key("test-key-0123456789abcdef");
        assert!(validate_api_key(&headers, &config).is_ok());
    }

    #[test]
    fn test_missing_key_rejected() {
        let config = Config::for_tests();
        let result = validate_api_key(&HeaderMap::new(), &config);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let config = Config::for_tests();
        let headers = headers_with_key("not-the-right-key-at-all");
        assert!(validate_api_key(&headers, &config).is_err());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let config = Config::for_tests();
        let headers = headers_with_key("TEST-KEY-0123456789ABCDEF");
        assert!(validate_api_key(&headers, &config).is_err());
    }

    #[test]
    fn test_empty_key_rejected() {
        let config = Config::for_tests();
        let headers = headers_with_key("");
        assert!(validate_api_key(&headers, &config).is_err());
    }

    #[test]
    fn test_key_preview_truncates() {
        assert_eq!(key_preview("abcdefghij"), "abcdefgh");
        assert_eq!(key_preview("abc"), "abc");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version stamped into every analysis result.
pub const ANALYSIS_VERSION: &str = "1.0.0";

/// Metadata about the analysis process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Analysis completion timestamp (ISO 8601, UTC).
    pub timestamp: DateTime<Utc>,
    /// Text extraction quality estimate in [0, 1]. Informational only.
    pub parsing_confidence: f64,
    /// Detected CV language (ISO 639-1 code).
    pub cv_language: String,
    /// Semver of the analysis pipeline.
    pub analysis_version: String,
    pub processing_duration_ms: u64,
}

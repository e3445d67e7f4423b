//! Agent response normalization.
//!
//! This is the only place raw agent output is interpreted: one fence-strip,
//! one deserialization into [`RawAnalysis`] with every default applied via
//! serde. Downstream stages consume typed data and never re-fill defaults.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::candidate::{SeniorityLevel, YearsExperience};
use crate::models::improvement::Priority;
use crate::models::recommendations::Recommendations;
use crate::models::redflag::Severity;
use crate::models::strength::MarketValue;

/// Raised when the agent response is not parseable JSON after fence
/// stripping. A parsing defect, not a transient upstream failure — never
/// retried, surfaced to the client as a validation error.
#[derive(Debug, Error)]
#[error("agent response is not valid JSON: {0}")]
pub struct MalformedResponse(#[from] serde_json::Error);

/// Agent-supplied analysis payload, exactly as received (modulo defaults).
/// Field names mirror the prompt's JSON schema.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RawAnalysis {
    pub candidate: RawCandidate,
    pub parameters: BTreeMap<String, RawParameter>,
    pub strengths: Vec<RawStrength>,
    pub improvement_areas: Vec<RawImprovementArea>,
    pub red_flags: Vec<RawRedFlag>,
    pub recommendations: Recommendations,
    pub interview_questions: RawInterviewQuestions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RawCandidate {
    pub name: String,
    pub detected_role: String,
    pub seniority_level: SeniorityLevel,
    pub years_experience: YearsExperience,
}

impl Default for RawCandidate {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            detected_role: "Unknown".to_string(),
            seniority_level: SeniorityLevel::default(),
            years_experience: YearsExperience::default(),
        }
    }
}

/// One scored parameter as proposed by the agent. Any `weight` the agent
/// sends is dropped at deserialization (`deny_unknown_fields` is NOT set;
/// unknown keys are simply ignored) — weights come from the constant table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RawParameter {
    pub score: f64,
    pub justification: String,
    pub evidence: Vec<String>,
}

impl Default for RawParameter {
    fn default() -> Self {
        Self {
            score: 0.0,
            justification: "No data provided".to_string(),
            evidence: vec![],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RawStrength {
    pub area: String,
    pub description: String,
    pub score: f64,
    pub market_value: MarketValue,
}

impl Default for RawStrength {
    fn default() -> Self {
        Self {
            area: "Unknown".to_string(),
            description: String::new(),
            score: 0.0,
            market_value: MarketValue::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RawImprovementArea {
    pub area: String,
    pub current_score: f64,
    pub gap_description: String,
    pub recommendations: Vec<String>,
    pub priority: Priority,
}

impl Default for RawImprovementArea {
    fn default() -> Self {
        Self {
            area: "Unknown".to_string(),
            current_score: 0.0,
            gap_description: String::new(),
            recommendations: vec![],
            priority: Priority::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RawRedFlag {
    #[serde(rename = "type")]
    pub flag_type: String,
    pub severity: Severity,
    pub description: String,
    pub impact: String,
}

impl Default for RawRedFlag {
    fn default() -> Self {
        Self {
            flag_type: "skill_inconsistency".to_string(),
            severity: Severity::default(),
            description: String::new(),
            impact: String::new(),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RawInterviewQuestions {
    pub technical: Vec<String>,
    pub scenario: Vec<String>,
    pub verification: Vec<String>,
}

/// Strips one leading/trailing ``` fence (with or without a language tag)
/// and parses the remainder as JSON.
pub fn normalize(raw_text: &str) -> Result<RawAnalysis, MalformedResponse> {
    let cleaned = strip_code_fences(raw_text);
    let analysis: RawAnalysis = serde_json::from_str(cleaned)?;
    debug!(
        parameters = analysis.parameters.len(),
        strengths = analysis.strengths.len(),
        red_flags = analysis.red_flags.len(),
        "agent response normalized"
    );
    Ok(analysis)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from agent output.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_normalize_accepts_fenced_payload() {
        let raw = "```json\n{\"parameters\": {\"certifications\": {\"score\": 9}}}\n```";
        let analysis = normalize(raw).unwrap();
        assert_eq!(analysis.parameters["certifications"].score, 9.0);
    }

    #[test]
    fn test_normalize_rejects_invalid_json() {
        assert!(normalize("I could not analyze this CV, sorry!").is_err());
    }

    #[test]
    fn test_normalize_rejects_non_object_payload() {
        assert!(normalize("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_missing_sections_get_defaults() {
        let analysis = normalize("{}").unwrap();
        assert_eq!(analysis.candidate.name, "Unknown");
        assert_eq!(analysis.candidate.seniority_level, SeniorityLevel::Mid);
        assert!(analysis.parameters.is_empty());
        assert!(analysis.strengths.is_empty());
        assert!(analysis.recommendations.certifications.is_empty());
    }

    #[test]
    fn test_missing_parameter_fields_get_defaults() {
        let analysis = normalize(r#"{"parameters": {"tools": {}}}"#).unwrap();
        let tools = &analysis.parameters["tools"];
        assert_eq!(tools.score, 0.0);
        assert_eq!(tools.justification, "No data provided");
        assert!(tools.evidence.is_empty());
    }

    #[test]
    fn test_agent_supplied_weight_is_ignored_at_parse() {
        let raw = r#"{"parameters": {"tools": {"score": 5, "weight": 9.9}}}"#;
        let analysis = normalize(raw).unwrap();
        assert_eq!(analysis.parameters["tools"].score, 5.0);
    }

    #[test]
    fn test_red_flag_type_key_and_defaults() {
        let raw = r#"{"red_flags": [{"severity": "high"}]}"#;
        let analysis = normalize(raw).unwrap();
        assert_eq!(analysis.red_flags[0].flag_type, "skill_inconsistency");
        assert_eq!(analysis.red_flags[0].severity, Severity::High);
    }

    #[test]
    fn test_interview_questions_use_short_keys() {
        let raw = r#"{"interview_questions": {"technical": ["q1"], "scenario": ["q2"]}}"#;
        let analysis = normalize(raw).unwrap();
        assert_eq!(analysis.interview_questions.technical, vec!["q1"]);
        assert_eq!(analysis.interview_questions.scenario, vec!["q2"]);
        assert!(analysis.interview_questions.verification.is_empty());
    }
}

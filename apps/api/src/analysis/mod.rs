//! The response-validation and score-aggregation pipeline.
//!
//! Order of operations per request: [`normalizer`] parses raw agent text
//! once, [`scoring`] builds the 24-entry weighted score set, [`strengths`]
//! derives the exactly-5 strength list, and [`assembler`] composes the final
//! [`crate::models::response::CvAnalysis`].

pub mod assembler;
pub mod normalizer;
pub mod prompts;
pub mod scoring;
pub mod strengths;

use crate::models::response::CvAnalysis;
use normalizer::MalformedResponse;

/// Full pipeline over a raw agent response.
pub fn parse_agent_response(
    raw_text: &str,
    parsing_confidence: f64,
    cv_language: &str,
) -> Result<CvAnalysis, MalformedResponse> {
    let raw = normalizer::normalize(raw_text)?;
    Ok(assembler::assemble(raw, parsing_confidence, cv_language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_single_parameter_scenario_end_to_end() {
        let raw = "```json\n{\"parameters\":{\"certifications\":{\"score\":9}}}\n```";
        let result = parse_agent_response(raw, 0.9, "en").unwrap();

        assert_eq!(result.detailed_scores.certifications.score, 9.0);
        assert_eq!(result.detailed_scores.certifications.weight, 1.2);
        assert_eq!(result.detailed_scores.iter().count(), 24);
        let zeroed = result
            .detailed_scores
            .iter()
            .filter(|(_, p)| p.score == 0.0 && p.justification == "No data provided")
            .count();
        assert_eq!(zeroed, 23);
        assert_eq!(result.strengths.len(), 5);
    }

    #[test]
    fn test_malformed_response_propagates() {
        assert!(parse_agent_response("not json at all", 0.9, "en").is_err());
    }
}

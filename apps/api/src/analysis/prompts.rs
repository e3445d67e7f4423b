//! Prompt assembly for the CV analysis call.
//!
//! The user prompt carries the extracted CV text inline, in the requested
//! output language; the system prompt pins the JSON schema the normalizer
//! expects.

use crate::agent::AgentPrompt;
use crate::models::scores::DetailedScores;

/// System prompt: JSON-only output, fixed schema.
const ANALYSIS_SYSTEM: &str = "You are a senior cybersecurity recruiter and technical assessor. \
    You MUST respond with a single valid JSON object and nothing else. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    The object must have these keys: \
    \"candidate\" {name, detected_role, seniority_level (Junior|Mid|Senior|Lead|Executive), \
    years_experience {total_it, cybersecurity, current_role}}, \
    \"parameters\" (an object keyed by parameter name, each value \
    {score: 0-10, justification, evidence: [strings]}), \
    \"strengths\" [{area, description, score, market_value (high|medium|low)}], \
    \"improvement_areas\" [{area, current_score, gap_description, recommendations, priority}], \
    \"red_flags\" [{type, severity (low|medium|high), description, impact}], \
    \"recommendations\" {certifications, training, experience_areas, next_role_suggestions}, \
    \"interview_questions\" {technical, scenario, verification}.";

/// Builds the full prompt for a CV analysis request.
pub fn build(cv_text: &str, role_target: Option<&str>, language: &str) -> AgentPrompt {
    let parameter_list = DetailedScores::NAMES.join(", ");

    let user = if language == "es" {
        format!(
            "Analiza este CV de ciberseguridad y puntúa cada uno de los siguientes \
             parámetros de 0 a 10: {parameter_list}.\n\n\
             Idioma del análisis: es\n\
             {role_line}\n\
             Contenido del CV:\n{cv_text}\n\n\
             Retorna el análisis completo en el formato JSON estructurado indicado.",
            role_line = role_target
                .map(|r| format!("Puesto objetivo: {r}"))
                .unwrap_or_default(),
        )
    } else {
        format!(
            "Analyze this cybersecurity CV and score each of the following \
             parameters from 0 to 10: {parameter_list}.\n\n\
             Analysis language: en\n\
             {role_line}\n\
             CV content:\n{cv_text}\n\n\
             Return the complete analysis in the structured JSON format described.",
            role_line = role_target
                .map(|r| format!("Target role: {r}"))
                .unwrap_or_default(),
        )
    };

    AgentPrompt {
        system: ANALYSIS_SYSTEM.to_string(),
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_cv_text_and_all_parameters() {
        let prompt = build("Jane Doe, security engineer", None, "en");
        assert!(prompt.user.contains("Jane Doe, security engineer"));
        for name in DetailedScores::NAMES {
            assert!(prompt.user.contains(name), "missing parameter {name}");
        }
    }

    #[test]
    fn test_role_target_appears_when_present() {
        let prompt = build("cv", Some("Cloud Security Architect"), "en");
        assert!(prompt.user.contains("Target role: Cloud Security Architect"));
    }

    #[test]
    fn test_role_target_omitted_when_absent() {
        let prompt = build("cv", None, "en");
        assert!(!prompt.user.contains("Target role:"));
    }

    #[test]
    fn test_spanish_template_selected() {
        let prompt = build("cv", Some("Pentester"), "es");
        assert!(prompt.user.contains("Analiza este CV"));
        assert!(prompt.user.contains("Puesto objetivo: Pentester"));
    }

    #[test]
    fn test_system_prompt_pins_schema_keys() {
        let prompt = build("cv", None, "en");
        for key in ["candidate", "parameters", "strengths", "red_flags", "interview_questions"] {
            assert!(prompt.system.contains(key));
        }
    }
}

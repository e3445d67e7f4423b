use serde::{Deserialize, Serialize};

/// Career development suggestions tailored to the candidate's profile.
/// Each list may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendations {
    pub certifications: Vec<String>,
    pub training: Vec<String>,
    pub experience_areas: Vec<String>,
    pub next_role_suggestions: Vec<String>,
}

/// Tailored interview questions derived from the analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewSuggestions {
    pub technical_questions: Vec<String>,
    pub scenario_questions: Vec<String>,
    pub verification_questions: Vec<String>,
}

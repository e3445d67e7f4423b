use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateSummary;
use crate::models::improvement::ImprovementArea;
use crate::models::metadata::AnalysisMetadata;
use crate::models::recommendations::{InterviewSuggestions, Recommendations};
use crate::models::redflag::RedFlag;
use crate::models::scores::DetailedScores;
use crate::models::strength::Strength;

/// Complete CV analysis result returned to the client.
///
/// Assembled once per request by `analysis::assembler` and immutable
/// thereafter; no part of it outlives the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvAnalysis {
    pub analysis_metadata: AnalysisMetadata,
    pub candidate_summary: CandidateSummary,
    pub detailed_scores: DetailedScores,
    /// Always exactly 5 entries (selector postcondition).
    pub strengths: Vec<Strength>,
    pub improvement_areas: Vec<ImprovementArea>,
    pub red_flags: Vec<RedFlag>,
    pub recommendations: Recommendations,
    pub interview_suggestions: InterviewSuggestions,
}

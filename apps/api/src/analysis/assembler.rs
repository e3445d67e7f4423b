//! Final response assembly.
//!
//! Pure composition: typed raw payload + completed score set + extraction
//! observations in, [`CvAnalysis`] out. Derived fields (total score,
//! percentile, strength list) overwrite anything the agent proposed.
//! `processing_duration_ms` is stamped by the caller once the full request
//! is done.

use chrono::Utc;

use crate::analysis::normalizer::RawAnalysis;
use crate::analysis::{scoring, strengths};
use crate::models::candidate::CandidateSummary;
use crate::models::improvement::ImprovementArea;
use crate::models::metadata::{AnalysisMetadata, ANALYSIS_VERSION};
use crate::models::recommendations::InterviewSuggestions;
use crate::models::redflag::RedFlag;
use crate::models::response::CvAnalysis;
use crate::models::strength::Strength;

pub fn assemble(raw: RawAnalysis, parsing_confidence: f64, cv_language: &str) -> CvAnalysis {
    let detailed_scores = scoring::score_parameters(&raw.parameters);
    let total_score = scoring::weighted_total(&detailed_scores);
    let percentile = scoring::percentile(total_score);

    let candidate_summary = CandidateSummary {
        name: raw.candidate.name,
        total_score,
        percentile,
        detected_role: raw.candidate.detected_role,
        seniority_level: raw.candidate.seniority_level,
        years_experience: raw.candidate.years_experience.clamped(),
    };

    let proposed: Vec<Strength> = raw
        .strengths
        .into_iter()
        .map(|s| Strength {
            area: s.area,
            description: s.description,
            score: s.score.clamp(0.0, 10.0),
            market_value: s.market_value,
        })
        .collect();
    let strengths = strengths::select(proposed, &detailed_scores);

    let improvement_areas = raw
        .improvement_areas
        .into_iter()
        .map(|a| ImprovementArea {
            area: a.area,
            current_score: a.current_score.clamp(0.0, 10.0),
            gap_description: a.gap_description,
            recommendations: a.recommendations,
            priority: a.priority,
        })
        .collect();

    let red_flags = raw
        .red_flags
        .into_iter()
        .map(|f| RedFlag {
            flag_type: f.flag_type,
            severity: f.severity,
            description: f.description,
            impact: f.impact,
        })
        .collect();

    let interview_suggestions = InterviewSuggestions {
        technical_questions: raw.interview_questions.technical,
        scenario_questions: raw.interview_questions.scenario,
        verification_questions: raw.interview_questions.verification,
    };

    CvAnalysis {
        analysis_metadata: AnalysisMetadata {
            timestamp: Utc::now(),
            parsing_confidence,
            cv_language: cv_language.to_string(),
            analysis_version: ANALYSIS_VERSION.to_string(),
            processing_duration_ms: 0,
        },
        candidate_summary,
        detailed_scores,
        strengths,
        improvement_areas,
        red_flags,
        recommendations: raw.recommendations,
        interview_suggestions,
    }
}

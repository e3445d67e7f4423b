//! Parameter scoring and weighted aggregation.

use std::collections::BTreeMap;

use crate::analysis::normalizer::RawParameter;
use crate::models::scores::{weight_for, DetailedScores, ScoreParameter};

/// Builds the full 24-entry score set from whatever subset the agent sent.
///
/// Missing parameters become zero-score placeholders; unknown extra keys in
/// the raw mapping are silently ignored; scores are clamped into [0, 10].
/// Weights always come from the constant table.
pub fn score_parameters(raw: &BTreeMap<String, RawParameter>) -> DetailedScores {
    DetailedScores::build(|name| {
        let param = raw.get(name).cloned().unwrap_or_default();
        ScoreParameter {
            score: param.score.clamp(0.0, 10.0),
            justification: param.justification,
            evidence: param.evidence,
            weight: weight_for(name).expect("weight table covers every fixed parameter"),
        }
    })
}

/// Weight-normalized mean across all 24 parameters, rounded to 2 decimals.
pub fn weighted_total(scores: &DetailedScores) -> f64 {
    let mut total_weighted = 0.0;
    let mut total_weight = 0.0;

    for (_, param) in scores.iter() {
        total_weighted += param.score * param.weight;
        total_weight += param.weight;
    }

    if total_weight == 0.0 {
        return 0.0;
    }

    let avg = total_weighted / total_weight;
    (avg * 100.0).round() / 100.0
}

/// Linear percentile placeholder: clamp(round(total × 10), 0, 100).
///
/// Not a market-benchmark lookup. Kept as-is for output compatibility.
pub fn percentile(total_score: f64) -> u8 {
    ((total_score * 10.0).round() as i64).clamp(0, 100) as u8
}

//! Strength selection with backfill.
//!
//! Postcondition: the returned list has exactly [`STRENGTH_COUNT`] entries
//! (or as many as 24 parameters can yield, which in practice is always 5).
//! When fewer than 5 parameters reach the 7.0 threshold, padding continues
//! below the threshold with `market_value = low` — deliberate, observable
//! behavior for uniformly weak CVs.

use tracing::debug;

use crate::models::scores::DetailedScores;
use crate::models::strength::{MarketValue, Strength};

pub const STRENGTH_COUNT: usize = 5;
pub const STRENGTH_THRESHOLD: f64 = 7.0;

const DESCRIPTION_LIMIT: usize = 100;

/// Derives the final strength list from the agent's proposal and the
/// completed score set.
pub fn select(proposed: Vec<Strength>, scores: &DetailedScores) -> Vec<Strength> {
    let mut strengths: Vec<Strength> = proposed
        .into_iter()
        .filter(|s| s.score >= STRENGTH_THRESHOLD)
        .collect();

    if strengths.len() == STRENGTH_COUNT {
        return strengths;
    }

    if strengths.len() > STRENGTH_COUNT {
        // Stable sort keeps proposal order among equal scores
        strengths.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        strengths.truncate(STRENGTH_COUNT);
        return strengths;
    }

    // Backfill from top-scoring parameters
    let mut params: Vec<_> = scores.iter().collect();
    params.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut existing_areas: Vec<String> = strengths.iter().map(|s| s.area.to_lowercase()).collect();

    for (name, param) in &params {
        if strengths.len() >= STRENGTH_COUNT {
            break;
        }
        let area = title_case(name);
        let area_lower = area.to_lowercase();
        if param.score >= STRENGTH_THRESHOLD && !existing_areas.contains(&area_lower) {
            strengths.push(Strength {
                area,
                description: truncate_description(&param.justification),
                score: param.score,
                market_value: MarketValue::Medium,
            });
            existing_areas.push(area_lower);
        }
    }

    // Still short: pad from the remaining parameters regardless of threshold
    for (name, param) in &params {
        if strengths.len() >= STRENGTH_COUNT {
            break;
        }
        let area = title_case(name);
        let area_lower = area.to_lowercase();
        if !existing_areas.contains(&area_lower) {
            debug!(parameter = *name, score = param.score, "padding strengths below threshold");
            strengths.push(Strength {
                area,
                description: truncate_description(&param.justification),
                score: param.score,
                market_value: MarketValue::Low,
            });
            existing_areas.push(area_lower);
        }
    }

    strengths.truncate(STRENGTH_COUNT);
    strengths
}

/// "cloud_security" → "Cloud Security".
fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_description(justification: &str) -> String {
    if justification.chars().count() > DESCRIPTION_LIMIT {
        let mut truncated: String = justification.chars().take(DESCRIPTION_LIMIT).collect();
        truncated.push_str("...");
        truncated
    } else {
        justification.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scores::{weight_for, ScoreParameter};

    fn strength(area: &str, score: f64) -> Strength {
        Strength {
            area: area.to_string(),
            description: format!("Strong track record in {area}."),
            score,
            market_value: MarketValue::High,
        }
    }

    /// Score set where the named parameters get the given scores and all
    /// others are zero.
    fn scores_with(overrides: &[(&str, f64)]) -> DetailedScores {
        DetailedScores::build(|name| {
            let score = overrides
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, s)| *s)
                .unwrap_or(0.0);
            ScoreParameter {
                score,
                justification: format!("Evidence of sustained {name} work across roles."),
                evidence: vec![],
                weight: weight_for(name).unwrap(),
            }
        })
    }

    #[test]
    fn test_exactly_five_valid_proposals_pass_through_unchanged() {
        let proposed = vec![
            strength("Cloud Security", 9.0),
            strength("Offensive Skills", 8.5),
            strength("Tools", 8.0),
            strength("Programming", 7.5),
            strength("Forensics", 7.0),
        ];
        let result = select(proposed.clone(), &scores_with(&[]));
        assert_eq!(result.len(), 5);
        let areas: Vec<_> = result.iter().map(|s| s.area.as_str()).collect();
        assert_eq!(
            areas,
            vec!["Cloud Security", "Offensive Skills", "Tools", "Programming", "Forensics"]
        );
    }

    #[test]
    fn test_below_threshold_proposals_are_dropped() {
        let proposed = vec![
            strength("Cloud Security", 9.0),
            strength("Soft Skills", 6.9),
        ];
        let result = select(proposed, &scores_with(&[]));
        assert!(result.iter().all(|s| s.area != "Soft Skills"));
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_more_than_five_takes_top_by_score() {
        let proposed = vec![
            strength("A", 7.0),
            strength("B", 9.5),
            strength("C", 8.0),
            strength("D", 9.0),
            strength("E", 7.5),
            strength("F", 8.5),
            strength("G", 7.2),
        ];
        let result = select(proposed, &scores_with(&[]));
        assert_eq!(result.len(), 5);
        let areas: Vec<_> = result.iter().map(|s| s.area.as_str()).collect();
        assert_eq!(areas, vec!["B", "D", "F", "C", "E"]);
    }

    #[test]
    fn test_tie_break_preserves_proposal_order() {
        let proposed = vec![
            strength("First", 8.0),
            strength("Second", 8.0),
            strength("Third", 8.0),
            strength("Fourth", 8.0),
            strength("Fifth", 8.0),
            strength("Sixth", 8.0),
        ];
        let result = select(proposed, &scores_with(&[]));
        let areas: Vec<_> = result.iter().map(|s| s.area.as_str()).collect();
        assert_eq!(areas, vec!["First", "Second", "Third", "Fourth", "Fifth"]);
    }

    #[test]
    fn test_backfill_from_top_parameters_uses_medium_market_value() {
        let scores = scores_with(&[
            ("certifications", 9.0),
            ("cloud_security", 8.5),
            ("offensive_skills", 8.0),
            ("tools", 7.5),
            ("experience", 7.0),
        ]);
        let result = select(vec![], &scores);
        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|s| s.score >= STRENGTH_THRESHOLD));
        assert!(result.iter().all(|s| s.market_value == MarketValue::Medium));
        assert_eq!(result[0].area, "Certifications");
        assert_eq!(result[1].area, "Cloud Security");
    }

    #[test]
    fn test_backfill_skips_areas_already_proposed_case_insensitive() {
        let scores = scores_with(&[
            ("cloud_security", 9.5),
            ("certifications", 9.0),
            ("tools", 8.0),
            ("forensics", 7.5),
            ("experience", 7.2),
            ("programming", 7.1),
        ]);
        let proposed = vec![strength("CLOUD SECURITY", 9.5)];
        let result = select(proposed, &scores);
        assert_eq!(result.len(), 5);
        let cloud_count = result
            .iter()
            .filter(|s| s.area.eq_ignore_ascii_case("cloud security"))
            .count();
        assert_eq!(cloud_count, 1);
    }

    #[test]
    fn test_weak_cv_pads_below_threshold_with_low_market_value() {
        // Only two parameters reach 7.0; padding must still produce 5
        let scores = scores_with(&[
            ("certifications", 8.0),
            ("experience", 7.0),
            ("tools", 5.0),
            ("programming", 4.0),
            ("education", 3.0),
        ]);
        let result = select(vec![], &scores);
        assert_eq!(result.len(), 5);

        let above: Vec<_> = result.iter().filter(|s| s.score >= 7.0).collect();
        let below: Vec<_> = result.iter().filter(|s| s.score < 7.0).collect();
        assert_eq!(above.len(), 2);
        assert_eq!(below.len(), 3);
        assert!(above.iter().all(|s| s.market_value == MarketValue::Medium));
        assert!(below.iter().all(|s| s.market_value == MarketValue::Low));
    }

    #[test]
    fn test_all_zero_scores_still_yield_five() {
        let result = select(vec![], &scores_with(&[]));
        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|s| s.score == 0.0));
        assert!(result.iter().all(|s| s.market_value == MarketValue::Low));
    }

    #[test]
    fn test_long_justifications_truncated_to_100_chars() {
        let scores = DetailedScores::build(|name| ScoreParameter {
            score: 8.0,
            justification: "x".repeat(150),
            evidence: vec![],
            weight: weight_for(name).unwrap(),
        });
        let result = select(vec![], &scores);
        for s in &result {
            assert_eq!(s.description.chars().count(), 103);
            assert!(s.description.ends_with("..."));
        }
    }

    #[test]
    fn test_short_justifications_not_truncated() {
        let scores = scores_with(&[("certifications", 9.0)]);
        let result = select(vec![], &scores);
        assert!(result[0].description.starts_with("Evidence of sustained"));
        assert!(!result[0].description.ends_with("..."));
    }

    #[test]
    fn test_title_case_formats_parameter_names() {
        assert_eq!(title_case("cloud_security"), "Cloud Security");
        assert_eq!(title_case("ot_ics"), "Ot Ics");
        assert_eq!(title_case("experience"), "Experience");
    }
}

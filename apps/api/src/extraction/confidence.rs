//! Heuristic quality score for extracted CV text.
//!
//! The score is recorded in response metadata and logs only; it never gates
//! a request.

use std::collections::HashSet;

use tracing::debug;

/// Keywords a plausibly-extracted CV is expected to contain.
const CV_KEYWORDS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "professional",
    "certification",
    "security",
    "developer",
    "engineer",
    "analyst",
    "manager",
    "project",
    "technical",
    "years",
    "university",
    "degree",
];

/// Scores extracted text quality in [0.0, 1.0], rounded to 2 decimals.
///
/// Weighted sum of four normalized factors: length (0.25), character
/// diversity (0.20), alphanumeric ratio (0.30), keyword hits (0.25). Texts
/// under 500 chars are scaled down proportionally; multi-page documents
/// averaging under 800 chars/page take a further 0.8 factor. Empty or
/// whitespace-only text is exactly 0.0.
pub fn estimate(text: &str, page_count: usize) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let text_length = trimmed.chars().count();
    let total_chars = text.chars().count();

    let length_score = (text_length as f64 / 2000.0).min(1.0);

    let unique_chars = text.chars().collect::<HashSet<_>>().len();
    let diversity_score = (unique_chars as f64 / 100.0).min(1.0);

    let alphanumeric_count = text.chars().filter(|c| c.is_alphanumeric()).count();
    let alphanumeric_ratio = alphanumeric_count as f64 / total_chars as f64;
    let alphanumeric_score = (alphanumeric_ratio * 2.0).min(1.0);

    let text_lower = text.to_lowercase();
    let keyword_matches = CV_KEYWORDS.iter().filter(|k| text_lower.contains(**k)).count();
    let keyword_score = (keyword_matches as f64 / 5.0).min(1.0);

    let mut confidence = length_score * 0.25
        + diversity_score * 0.20
        + alphanumeric_score * 0.30
        + keyword_score * 0.25;

    // Very short texts usually mean a failed extraction
    if text_length < 500 {
        confidence *= text_length as f64 / 500.0;
    }

    // Multi-page documents with sparse pages are suspect too
    if page_count > 1 {
        let chars_per_page = text_length as f64 / page_count as f64;
        if chars_per_page < 800.0 {
            confidence *= 0.8;
        }
    }

    let confidence = confidence.clamp(0.0, 1.0);
    let rounded = (confidence * 100.0).round() / 100.0;

    debug!(
        text_length,
        unique_chars,
        keyword_matches,
        confidence = rounded,
        "parsing confidence computed"
    );

    rounded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cv_text(len: usize) -> String {
        let base = "Experienced security engineer with certification in cloud security. \
                    Education: university degree. Skills: professional analyst work, \
                    technical projects over many years. ";
        base.chars().cycle().take(len).collect()
    }

    #[test]
    fn test_empty_text_is_zero() {
        assert_eq!(estimate("", 1), 0.0);
    }

    #[test]
    fn test_whitespace_only_is_zero() {
        assert_eq!(estimate("   \n\t  ", 1), 0.0);
    }

    #[test]
    fn test_confidence_in_unit_range() {
        let score = estimate(&cv_text(5000), 2);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_rounded_to_two_decimals() {
        let score = estimate(&cv_text(3000), 1);
        assert!(((score * 100.0).round() - score * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_in_length_up_to_cap() {
        let short = estimate(&cv_text(600), 1);
        let medium = estimate(&cv_text(1200), 1);
        let long = estimate(&cv_text(2000), 1);
        assert!(short <= medium);
        assert!(medium <= long);
    }

    #[test]
    fn test_short_text_penalized() {
        // Same content density, but under the 500-char floor
        let short = estimate(&cv_text(100), 1);
        let full = estimate(&cv_text(2000), 1);
        assert!(short < full);
    }

    #[test]
    fn test_sparse_multipage_penalized() {
        let text = cv_text(1000);
        let single_page = estimate(&text, 1);
        // 1000 chars over 4 pages is 250 chars/page, below the 800 floor
        let sparse = estimate(&text, 4);
        assert!(sparse < single_page);
    }

    #[test]
    fn test_dense_multipage_not_penalized() {
        let text = cv_text(4000);
        assert_eq!(estimate(&text, 1), estimate(&text, 2));
    }

    #[test]
    fn test_keywords_raise_confidence() {
        let keyword_free: String = "qwrtypsdfghjklzxcvbnm 0123456789 "
            .chars()
            .cycle()
            .take(2000)
            .collect();
        assert!(estimate(&cv_text(2000), 1) > estimate(&keyword_free, 1));
    }
}

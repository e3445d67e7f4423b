//! Spanish/English detection over extracted CV text.
//!
//! Keyword-count heuristic: Spanish wins only on a strictly higher hit
//! count. Ties and empty input default to English.

const SPANISH_KEYWORDS: &[&str] = &[
    "experiencia",
    "profesional",
    "educación",
    "habilidades",
    "certificación",
    "certificaciones",
    "años",
    "universidad",
    "licenciatura",
    "maestría",
    "español",
    "conocimientos",
    "proyectos",
    "técnico",
    "desarrollador",
    "ingeniero",
    "analista",
    "gerente",
    "trabajé",
    "trabajó",
];

const ENGLISH_KEYWORDS: &[&str] = &[
    "experience",
    "professional",
    "education",
    "skills",
    "certification",
    "certifications",
    "years",
    "university",
    "bachelor",
    "master",
    "english",
    "knowledge",
    "projects",
    "technical",
    "developer",
    "engineer",
    "analyst",
    "manager",
    "worked",
    "developed",
];

/// Returns "es" or "en" for the given text.
pub fn detect(text: &str) -> &'static str {
    if text.trim().is_empty() {
        return "en";
    }

    let text_lower = text.to_lowercase();
    let spanish_hits = SPANISH_KEYWORDS
        .iter()
        .filter(|k| text_lower.contains(**k))
        .count();
    let english_hits = ENGLISH_KEYWORDS
        .iter()
        .filter(|k| text_lower.contains(**k))
        .count();

    if spanish_hits > english_hits {
        "es"
    } else {
        "en"
    }
}

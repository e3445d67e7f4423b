use serde::{Deserialize, Serialize};

/// A single scored evaluation dimension with justification and evidence.
///
/// `weight` is scoring policy, not agent output: it is always taken from
/// [`PARAMETER_WEIGHTS`], regardless of what the upstream response contains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreParameter {
    pub score: f64,
    pub justification: String,
    pub evidence: Vec<String>,
    pub weight: f64,
}

/// Fixed name → weight table for the 24 evaluation parameters.
///
/// First-party constant; never derived at runtime and never overridden by
/// agent-supplied values.
pub const PARAMETER_WEIGHTS: &[(&str, f64)] = &[
    ("certifications", 1.2),
    ("offensive_skills", 1.1),
    ("defensive_skills", 1.1),
    ("governance", 1.0),
    ("cloud_security", 1.1),
    ("tools", 1.0),
    ("programming", 1.0),
    ("architecture", 1.0),
    ("education", 0.9),
    ("soft_skills", 1.0),
    ("languages", 0.8),
    ("devsecops", 1.0),
    ("forensics", 1.0),
    ("cryptography", 1.0),
    ("ot_ics", 1.0),
    ("mobile_iot", 1.0),
    ("threat_intel", 1.0),
    ("contributions", 0.9),
    ("publications", 0.9),
    ("management", 1.0),
    ("crisis", 1.1),
    ("transformation", 1.0),
    ("niche_specialties", 1.0),
    ("experience", 1.2),
];

macro_rules! detailed_scores {
    ($($field:ident),* $(,)?) => {
        /// Container for all 24 evaluation parameters.
        ///
        /// One named field per parameter — "exactly 24 entries, no duplicates,
        /// no omissions" is enforced by the type itself, not by a runtime check.
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct DetailedScores {
            $(pub $field: ScoreParameter,)*
        }

        impl DetailedScores {
            /// Canonical parameter names, in table order.
            pub const NAMES: &'static [&'static str] = &[$(stringify!($field)),*];

            /// Builds the full score set by invoking `make` once per parameter name.
            pub fn build(mut make: impl FnMut(&'static str) -> ScoreParameter) -> Self {
                Self {
                    $($field: make(stringify!($field)),)*
                }
            }

            /// Iterates (name, parameter) pairs in canonical order.
            pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ScoreParameter)> {
                [$((stringify!($field), &self.$field),)*].into_iter()
            }
        }
    };
}

detailed_scores!(
    certifications,
    offensive_skills,
    defensive_skills,
    governance,
    cloud_security,
    tools,
    programming,
    architecture,
    education,
    soft_skills,
    languages,
    devsecops,
    forensics,
    cryptography,
    ot_ics,
    mobile_iot,
    threat_intel,
    contributions,
    publications,
    management,
    crisis,
    transformation,
    niche_specialties,
    experience,
);

/// Weight for a parameter name, from the constant table.
pub fn weight_for(name: &str) -> Option<f64> {
    PARAMETER_WEIGHTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, w)| *w)
}

use serde::{Deserialize, Serialize};

/// Career level derived from experience and responsibilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum SeniorityLevel {
    Junior,
    #[default]
    Mid,
    Senior,
    Lead,
    Executive,
}

impl From<String> for SeniorityLevel {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "junior" => SeniorityLevel::Junior,
            "senior" => SeniorityLevel::Senior,
            "lead" => SeniorityLevel::Lead,
            "executive" => SeniorityLevel::Executive,
            _ => SeniorityLevel::Mid,
        }
    }
}

/// Experience breakdown in years. Negative agent values are clamped to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct YearsExperience {
    pub total_it: f64,
    pub cybersecurity: f64,
    pub current_role: f64,
}

impl YearsExperience {
    pub fn clamped(self) -> Self {
        Self {
            total_it: self.total_it.max(0.0),
            cybersecurity: self.cybersecurity.max(0.0),
            current_role: self.current_role.max(0.0),
        }
    }
}

/// High-level candidate profile summary.
///
/// `total_score` and `percentile` are derived by the weighted aggregator,
/// never taken from agent output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub name: String,
    pub total_score: f64,
    pub percentile: u8,
    pub detected_role: String,
    pub seniority_level: SeniorityLevel,
    pub years_experience: YearsExperience,
}

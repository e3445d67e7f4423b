use serde::{Deserialize, Serialize};

/// Risk level for a detected concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "low" => Severity::Low,
            "high" => Severity::High,
            _ => Severity::Medium,
        }
    }
}

/// Detected inconsistency or concern in the CV.
///
/// `flag_type` is a free-form classification tag, e.g. "employment_gap",
/// "certification_mismatch", "skill_inconsistency".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedFlag {
    #[serde(rename = "type")]
    pub flag_type: String,
    pub severity: Severity,
    pub description: String,
    pub impact: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_flag_type_serializes_as_type() {
        let flag = RedFlag {
            flag_type: "employment_gap".to_string(),
            severity: Severity::Medium,
            description: "Unexplained gap of eight months in 2023.".to_string(),
            impact: "May indicate unstable employment history.".to_string(),
        };
        let json = serde_json::to_value(&flag).unwrap();
        assert_eq!(json["type"], "employment_gap");
        assert_eq!(json["severity"], "medium");
    }
}

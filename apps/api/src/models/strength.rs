use serde::{Deserialize, Serialize};

/// Current market demand for a strength area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MarketValue {
    High,
    #[default]
    Medium,
    Low,
}

impl From<String> for MarketValue {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "high" => MarketValue::High,
            "low" => MarketValue::Low,
            _ => MarketValue::Medium,
        }
    }
}

/// Identified candidate strength.
///
/// The assembled response always carries exactly 5 of these; the selector in
/// `analysis::strengths` owns that postcondition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strength {
    pub area: String,
    pub description: String,
    pub score: f64,
    pub market_value: MarketValue,
}

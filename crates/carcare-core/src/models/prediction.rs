//! Service prediction request and result.

use serde::{Deserialize, Serialize};

/// Input to `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarData {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: f64,
    /// `YYYY-MM-DD`
    pub last_service_date: String,
    pub engine_size: f64,
    pub transmission: String,
    pub fuel_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub service_needed: bool,
    pub confidence: f64,
    pub estimated_days_until_service: i64,
    #[serde(default)]
    pub recommended_services: Vec<String>,
    pub risk_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl PredictionResponse {
    pub fn risk(&self) -> RiskLevel {
        match self.risk_level.to_ascii_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            _ => RiskLevel::Unknown,
        }
    }

    /// Confidence as a whole percentage, clamped to 0..=100.
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

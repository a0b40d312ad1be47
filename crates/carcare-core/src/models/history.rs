//! Saved predictions and per-user statistics.

use serde::{Deserialize, Serialize};

use super::{CarData, PredictionResponse};

/// A prediction saved to the user's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: i64,
    pub user_id: i64,
    pub vehicle_id: Option<i64>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: f64,
    pub service_needed: bool,
    pub confidence: f64,
    pub estimated_days_until_service: i64,
    /// JSON-encoded list, as the backend stores it
    pub recommended_services: String,
    pub risk_level: String,
    pub created_at: Option<String>,
}

impl PredictionRecord {
    /// Decoded `recommended_services`; a malformed value yields an empty list.
    pub fn services(&self) -> Vec<String> {
        serde_json::from_str(&self.recommended_services).unwrap_or_default()
    }

    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

/// Body of `POST /predictions/save`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPredictionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_service_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    pub service_needed: bool,
    pub confidence: f64,
    pub estimated_days_until_service: i64,
    pub recommended_services: String,
    pub risk_level: String,
}

impl NewPredictionRecord {
    /// Combine the input and the result of `POST /predict` into a history entry.
    pub fn from_prediction(
        vehicle_id: Option<i64>,
        car: &CarData,
        prediction: &PredictionResponse,
    ) -> serde_json::Result<Self> {
        Ok(Self {
            vehicle_id,
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year,
            mileage: car.mileage,
            last_service_date: Some(car.last_service_date.clone()),
            engine_size: Some(car.engine_size),
            transmission: Some(car.transmission.clone()),
            fuel_type: Some(car.fuel_type.clone()),
            service_needed: prediction.service_needed,
            confidence: prediction.confidence,
            estimated_days_until_service: prediction.estimated_days_until_service,
            recommended_services: serde_json::to_string(&prediction.recommended_services)?,
            risk_level: prediction.risk_level.clone(),
        })
    }
}

/// Counters returned by `GET /predictions/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatistics {
    pub total_predictions: u64,
    pub total_vehicles: u64,
    pub total_services: u64,
    pub predictions_this_month: u64,
    /// Predictions needing service within the next 30 days
    pub upcoming_services: u64,
}

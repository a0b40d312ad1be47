//! Maintenance log entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: i64,
    pub user_id: i64,
    pub vehicle_id: Option<i64>,
    pub service_type: String,
    pub service_date: String,
    pub cost: Option<f64>,
    pub mileage_at_service: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

/// Body of `POST /services/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewServiceRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
    pub service_type: String,
    /// ISO 8601 date-time
    pub service_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage_at_service: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

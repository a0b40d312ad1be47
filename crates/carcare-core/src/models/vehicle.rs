//! Garage vehicles owned by the signed-in user.

use serde::{Deserialize, Serialize};

/// A vehicle as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub user_id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub nickname: Option<String>,
    #[serde(default)]
    pub mileage: f64,
    pub engine_size: Option<f64>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: Option<String>,
}

impl Vehicle {
    /// Nickname if set, otherwise "year make model".
    pub fn display_name(&self) -> String {
        match self.nickname.as_deref() {
            Some(nick) if !nick.trim().is_empty() => nick.to_string(),
            _ => format!("{} {} {}", self.year, self.make, self.model),
        }
    }
}

/// Body of `POST /vehicles/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub mileage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    pub is_default: bool,
}

/// Partial update for `PUT /vehicles/{id}`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl VehicleUpdate {
    pub fn is_empty(&self) -> bool {
        self.make.is_none()
            && self.model.is_none()
            && self.year.is_none()
            && self.vin.is_none()
            && self.nickname.is_none()
            && self.mileage.is_none()
            && self.engine_size.is_none()
            && self.transmission.is_none()
            && self.fuel_type.is_none()
            && self.is_default.is_none()
    }
}

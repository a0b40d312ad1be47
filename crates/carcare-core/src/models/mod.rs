//! Data models for Car Service Prediction API payloads.
//!
//! - `User`, `TokenResponse`, `RegisterRequest`: account and login payloads
//! - `Vehicle`, `NewVehicle`, `VehicleUpdate`: garage entries
//! - `CarData`, `PredictionResponse`: service prediction input and output
//! - `PredictionRecord`, `NewPredictionRecord`, `UserStatistics`: saved predictions
//! - `ServiceRecord`, `NewServiceRecord`: maintenance log
//! - `VehicleMake`, `VehicleModel`, `NewMake`, `NewModel`: make/model catalog
//! - `Health`: backend liveness check

pub mod catalog;
pub mod health;
pub mod history;
pub mod prediction;
pub mod service;
pub mod user;
pub mod vehicle;

pub use catalog::{NewMake, NewModel, VehicleMake, VehicleModel};
pub use health::Health;
pub use history::{NewPredictionRecord, PredictionRecord, UserStatistics};
pub use prediction::{CarData, PredictionResponse, RiskLevel};
pub use service::{NewServiceRecord, ServiceRecord};
pub use user::{RegisterRequest, TokenResponse, User};
pub use vehicle::{NewVehicle, Vehicle, VehicleUpdate};

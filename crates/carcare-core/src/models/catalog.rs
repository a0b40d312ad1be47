//! Shared make/model catalog. Reading is public, editing needs a superuser.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleMake {
    pub id: i64,
    pub name: String,
    pub created_at: Option<String>,
    /// Only filled by `GET /catalog/makes`
    #[serde(default)]
    pub models: Vec<VehicleModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleModel {
    pub id: i64,
    pub name: String,
    pub make_id: i64,
    pub created_at: Option<String>,
}

/// Body of `POST /catalog/makes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMake {
    pub name: String,
}

/// Body of `POST /catalog/models`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewModel {
    pub name: String,
    pub make_id: i64,
}

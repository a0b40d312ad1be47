use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::Args;

use carcare_core::models::{CarData, NewPredictionRecord, RiskLevel};

use super::Context;

#[derive(Args, Debug)]
pub struct PredictCommand {
    /// Take make, model, year, mileage and engine details from a saved vehicle
    #[arg(long)]
    pub vehicle: Option<i64>,
    #[arg(long, required_unless_present = "vehicle")]
    pub make: Option<String>,
    #[arg(long, required_unless_present = "vehicle")]
    pub model: Option<String>,
    #[arg(long, required_unless_present = "vehicle")]
    pub year: Option<i32>,
    /// Odometer reading in km
    #[arg(long, required_unless_present = "vehicle")]
    pub mileage: Option<f64>,
    /// Date of the last service, YYYY-MM-DD
    #[arg(long)]
    pub last_service: String,
    /// Engine size in litres
    #[arg(long)]
    pub engine_size: Option<f64>,
    #[arg(long)]
    pub transmission: Option<String>,
    #[arg(long)]
    pub fuel_type: Option<String>,
    /// Also store the result in your prediction history
    #[arg(long)]
    pub save: bool,
}

/// Defaults used by the backend's model when a vehicle lacks engine details
const DEFAULT_ENGINE_SIZE: f64 = 2.0;
const DEFAULT_TRANSMISSION: &str = "Automatic";
const DEFAULT_FUEL_TYPE: &str = "Petrol";

async fn car_data(ctx: &Context, cmd: PredictCommand) -> Result<CarData> {
    NaiveDate::parse_from_str(&cmd.last_service, "%Y-%m-%d")
        .with_context(|| format!("Invalid --last-service date '{}'", cmd.last_service))?;

    let saved = match cmd.vehicle {
        Some(id) => Some(ctx.client.get_vehicle(id).await?),
        None => None,
    };

    let pick = |arg: Option<String>, saved: Option<String>| arg.or(saved);
    let make = pick(cmd.make, saved.as_ref().map(|v| v.make.clone()));
    let model = pick(cmd.model, saved.as_ref().map(|v| v.model.clone()));

    Ok(CarData {
        make: make.ok_or_else(|| anyhow::anyhow!("--make is required"))?,
        model: model.ok_or_else(|| anyhow::anyhow!("--model is required"))?,
        year: cmd
            .year
            .or(saved.as_ref().map(|v| v.year))
            .ok_or_else(|| anyhow::anyhow!("--year is required"))?,
        mileage: cmd
            .mileage
            .or(saved.as_ref().map(|v| v.mileage))
            .ok_or_else(|| anyhow::anyhow!("--mileage is required"))?,
        last_service_date: cmd.last_service,
        engine_size: cmd
            .engine_size
            .or(saved.as_ref().and_then(|v| v.engine_size))
            .unwrap_or(DEFAULT_ENGINE_SIZE),
        transmission: pick(cmd.transmission, saved.as_ref().and_then(|v| v.transmission.clone()))
            .unwrap_or_else(|| DEFAULT_TRANSMISSION.to_string()),
        fuel_type: pick(cmd.fuel_type, saved.as_ref().and_then(|v| v.fuel_type.clone()))
            .unwrap_or_else(|| DEFAULT_FUEL_TYPE.to_string()),
    })
}

pub async fn run(ctx: &Context, cmd: PredictCommand) -> Result<()> {
    ctx.require_login()?;
    let vehicle_id = cmd.vehicle;
    let save = cmd.save;
    let car = car_data(ctx, cmd).await?;
    let prediction = ctx.client.predict(&car).await?;

    let risk = match prediction.risk() {
        RiskLevel::Low => "low",
        RiskLevel::Medium => "medium",
        RiskLevel::High => "HIGH",
        RiskLevel::Unknown => prediction.risk_level.as_str(),
    };

    println!("{} {} {}", car.year, car.make, car.model);
    if prediction.service_needed {
        println!("Service needed (risk {}, {}% confidence)", risk, prediction.confidence_percent());
    } else {
        println!("No service needed yet (risk {}, {}% confidence)", risk, prediction.confidence_percent());
    }
    println!("Next service in about {} days", prediction.estimated_days_until_service);
    for service in &prediction.recommended_services {
        println!("  - {}", service);
    }

    if save {
        let record = NewPredictionRecord::from_prediction(vehicle_id, &car, &prediction)?;
        let saved = ctx.client.save_prediction(&record).await?;
        println!("Saved to history as #{}", saved.id);
    }
    Ok(())
}

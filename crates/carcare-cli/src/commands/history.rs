//! Saved prediction history and account statistics.

use anyhow::Result;
use clap::Subcommand;

use carcare_core::models::PredictionRecord;

use crate::format::{format_date, format_mileage};

use super::Context;

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List saved predictions, newest first
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
        /// Only predictions for this vehicle
        #[arg(long)]
        vehicle: Option<i64>,
    },
    /// Show one saved prediction
    Show { id: i64 },
    /// Totals for your account
    Stats,
}

fn print_record(record: &PredictionRecord) {
    println!("Prediction #{}", record.id);
    println!("  Vehicle:   {} {} {}", record.year, record.make, record.model);
    println!("  Mileage:   {}", format_mileage(record.mileage));
    println!(
        "  Result:    {} (risk {}, {}% confidence)",
        if record.service_needed { "service needed" } else { "no service needed" },
        record.risk_level,
        record.confidence_percent()
    );
    println!("  Next:      in about {} days", record.estimated_days_until_service);
    for service in record.services() {
        println!("    - {}", service);
    }
    if let Some(ref created) = record.created_at {
        println!("  Saved:     {}", format_date(created));
    }
}

pub async fn run(ctx: &Context, cmd: HistoryCommand) -> Result<()> {
    ctx.require_login()?;

    match cmd {
        HistoryCommand::List {
            skip,
            limit,
            vehicle,
        } => {
            let records = ctx.client.prediction_history(skip, limit, vehicle).await?;
            if records.is_empty() {
                println!("No saved predictions. Use `carcare predict --save`.");
                return Ok(());
            }
            for r in &records {
                let saved = r.created_at.as_deref().map(format_date).unwrap_or_default();
                println!(
                    "{:>5}  {:<12}  {} {} {:<16}  {:<7}  {:>4} days",
                    r.id,
                    saved,
                    r.year,
                    r.make,
                    r.model,
                    r.risk_level,
                    r.estimated_days_until_service
                );
            }
        }
        HistoryCommand::Show { id } => {
            let record = ctx.client.get_prediction(id).await?;
            print_record(&record);
        }
        HistoryCommand::Stats => {
            let stats = ctx.client.prediction_stats().await?;
            println!("Predictions:       {}", stats.total_predictions);
            println!("  this month:      {}", stats.predictions_this_month);
            println!("Vehicles:          {}", stats.total_vehicles);
            println!("Service records:   {}", stats.total_services);
            println!("Due within 30 days: {}", stats.upcoming_services);
        }
    }
    Ok(())
}

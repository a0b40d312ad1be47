//! Maintenance log commands.

use anyhow::{Context as _, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Subcommand};

use carcare_core::models::{NewServiceRecord, ServiceRecord};

use crate::format::{format_date, format_mileage, format_optional};

use super::Context;

#[derive(Subcommand, Debug)]
pub enum ServicesCommand {
    /// List service records, most recent first
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
        /// Only records for this vehicle
        #[arg(long)]
        vehicle: Option<i64>,
    },
    /// Show one service record
    Show { id: i64 },
    /// Log a service
    Add(AddServiceCommand),
    /// Delete a service record
    Remove { id: i64 },
}

#[derive(Args, Debug)]
pub struct AddServiceCommand {
    /// What was done, e.g. "Oil Change"
    #[arg(long = "type")]
    pub service_type: String,
    /// YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS
    #[arg(long)]
    pub date: String,
    #[arg(long)]
    pub vehicle: Option<i64>,
    #[arg(long)]
    pub cost: Option<f64>,
    /// Odometer reading in km
    #[arg(long)]
    pub mileage: Option<f64>,
    #[arg(long)]
    pub notes: Option<String>,
}

/// Normalize a date argument to the ISO date-time the backend expects.
fn service_datetime(input: &str) -> Result<String> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.format("%Y-%m-%dT%H:%M:%S").to_string());
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Invalid --date '{}'", input))?;
    Ok(format!("{}T00:00:00", date.format("%Y-%m-%d")))
}

impl AddServiceCommand {
    fn into_record(self) -> Result<NewServiceRecord> {
        Ok(NewServiceRecord {
            vehicle_id: self.vehicle,
            service_type: self.service_type,
            service_date: service_datetime(&self.date)?,
            cost: self.cost,
            mileage_at_service: self.mileage,
            notes: self.notes,
        })
    }
}

fn print_record(record: &ServiceRecord) {
    println!("{} (#{})", record.service_type, record.id);
    println!("  Date:    {}", format_date(&record.service_date));
    match record.vehicle_id {
        Some(id) => println!("  Vehicle: #{}", id),
        None => println!("  Vehicle: -"),
    }
    match record.mileage_at_service {
        Some(km) => println!("  Mileage: {}", format_mileage(km)),
        None => println!("  Mileage: -"),
    }
    match record.cost {
        Some(cost) => println!("  Cost:    {:.2}", cost),
        None => println!("  Cost:    -"),
    }
    println!("  Notes:   {}", format_optional(&record.notes, "-"));
}

pub async fn run(ctx: &Context, cmd: ServicesCommand) -> Result<()> {
    ctx.require_login()?;

    match cmd {
        ServicesCommand::List {
            skip,
            limit,
            vehicle,
        } => {
            let records = ctx.client.list_service_records(skip, limit, vehicle).await?;
            if records.is_empty() {
                println!("No service records. Log one with `carcare services add`.");
                return Ok(());
            }
            for r in &records {
                let cost = r.cost.map(|c| format!("{:.2}", c)).unwrap_or_default();
                println!(
                    "{:>5}  {:<12}  {:<24}  {:>10}",
                    r.id,
                    format_date(&r.service_date),
                    r.service_type,
                    cost
                );
            }
        }
        ServicesCommand::Show { id } => {
            let record = ctx.client.get_service_record(id).await?;
            print_record(&record);
        }
        ServicesCommand::Add(add) => {
            let record = ctx.client.create_service_record(&add.into_record()?).await?;
            println!("Logged {} (#{})", record.service_type, record.id);
        }
        ServicesCommand::Remove { id } => {
            ctx.client.delete_service_record(id).await?;
            println!("Removed service record #{}", id);
        }
    }
    Ok(())
}

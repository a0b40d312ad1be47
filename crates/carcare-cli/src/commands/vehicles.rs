//! Garage vehicle commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use carcare_core::models::{NewVehicle, Vehicle, VehicleUpdate};

use crate::format::{format_date, format_mileage, format_optional, truncate_string};

use super::Context;

/// Width of the name column in `vehicles list`
const NAME_COLUMN_WIDTH: usize = 28;

#[derive(Subcommand, Debug)]
pub enum VehiclesCommand {
    /// List your vehicles
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Show one vehicle
    Show { id: i64 },
    /// Add a vehicle
    Add(AddCommand),
    /// Change fields of a vehicle
    Update(UpdateCommand),
    /// Remove a vehicle
    Remove { id: i64 },
}

#[derive(Args, Debug)]
pub struct AddCommand {
    #[arg(long)]
    pub make: String,
    #[arg(long)]
    pub model: String,
    #[arg(long)]
    pub year: i32,
    #[arg(long, default_value_t = 0.0)]
    pub mileage: f64,
    #[arg(long)]
    pub vin: Option<String>,
    #[arg(long)]
    pub nickname: Option<String>,
    #[arg(long)]
    pub engine_size: Option<f64>,
    #[arg(long)]
    pub transmission: Option<String>,
    #[arg(long)]
    pub fuel_type: Option<String>,
    /// Make this the default vehicle
    #[arg(long)]
    pub default: bool,
}

#[derive(Args, Debug)]
pub struct UpdateCommand {
    pub id: i64,
    #[arg(long)]
    pub make: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub mileage: Option<f64>,
    #[arg(long)]
    pub vin: Option<String>,
    #[arg(long)]
    pub nickname: Option<String>,
    #[arg(long)]
    pub engine_size: Option<f64>,
    #[arg(long)]
    pub transmission: Option<String>,
    #[arg(long)]
    pub fuel_type: Option<String>,
    #[arg(long)]
    pub default: Option<bool>,
}

impl From<AddCommand> for NewVehicle {
    fn from(cmd: AddCommand) -> Self {
        NewVehicle {
            make: cmd.make,
            model: cmd.model,
            year: cmd.year,
            vin: cmd.vin,
            nickname: cmd.nickname,
            mileage: cmd.mileage,
            engine_size: cmd.engine_size,
            transmission: cmd.transmission,
            fuel_type: cmd.fuel_type,
            is_default: cmd.default,
        }
    }
}

impl From<UpdateCommand> for VehicleUpdate {
    fn from(cmd: UpdateCommand) -> Self {
        VehicleUpdate {
            make: cmd.make,
            model: cmd.model,
            year: cmd.year,
            vin: cmd.vin,
            nickname: cmd.nickname,
            mileage: cmd.mileage,
            engine_size: cmd.engine_size,
            transmission: cmd.transmission,
            fuel_type: cmd.fuel_type,
            is_default: cmd.default,
        }
    }
}

fn print_vehicle(vehicle: &Vehicle) {
    println!("{} (#{})", vehicle.display_name(), vehicle.id);
    println!("  Vehicle:      {} {} {}", vehicle.year, vehicle.make, vehicle.model);
    println!("  Mileage:      {}", format_mileage(vehicle.mileage));
    println!("  VIN:          {}", format_optional(&vehicle.vin, "-"));
    match vehicle.engine_size {
        Some(size) => println!("  Engine:       {:.1} L", size),
        None => println!("  Engine:       -"),
    }
    println!("  Transmission: {}", format_optional(&vehicle.transmission, "-"));
    println!("  Fuel:         {}", format_optional(&vehicle.fuel_type, "-"));
    if let Some(ref created) = vehicle.created_at {
        println!("  Added:        {}", format_date(created));
    }
}

pub async fn run(ctx: &Context, cmd: VehiclesCommand) -> Result<()> {
    ctx.require_login()?;

    match cmd {
        VehiclesCommand::List { skip, limit } => {
            let vehicles = ctx.client.list_vehicles(skip, limit).await?;
            if vehicles.is_empty() {
                println!("No vehicles yet. Add one with `carcare vehicles add`.");
                return Ok(());
            }
            for v in &vehicles {
                let marker = if v.is_default { "*" } else { " " };
                println!(
                    "{} {:>5}  {:<width$}  {:>12}",
                    marker,
                    v.id,
                    truncate_string(&v.display_name(), NAME_COLUMN_WIDTH),
                    format_mileage(v.mileage),
                    width = NAME_COLUMN_WIDTH
                );
            }
        }
        VehiclesCommand::Show { id } => {
            let vehicle = ctx.client.get_vehicle(id).await?;
            print_vehicle(&vehicle);
        }
        VehiclesCommand::Add(add) => {
            let vehicle = ctx.client.create_vehicle(&add.into()).await?;
            println!("Added {} (#{})", vehicle.display_name(), vehicle.id);
        }
        VehiclesCommand::Update(update) => {
            let id = update.id;
            let update: VehicleUpdate = update.into();
            if update.is_empty() {
                bail!("Nothing to update; pass at least one field");
            }
            let vehicle = ctx.client.update_vehicle(id, &update).await?;
            print_vehicle(&vehicle);
        }
        VehiclesCommand::Remove { id } => {
            ctx.client.delete_vehicle(id).await?;
            println!("Removed vehicle #{}", id);
        }
    }
    Ok(())
}

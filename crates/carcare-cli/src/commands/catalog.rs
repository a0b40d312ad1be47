//! Make/model catalog. Listing is public; edits need a superuser.

use anyhow::Result;
use clap::Subcommand;

use super::Context;

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// List every make with its models
    Makes,
    /// List the models of one make
    Models { make_id: i64 },
    /// Add a make (superuser only)
    AddMake { name: String },
    /// Add a model to a make (superuser only)
    AddModel { make_id: i64, name: String },
    /// Delete a make (superuser only)
    RemoveMake { id: i64 },
    /// Delete a model (superuser only)
    RemoveModel { id: i64 },
}

pub async fn run(ctx: &Context, cmd: CatalogCommand) -> Result<()> {
    match cmd {
        CatalogCommand::Makes => {
            let makes = ctx.client.list_makes().await?;
            if makes.is_empty() {
                println!("The catalog is empty");
            }
            for make in &makes {
                let models: Vec<&str> = make.models.iter().map(|m| m.name.as_str()).collect();
                println!("{:>5}  {:<20}  {}", make.id, make.name, models.join(", "));
            }
        }
        CatalogCommand::Models { make_id } => {
            for model in ctx.client.list_models_for_make(make_id).await? {
                println!("{:>5}  {}", model.id, model.name);
            }
        }
        CatalogCommand::AddMake { name } => {
            ctx.require_superuser()?;
            let make = ctx.client.create_make(&name).await?;
            println!("Added make {} (#{})", make.name, make.id);
        }
        CatalogCommand::AddModel { make_id, name } => {
            ctx.require_superuser()?;
            let model = ctx.client.create_model(make_id, &name).await?;
            println!("Added model {} (#{}) to make #{}", model.name, model.id, model.make_id);
        }
        CatalogCommand::RemoveMake { id } => {
            ctx.require_superuser()?;
            ctx.client.delete_make(id).await?;
            println!("Removed make #{}", id);
        }
        CatalogCommand::RemoveModel { id } => {
            ctx.require_superuser()?;
            ctx.client.delete_model(id).await?;
            println!("Removed model #{}", id);
        }
    }
    Ok(())
}

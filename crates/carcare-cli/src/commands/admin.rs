//! Superuser account management.

use anyhow::{bail, Result};
use clap::Subcommand;

use super::Context;

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List accounts
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Delete an account by id
    Delete { id: i64 },
}

pub async fn run(ctx: &Context, cmd: UsersCommand) -> Result<()> {
    let me = ctx.require_superuser()?;

    match cmd {
        UsersCommand::List { skip, limit } => {
            let users = ctx.client.list_users(skip, limit).await?;
            println!("{:>6}  {:<40}  {:<6}  {}", "ID", "EMAIL", "ROLE", "ACTIVE");
            for user in &users {
                let id = user.id.map(|id| id.to_string()).unwrap_or_default();
                let active = match user.is_active {
                    Some(true) => "yes",
                    Some(false) => "no",
                    None => "-",
                };
                println!("{:>6}  {:<40}  {:<6}  {}", id, user.email, user.role_display(), active);
            }
        }
        UsersCommand::Delete { id } => {
            if me.id == Some(id) {
                bail!("Refusing to delete the account you are signed in with");
            }
            let deleted = ctx.client.delete_user(id).await?;
            println!("Deleted {}", deleted.email);
        }
    }
    Ok(())
}

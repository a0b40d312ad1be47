//! login, logout, status, whoami, register

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context as _, Result};
use clap::Args;
use tracing::{info, warn};

use carcare_core::{AuthPhase, Config, TokenClaims};

use super::Context;

/// Minutes before expiry at which `status` warns the token is about to lapse
const EXPIRY_WARNING_MINUTES: i64 = 5;

#[derive(Args, Debug)]
pub struct LoginCommand {
    /// Account email (defaults to the last one used)
    #[arg(long, short)]
    pub email: Option<String>,
    /// Use an existing bearer token instead of a password
    #[arg(long, conflicts_with = "email")]
    pub token: Option<String>,
}

#[derive(Args, Debug)]
pub struct RegisterCommand {
    /// Account email
    pub email: String,
}

fn prompt(label: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", label)?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn remember_email(email: &str) {
    let result = Config::load().and_then(|mut stored| {
        stored.last_email = Some(email.to_string());
        stored.save()
    });
    if let Err(e) = result {
        warn!(error = %e, "Failed to save last email");
    }
}

pub async fn login(ctx: &Context, cmd: LoginCommand) -> Result<()> {
    let token = match cmd.token {
        Some(token) => token,
        None => {
            let email = match cmd.email.or_else(|| ctx.config.last_email.clone()) {
                Some(email) => email,
                None => prompt("Email: ")?,
            };
            if email.is_empty() {
                bail!("Email is required");
            }
            let password = rpassword::prompt_password(format!("Password for {}: ", email))
                .context("Failed to read password")?;

            let response = ctx.client.authenticate(&email, &password).await?;
            remember_email(&email);
            response.access_token
        }
    };

    ctx.auth.login(token).await?;

    let state = ctx.auth.get();
    match (state.phase(), state.user) {
        (AuthPhase::Authenticated, Some(user)) => {
            info!(email = %user.email, "Logged in");
            println!("Logged in as {} ({})", user.email, user.role_display());
            Ok(())
        }
        _ => bail!("Login failed: the backend did not accept the token"),
    }
}

pub fn logout(ctx: &Context) -> Result<()> {
    ctx.auth.logout()?;
    println!("Logged out");
    Ok(())
}

pub fn status(ctx: &Context) -> Result<()> {
    let state = ctx.auth.get();

    println!("Backend:  {}", ctx.auth.base_url());
    println!("Storage:  {}", ctx.auth.storage().describe());

    match state.user {
        Some(ref user) if state.phase() == AuthPhase::Authenticated => {
            println!("Session:  logged in as {} ({})", user.email, user.role_display());
        }
        _ => {
            println!("Session:  logged out");
            return Ok(());
        }
    }

    if let Some(ref token) = state.token {
        match TokenClaims::decode(token) {
            Ok(claims) => println!("Expires:  {}", expiry_line(&claims)),
            Err(e) => warn!(error = %e, "Token is not a readable JWT"),
        }
    }
    Ok(())
}

fn expiry_line(claims: &TokenClaims) -> String {
    if claims.is_expired() {
        return "expired (run `carcare login` again)".to_string();
    }
    match claims.minutes_until_expiry() {
        Some(minutes) if minutes <= EXPIRY_WARNING_MINUTES => {
            format!("in {} min (log in again soon)", minutes)
        }
        Some(minutes) => format!("in {} min", minutes),
        None => "never".to_string(),
    }
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    ctx.require_login()?;
    let user = ctx.client.current_user().await?;
    ctx.auth.set_user(user.clone());
    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}

pub async fn register(ctx: &Context, cmd: RegisterCommand) -> Result<()> {
    let password = rpassword::prompt_password("Password (8-72 characters): ")
        .context("Failed to read password")?;
    let confirm = rpassword::prompt_password("Repeat password: ")
        .context("Failed to read password")?;
    if password != confirm {
        bail!("Passwords do not match");
    }

    let user = ctx.client.register(&cmd.email, &password).await?;
    remember_email(&user.email);
    println!("Registered {}. Run `carcare login` to sign in.", user.email);
    Ok(())
}

//! Raw authenticated requests and the health check.

use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;

use carcare_core::api::RequestOptions;

use super::Context;

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

#[derive(Args, Debug)]
pub struct RequestCommand {
    /// HTTP method
    #[arg(value_enum)]
    pub method: HttpMethod,
    /// Endpoint path, e.g. /vehicles/
    pub endpoint: String,
    /// Request body
    #[arg(long, short)]
    pub data: Option<String>,
    /// Extra header as NAME:VALUE (repeatable)
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("Header must look like NAME:VALUE, got '{}'", raw))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .with_context(|| format!("Invalid header name '{}'", name.trim()))?;
    let value = HeaderValue::from_str(value.trim())
        .with_context(|| format!("Invalid value for header {}", name))?;
    Ok((name, value))
}

pub async fn run(ctx: &Context, cmd: RequestCommand) -> Result<()> {
    let endpoint = if cmd.endpoint.starts_with('/') {
        cmd.endpoint
    } else {
        format!("/{}", cmd.endpoint)
    };

    let mut options = RequestOptions {
        body: cmd.data,
        ..Default::default()
    };
    for raw in &cmd.headers {
        let (name, value) = parse_header(raw)?;
        options.headers.insert(name, value);
    }

    let response = ctx.client.request(cmd.method.into(), &endpoint, options).await?;
    let status = response.status();
    let body = response.text().await.context("Failed to read response body")?;

    eprintln!("{}", status);
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", body),
    }
    Ok(())
}

pub async fn health(ctx: &Context) -> Result<()> {
    let health = ctx.client.health().await?;
    if health.is_healthy() {
        println!("{} is healthy", ctx.auth.base_url());
        Ok(())
    } else {
        anyhow::bail!("{} reports status '{}'", ctx.auth.base_url(), health.status)
    }
}

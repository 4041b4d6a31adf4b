//! Visitor Notify - Main entry point
//!
//! Usage:
//!
//! ```text
//! visitor-notify submit [PATH]   submit a registration read from PATH or stdin
//! visitor-notify health          check the delivery endpoint
//! visitor-notify hosts           list the configured hosts
//! ```

use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use visitor_notify::{
    AsyncEmailClient, AsyncEmailClientImpl, BatchDispatcher, CompanyConfig, Config,
    DeliveryClient, EmailClient, Metrics, SubmissionOrchestrator, VisitorFormData,
};

const USAGE: &str = "usage: visitor-notify <submit [PATH] | health | hosts>";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Logs go to stderr; stdout carries command output
    let default_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let company = match config.load_company() {
        Ok(company) => Arc::new(company),
        Err(e) => {
            error!("Failed to load company configuration: {}", e);
            return Err(e.into());
        }
    };

    let metrics = Metrics::new();
    let sync_client = EmailClient::new(&config).with_metrics(metrics.clone());
    let client = Arc::new(AsyncEmailClientImpl::new(sync_client)) as Arc<dyn AsyncEmailClient>;

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("submit") => submit(&config, company, client, metrics, args.next()).await,
        Some("health") => health(client.as_ref()).await,
        Some("hosts") => {
            list_hosts(&company);
            Ok(())
        }
        _ => bail!(USAGE),
    }
}

async fn submit(
    config: &Config,
    company: Arc<CompanyConfig>,
    client: Arc<dyn AsyncEmailClient>,
    metrics: Metrics,
    path: Option<String>,
) -> Result<()> {
    let form = read_form(path.as_deref()).await?;

    info!(
        "Submitting registration via {} (max retries: {})",
        config.email_api_url, config.max_retries
    );

    let delivery = DeliveryClient::new(client, config.retry_policy()).with_metrics(metrics.clone());
    let mut orchestrator = SubmissionOrchestrator::new(company, BatchDispatcher::new(delivery))
        .with_timeouts(config.timeout_policy())
        .with_network(config.network.clone());
    orchestrator.load_form(form);

    let result = orchestrator.submit().await;
    let summary = metrics.summary();
    info!(
        requests = summary.http_requests_total,
        retries = summary.retries_total,
        "Submission finished in state {}",
        orchestrator.state()
    );

    match result {
        Ok(report) => {
            println!(
                "Registration submitted (confirmation id: {})",
                report.visitor_message_id.as_deref().unwrap_or("none")
            );
            if !report.host_notified {
                println!("Warning: the host could not be notified");
            }
            Ok(())
        }
        Err(e) => {
            for (field, err) in orchestrator.errors().iter() {
                println!("{}: {}", field, err);
            }
            if let Some(message) = orchestrator.failure_message() {
                println!("{}", message);
            }
            Err(e.into())
        }
    }
}

async fn read_form(path: Option<&str>) -> Result<VisitorFormData> {
    let raw = match path {
        Some(path) if path != "-" => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path))?,
        _ => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read registration from stdin")?;
            raw
        }
    };

    serde_json::from_str(&raw).context("Registration is not valid JSON form data")
}

async fn health(client: &dyn AsyncEmailClient) -> Result<()> {
    let status = client
        .health()
        .await
        .context("Delivery endpoint is unreachable")?;

    println!("{} ({})", status.message, status.timestamp);
    if !status.success {
        bail!("Delivery endpoint reported unhealthy");
    }
    Ok(())
}

fn list_hosts(company: &CompanyConfig) {
    println!("{}", company.name);
    for host in company.hosts.iter() {
        println!("  {:<20} {} - {} <{}>", host.id, host.name, host.title, host.email);
    }
}

//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `taxpay status` | Mount the provider and report each service (default) |
//! | `taxpay services` | List registered service descriptors |

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use taxpay_domain::ServiceName;
use taxpay_infrastructure::config::{AppConfig, ConfigLoader};
use taxpay_infrastructure::di::{ServiceMode, ServiceProvider, ServiceRegistry, mount_app};
use taxpay_infrastructure::logging::init_logging;
use tracing::info;

/// Command line interface for the tourist-tax services
#[derive(Parser, Debug)]
#[command(name = "taxpay")]
#[command(about = "Tourist-tax service registry")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// What to do
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the services and report their state
    Status {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List registered service descriptors
    Services,
}

/// State of one service in a status report
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    /// Canonical service name
    pub name: ServiceName,
    /// Implementation in use
    pub provider: String,
    /// Whether the registry can hand the live instance out
    pub available: bool,
}

/// Result of mounting the provider
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// `live` or `degraded`
    pub mode: String,
    /// Why the provider degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// One entry per service
    pub services: Vec<ServiceStatus>,
}

impl StatusReport {
    /// Human-readable rendering
    pub fn render(&self) -> String {
        let mut out = format!("mode: {}\n", self.mode);
        if let Some(reason) = &self.reason {
            let _ = writeln!(out, "reason: {reason}");
        }
        for service in &self.services {
            let _ = writeln!(
                out,
                "{:<16} {:<16} {}",
                service.name.as_str(),
                service.provider,
                if service.available { "available" } else { "unavailable" }
            );
        }
        out
    }
}

/// Wait for `provider` and describe what it published
pub async fn status_report(provider: &ServiceProvider) -> taxpay_domain::Result<StatusReport> {
    let ctx = provider.ready().await?;
    let (mode, reason) = match ctx.mode() {
        ServiceMode::Live => ("live".to_string(), None),
        ServiceMode::Degraded { reason } => ("degraded".to_string(), Some(reason.clone())),
    };

    let services = ServiceName::ALL
        .into_iter()
        .map(|name| ServiceStatus {
            name,
            provider: ctx.get(name).provider_name().to_string(),
            available: provider
                .registry()
                .map_or(!ctx.is_degraded(), |registry| registry.is_available(name)),
        })
        .collect();

    Ok(StatusReport {
        mode,
        reason,
        services,
    })
}

/// Descriptor listing, one line per service
pub fn describe_services(registry: &ServiceRegistry) -> String {
    registry
        .descriptors()
        .iter()
        .fold(String::new(), |mut out, descriptor| {
            let _ = writeln!(
                out,
                "{:<16} {}",
                descriptor.name().as_str(),
                descriptor.description()
            );
            out
        })
}

fn load_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}

/// Run the CLI
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging)?;

    match cli.command.unwrap_or(Command::Status { json: false }) {
        Command::Status { json } => {
            let provider = mount_app(config)?;
            let report = status_report(&provider).await?;
            info!(mode = %report.mode, "Status collected");
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render());
            }
            provider.unmount();
        }
        Command::Services => {
            let registry = ServiceRegistry::with_defaults(config)?;
            print!("{}", describe_services(&registry));
        }
    }
    Ok(())
}

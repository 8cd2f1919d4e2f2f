//! GeoSphere warnings CLI
//!
//! Polls GeoSphere Austria for weather warnings at configured locations and
//! prints the derived alarm and summary states.

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use anyhow::{Context, bail};
use application::{InstanceId, InstanceRegistry, WarningService, WarningSinkPort, WarningsPort};
use clap::Parser;
use infrastructure::{AppConfig, GeosphereAdapter, MonitorSettings, WarningPoller, init_telemetry};
use presentation_cli::{Cli, Commands, OutputFormat, StdoutWarningSink, log_filter_from_verbosity};
use tokio::sync::watch;
use tracing::{info, warn};

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

fn build_registry(settings: &MonitorSettings) -> anyhow::Result<InstanceRegistry> {
    let port: Arc<dyn WarningsPort> = Arc::new(
        GeosphereAdapter::with_config(settings.client.clone())
            .context("Failed to create GeoSphere client")?,
    );

    let registry = InstanceRegistry::new();
    for monitor in &settings.monitors {
        registry.setup(Arc::clone(&port), monitor.clone())?;
    }
    Ok(registry)
}

fn select_services(
    registry: &InstanceRegistry,
    instance: Option<&str>,
) -> anyhow::Result<Vec<Arc<WarningService>>> {
    match instance {
        Some(id) => {
            let id = InstanceId::new(id)?;
            let Some(service) = registry.get(&id) else {
                bail!("Unknown instance '{id}'");
            };
            Ok(vec![service])
        },
        None => Ok(registry.services()),
    }
}

/// Whether the shared warnings endpoint answers; `None` without instances
async fn endpoint_reachable(registry: &InstanceRegistry) -> Option<bool> {
    let service = registry.services().into_iter().next()?;
    Some(service.is_available().await)
}

async fn run_watch(registry: &InstanceRegistry, settings: &MonitorSettings, format: OutputFormat) -> anyhow::Result<()> {
    let sink: Arc<dyn WarningSinkPort> = Arc::new(StdoutWarningSink::new(format));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let handles: Vec<_> = registry
        .services()
        .into_iter()
        .map(|service| {
            let poller = Arc::new(WarningPoller::new(
                service,
                Arc::clone(&sink),
                settings.poll_interval,
            ));
            poller.spawn(shutdown_rx.clone())
        })
        .collect();

    info!(instances = handles.len(), "Watching for warnings, press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    info!("Shutting down");
    let _ = shutdown_tx.send(true);
    for handle in handles {
        if let Err(e) = handle.await {
            warn!(error = %e, "Poller task ended abnormally");
        }
    }

    for id in registry.ids() {
        registry.unload(&id)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = load_config(&cli)?;

    let mut telemetry = app_config.telemetry.clone();
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        telemetry = telemetry.with_filter(filter);
    }
    init_telemetry(&telemetry)?;

    let settings = app_config.validate()?;

    match cli.command {
        Commands::ValidateConfig => {
            println!("Configuration is valid");
            println!("  endpoint:      {}", settings.client.base_url);
            println!("  poll interval: {}s", settings.poll_interval.as_secs());
            for monitor in &settings.monitors {
                println!(
                    "  - {} ({}): {} lead time {}",
                    monitor.id, monitor.name, monitor.location, monitor.lead_time
                );
            }

            let registry = build_registry(&settings)?;
            if let Some(reachable) = endpoint_reachable(&registry).await {
                println!("  reachable:     {}", if reachable { "yes" } else { "no" });
            }
        },

        Commands::Check { instance, json } => {
            let registry = build_registry(&settings)?;
            let sink = StdoutWarningSink::new(OutputFormat::from_json_flag(json));

            for service in select_services(&registry, instance.as_deref())? {
                service.run_cycle(&sink).await?;
            }
        },

        Commands::Watch { json } => {
            let registry = build_registry(&settings)?;
            run_watch(&registry, &settings, OutputFormat::from_json_flag(json)).await?;
        },
    }

    Ok(())
}

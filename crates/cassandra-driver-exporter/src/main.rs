use anyhow::Result;
use cassandra_driver_exporter::logging;
use cassandra_driver_exporter::static_clients;
use cassandra_driver_exporter::ExporterArgs;
use cassandra_driver_exporter::MetricsServer;
use cassandra_driver_metrics::DriverMetricsCollector;
use clap::Parser;
use tokio::sync::oneshot;
use tracing_subscriber::filter::LevelFilter;

/// Sets up global panic hooks.
fn setup_global_hooks() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        default_hook(panic_info);
        tracing::error!("Thread panicked: {}", panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_global_hooks();

    let args = ExporterArgs::parse();
    logging::init(LevelFilter::INFO).map_err(|e| anyhow::anyhow!("{e:?}"))?;

    tracing::info!(
        "Starting cassandra driver exporter {}",
        env!("CARGO_PKG_VERSION")
    );

    let collector = DriverMetricsCollector::new();
    if let Some(path) = &args.clients_file {
        let clients = static_clients::load(path).map_err(|e| anyhow::anyhow!("{e:?}"))?;
        static_clients::register(&collector, clients);
    }

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {e}");
            return;
        }
        let _ = shutdown_tx.send(());
    });

    MetricsServer::new(collector, &args)
        .run(shutdown_rx)
        .await
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;

    Ok(())
}

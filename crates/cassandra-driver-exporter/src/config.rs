use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(about, long_about, version)]
pub struct ExporterArgs {
    #[arg(
        long,
        env = "METRICS_LISTEN_ADDR",
        default_value = "0.0.0.0:9500",
        help = "Address the scrape endpoint listens on"
    )]
    pub listen_addr: String,

    #[arg(
        long,
        env = "METRICS_PATH",
        default_value = "/metrics",
        help = "HTTP path serving the collected metrics"
    )]
    pub metrics_path: String,

    #[arg(
        long,
        env = "METRICS_FORMAT",
        default_value = "text",
        help = "Response format, `text` for the Prometheus exposition format or `json`"
    )]
    pub metrics_format: String,

    #[arg(
        long,
        env = "DRIVER_CLIENTS_FILE",
        value_hint = clap::ValueHint::FilePath,
        help = "YAML file with static client snapshots to register at startup, e.g. /etc/exporter/clients.yaml"
    )]
    pub clients_file: Option<PathBuf>,
}

use std::sync::Arc;

use cassandra_driver_metrics::create_encoder;
use cassandra_driver_metrics::DriverMetricsCollector;
use cassandra_driver_metrics::MetricsEncoder;
use error_stack::Report;
use poem::get;
use poem::handler;
use poem::http::StatusCode;
use poem::listener::TcpListener;
use poem::middleware::Tracing;
use poem::web::Data;
use poem::Endpoint;
use poem::EndpointExt;
use poem::Response;
use poem::Route;
use poem::Server;
use tokio::sync::oneshot;
use tracing::error;
use tracing::info;

use crate::config::ExporterArgs;
use crate::error::ExporterError;

#[derive(Clone)]
struct ScrapeState {
    collector: DriverMetricsCollector,
    encoder: Arc<dyn MetricsEncoder>,
}

/// Runs a collection pass and encodes it for the scraper
#[handler]
fn scrape(state: Data<&ScrapeState>) -> Response {
    let families = state.collector.collect();
    match state.encoder.encode(&families) {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .content_type(state.encoder.content_type())
            .body(body),
        Err(report) => {
            error!("Failed to encode driver metrics: {report:?}");
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body("failed to encode metrics")
        }
    }
}

/// HTTP scrape endpoint for a [`DriverMetricsCollector`]
pub struct MetricsServer {
    collector: DriverMetricsCollector,
    encoder: Arc<dyn MetricsEncoder>,
    listen_addr: String,
    metrics_path: String,
}

impl MetricsServer {
    pub fn new(collector: DriverMetricsCollector, args: &ExporterArgs) -> Self {
        let metrics_path = if args.metrics_path.starts_with('/') {
            args.metrics_path.clone()
        } else {
            format!("/{}", args.metrics_path)
        };
        Self {
            collector,
            encoder: Arc::from(create_encoder(&args.metrics_format)),
            listen_addr: args.listen_addr.clone(),
            metrics_path,
        }
    }

    pub fn metrics_path(&self) -> &str {
        &self.metrics_path
    }

    /// The routes served by [`MetricsServer::run`]
    pub fn endpoint(&self) -> impl Endpoint + 'static {
        let state = ScrapeState {
            collector: self.collector.clone(),
            encoder: Arc::clone(&self.encoder),
        };
        Route::new()
            .at(&self.metrics_path, get(scrape))
            .data(state)
            .with(Tracing)
    }

    /// Serve scrapes until `shutdown_rx` fires
    ///
    /// # Errors
    ///
    /// - [`ExporterError::Server`] if the server fails to start or bind to the address
    pub async fn run(self, mut shutdown_rx: oneshot::Receiver<()>) -> Result<(), Report<ExporterError>> {
        info!(
            "Serving driver metrics on {}{}",
            self.listen_addr, self.metrics_path
        );

        let app = self.endpoint();
        let listener = TcpListener::bind(&self.listen_addr);
        let server = Server::new(listener);

        tokio::select! {
            result = server.run(app) => {
                match result {
                    Ok(()) => {
                        info!("Metrics server stopped normally");
                        Ok(())
                    }
                    Err(e) => {
                        error!("Metrics server failed: {e}");
                        Err(Report::new(ExporterError::Server {
                            message: format!("Server failed: {e}"),
                        }))
                    }
                }
            }
            _ = &mut shutdown_rx => {
                info!("Metrics server shutdown requested");
                Ok(())
            }
        }
    }
}

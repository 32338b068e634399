// Main entry point - Dependency injection and the page event loop
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

use crate::application::chart_session::ChartSession;
use crate::application::prediction_flow::PredictionFlow;
use crate::domain::chart::ChartOptions;
use crate::infrastructure::config::load_client_config;
use crate::infrastructure::http_prediction_service::HttpPredictionService;
use crate::infrastructure::system_clock::SystemClock;
use crate::infrastructure::terminal_view::{Output, TerminalView};
use crate::presentation::console::Console;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_client_config()?;

    // Initialize tracing, RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Create adapters (infrastructure layer)
    let service = Arc::new(HttpPredictionService::new(config.service.predict_url())?);
    let out: Output = Arc::new(Mutex::new(std::io::stdout()));
    let view = Arc::new(TerminalView::new(out, config.display.show_chart));

    // Chart session lives for the whole run
    let chart = Arc::new(Mutex::new(ChartSession::initialize(
        view.chart_surface(),
        ChartOptions::default(),
    )));

    // Create the request flow (application layer)
    let flow = PredictionFlow::new(
        view.clone(),
        service.clone(),
        chart,
        Arc::new(SystemClock),
        config.flow.response_ordering,
    );

    tracing::info!("Predicting against {}", service.url());

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    Console::new(view, flow).run(stdin).await
}

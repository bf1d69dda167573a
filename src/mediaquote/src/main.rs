//! MediaQuote — media-buying catalog and campaign quotation service.
//!
//! Main entry point that wires the catalog store, quotation engine, and
//! REST API together and starts the server.

use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use mediaquote_api::{api_router, ApiState};
use mediaquote_catalog::CatalogStore;
use mediaquote_core::config::AppConfig;
use mediaquote_quotation::{AllocationPolicy, QuotationEngine, SeededPricing};

#[derive(Parser, Debug)]
#[command(name = "mediaquote")]
#[command(about = "Media-buying catalog and campaign quotation service")]
#[command(version)]
struct Cli {
    /// HTTP port (overrides config)
    #[arg(long, env = "MEDIAQUOTE__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Pricing seed (overrides config)
    #[arg(long, env = "MEDIAQUOTE__QUOTATION__PRICING_SEED")]
    pricing_seed: Option<u64>,

    /// Start with an empty catalog instead of demo data
    #[arg(long, default_value_t = false)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediaquote=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("MediaQuote starting up");

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(seed) = cli.pricing_seed {
        config.quotation.pricing_seed = seed;
    }
    if cli.no_seed {
        config.catalog.seed_demo_data = false;
    }

    // Metrics exporter
    let metrics_addr: SocketAddr = format!("{}:{}", config.api.host, config.metrics.port).parse()?;
    if let Err(e) = PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
    {
        warn!(error = %e, "Failed to install metrics exporter, continuing without");
    } else {
        info!(addr = %metrics_addr, "Metrics exporter listening");
    }

    // Catalog store
    let store = if config.catalog.seed_demo_data {
        Arc::new(CatalogStore::with_demo_data())
    } else {
        Arc::new(CatalogStore::new())
    };

    // Quotation engine
    let policy = if config.quotation.redistribute_capped_budget {
        AllocationPolicy::WaterFill
    } else {
        AllocationPolicy::Proportional
    };
    let pricing = Arc::new(SeededPricing::new(config.quotation.pricing_seed));
    let engine = Arc::new(QuotationEngine::new(store.clone(), pricing).with_policy(policy));

    let app = api_router(ApiState { store, engine });

    let addr: SocketAddr = format!("{}:{}", config.api.host, config.api.http_port).parse()?;
    info!(addr = %addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

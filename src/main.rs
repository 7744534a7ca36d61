use clap::Parser;
use fitx_api::RestApi;
use fitx_core::SizeChartRegistry;
use fitx_matching::{EngineConfig, IntervalScoring, SizeEngine, VanityAdjustment};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Cross-brand garment size recommendation server
#[derive(Parser, Debug)]
#[command(name = "fitx")]
#[command(about = "Cross-brand size recommendation server", long_about = None)]
struct Args {
    /// Address to bind the HTTP API to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// JSON file with additional brand size charts (array of charts)
    #[arg(long)]
    charts: Option<PathBuf>,

    /// Start from an empty registry instead of the built-in catalog
    #[arg(long)]
    no_reference_charts: bool,

    /// JSON file with engine configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interval scoring: containment or midpoint
    #[arg(long)]
    scoring: Option<IntervalScoring>,

    /// Vanity sizing in cross-brand overlap: none or shift
    #[arg(long)]
    vanity_adjustment: Option<VanityAdjustment>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn load_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    if let Some(scoring) = args.scoring {
        config.scoring = scoring;
    }
    if let Some(adjustment) = args.vanity_adjustment {
        config.vanity_adjustment = adjustment;
    }
    Ok(config)
}

fn load_registry(args: &Args) -> anyhow::Result<SizeChartRegistry> {
    let mut registry = if args.no_reference_charts {
        SizeChartRegistry::empty()
    } else {
        SizeChartRegistry::reference()
    };
    if let Some(path) = &args.charts {
        let loaded = registry.merge_json_file(path)?;
        info!("Loaded {} size charts from {:?}", loaded, path);
    }
    Ok(registry)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG wins over --log-level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting FitX v{}", env!("CARGO_PKG_VERSION"));

    let registry = load_registry(&args)?;
    let config = load_config(&args)?;
    info!("Registry: {} brands", registry.len());
    info!("Scoring: {}, vanity adjustment: {}", config.scoring, config.vanity_adjustment);

    let engine = Arc::new(SizeEngine::new(Arc::new(registry), config)?);

    let host = args.host.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on {}:{}", host, http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(engine, &host, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("FitX started successfully");
    info!("HTTP API: http://{}:{}/", args.host, args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

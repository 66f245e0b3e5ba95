//! Mock 3D-scan API server entry point.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scan_mock::api::AppState;
use scan_mock::config::Config;
use scan_mock::metrics;
use scan_mock::scan::{MODEL_URL, SCAN_DELAY};
use scan_mock::server;
use scan_mock::utils::shutdown_signal;

/// Mock 3D-scan processing API.
#[derive(Parser, Debug)]
#[command(name = "scan-mock")]
#[command(about = "Fake scan-processing backend for frontend development")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Port to listen on (overrides SCAN_MOCK_PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Interface to listen on (overrides SCAN_MOCK_HOST).
    #[arg(long, global = true)]
    host: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the mock API (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("scan_mock=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = load_config(args.port, args.host)?;

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Load configuration and apply CLI overrides.
fn load_config(port: Option<u16>, host: Option<String>) -> anyhow::Result<Config> {
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Some(port) = port {
        config.port = port;
    }
    if let Some(host) = host {
        config.host = host;
    }

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SCAN MOCK - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", config.socket_addr()?);
    println!("  Scan Delay: {}s", SCAN_DELAY.as_secs());
    println!("  Model URL: {}", MODEL_URL);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the mock API until Ctrl-C or SIGTERM.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    // Initialize metrics
    let handle = metrics::install_recorder()?;
    metrics::init_metrics();

    let state = AppState::new().with_metrics(handle);

    let addr = config.socket_addr()?;
    let listener = server::bind(addr).await.map_err(|e| {
        error!("{}", e);
        e
    })?;

    info!(
        "Mock scan API ready: POST /api/scan ({}s delay), GET /api/test",
        SCAN_DELAY.as_secs()
    );

    server::serve(listener, state, shutdown_signal()).await?;

    Ok(())
}

use std::{env, net::SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use caredesk_server::{create_app, CareDeskServer, ServerConfig};

/// CareDesk HMS HTTP Server
#[derive(Parser, Debug)]
#[command(name = "caredesk-server")]
#[command(about = "Hospital management HTTP API server")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Skip seeding the default admin user and formulary
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose)?;

    info!("Starting CareDesk HMS HTTP Server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig {
        seed_on_start: !args.no_seed,
        ..ServerConfig::default()
    };
    let server = CareDeskServer::new(config);
    let app = create_app(server);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("CareDesk server running on http://{}", addr);
    info!("Health check available at: http://{}/health", addr);
    info!("API available at: http://{}/api", addr);
    info!("API docs available at: http://{}/docs", addr);

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let is_development =
        env::var("CAREDESK_ENV").unwrap_or_else(|_| "development".to_string()) == "development";

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("caredesk_server={},tower_http=info", level).into());

    if is_development {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339()),
            )
            .init();
    } else {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .init();
    }

    Ok(())
}

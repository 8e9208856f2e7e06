/*****************************************************************************************
 *
 *  hearthrest – In-memory REST collections over HTTP+JSON
 *  ------------------------------------------------------
 *
 *  users, tasks and tweets served from one router, one store per collection
 *
 *****************************************************************************************/

use std::path::{Path, PathBuf};

use axum::serve;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

use hearthrest::app;
use hearthrest::config::AppConfig;

#[derive(Debug, Parser)]
#[command(version, about = "In-memory REST collections over HTTP+JSON")]
struct Cli {
    /// Path to config.json (default: next to the executable, then cwd)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    //
    // ────────────────────────────────────────────────────────
    //  Locate and load configuration
    // ────────────────────────────────────────────────────────
    //
    let config_path = cli.config.clone().or_else(locate_config);

    let mut cfg = match &config_path {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };

    if let Some(port) = cli.port {
        cfg.port = port;
    }

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let level = match cfg.log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info"  => LevelFilter::INFO,
        "warn"  => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match &config_path {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::warn!("config.json not found, using defaults"),
    }
    tracing::info!("Starting hearthrest…");
    tracing::info!("Loaded configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Build router (stores are created here, once)
    // ────────────────────────────────────────────────────────
    //
    let app = app::build_app(&cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Bind server and start listening
    // ────────────────────────────────────────────────────────
    //
    let addr = cfg.socket_addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Listening on http://{}", listener.local_addr()?);
    tracing::info!("Serving: {:?}", cfg.resource_set());

    serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .await?;

    Ok(())
}

/// `config.json` next to the executable, one level up, or in the cwd.
fn locate_config() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join("config.json"));
        candidates.push(exe_dir.join("..").join("config.json"));
    }
    candidates.push(PathBuf::from("config.json"));

    candidates.into_iter().find(|p| p.exists())
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }

    tracing::warn!("CTRL+C received, shutting down (in-memory collections are discarded)");
}

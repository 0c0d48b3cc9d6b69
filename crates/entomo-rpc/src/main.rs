//! Entomo RPC Server - JSON-RPC backend for the insect catalogue.
//!
//! This binary provides a JSON-RPC 2.0 server that wraps the entomo-core
//! search API for browser and script clients.

mod handlers;
mod server;
mod wrapper;

use anyhow::Result;
use clap::Parser;
use entomo_core::config::AppConfig;
use entomo_core::Catalog;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "entomo-rpc")]
#[command(about = "JSON-RPC server for the Entomo insect catalogue")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, env = "ENTOMO_PORT", default_value = "0")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "ENTOMO_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Catalogue root holding `data/` and `images/` (defaults to the current directory)
    #[arg(long, env = "ENTOMO_ROOT")]
    root: Option<PathBuf>,

    /// SQLite database file (defaults to `<root>/data/catalogue.db`)
    #[arg(long, env = "ENTOMO_DATABASE")]
    database: Option<PathBuf>,

    /// Image pool directory (defaults to `<root>/images`)
    #[arg(long, env = "ENTOMO_IMAGE_ROOT")]
    image_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging; RUST_LOG overrides the --debug default
    let default_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting {} RPC Server", AppConfig::APP_NAME);

    let root = match args.root {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    info!("Catalogue root: {}", root.display());

    let mut builder = Catalog::builder(&root).auto_create_dirs(true);
    if let Some(database) = args.database {
        builder = builder.database_path(database);
    }
    if let Some(image_root) = args.image_root {
        builder = builder.image_root(image_root);
    }
    let catalog = builder.build()?;

    // Start the server
    let addr = server::start_server(catalog, &args.host, args.port).await?;

    // Machine-readable port line for supervising processes
    println!("RPC_PORT={}", addr.port());

    info!("RPC server running on {}", addr);

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
